//! Async utilities for common async patterns
//!
//! ```rust,ignore
//! use tooling::async_utils::timeout::{or_fallback, with_timeout};
//! use std::time::Duration;
//!
//! let text = or_fallback(Duration::from_secs(5), fetch_page(url), |_| snippet).await;
//! ```

pub mod timeout;
