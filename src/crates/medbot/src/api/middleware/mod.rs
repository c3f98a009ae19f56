//! Router layers

mod cors;
mod logging;

pub use cors::cors_layer;
pub use logging::logging_layer;
