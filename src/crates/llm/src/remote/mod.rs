//! Remote generation backends.

mod addis;

pub use addis::AddisClient;
