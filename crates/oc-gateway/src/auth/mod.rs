//! Authorization for the gateway
//!
//! Remote callers authenticate with the configured shared token or
//! password. Same-machine callers are classified before this runs and
//! never reach it.

mod config;

pub use config::ConfigAuthorizer;
