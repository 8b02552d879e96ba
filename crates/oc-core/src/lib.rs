//! oc-core: Core abstractions and configuration for the OpenClaw gateway
//!
//! This crate provides the configuration structures, error types, auth
//! primitives and collaborator traits shared by the gateway server and CLI.

pub mod auth;
pub mod config;
pub mod error;
pub mod net;
pub mod traits;

pub use auth::{AuthConfig, ConnectAuth};
pub use error::{AuthError, ConfigError, RenderError};
