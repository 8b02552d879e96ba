//! Core error types for the OpenClaw gateway

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the authorization collaborator itself.
///
/// A denied credential is not an error; it is an `AuthDecision` with
/// `ok == false`.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The policy backend could not be consulted
    #[error("Authorization backend unavailable: {0}")]
    Unavailable(String),
}

/// QR rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// The payload does not fit in a QR code
    #[error("QR encoding failed: {0}")]
    Encode(String),

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    Image(String),

    /// The blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    Task(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
