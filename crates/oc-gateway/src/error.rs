//! Gateway error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use oc_core::error::{AuthError, RenderError};
use thiserror::Error;

/// Collaborator failures surfaced by request handlers
///
/// Pairing outcomes (deny, wrong method, unresolvable host) are responses,
/// not errors. These are infrastructure failures and are answered with a
/// generic 500 by the server.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The authorization backend failed
    #[error("Authorization failed: {0}")]
    Auth(#[from] AuthError),

    /// QR rendering failed
    #[error("QR rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        crate::http::json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
