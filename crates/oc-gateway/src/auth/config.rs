//! Shared-secret authorization against the gateway config

use async_trait::async_trait;

use oc_core::auth::{secrets_match, AuthDecision, AuthFailure, ConnectRequest};
use oc_core::error::AuthError;
use oc_core::traits::GatewayAuthorizer;

/// Checks credentials against the secrets in `AuthConfig`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigAuthorizer;

impl ConfigAuthorizer {
    pub fn new() -> Self {
        Self
    }

    fn decide(request: &ConnectRequest<'_>) -> AuthDecision {
        let auth = request.auth;
        if !auth.has_secret() {
            return AuthDecision::deny(AuthFailure::NotConfigured);
        }

        let Some(supplied) = request.connect_auth else {
            return AuthDecision::deny(AuthFailure::CredentialsMissing);
        };

        if let (Some(expected), Some(provided)) = (auth.token(), supplied.token.as_deref()) {
            if secrets_match(provided, expected) {
                return AuthDecision::allow();
            }
        }

        if let (Some(expected), Some(provided)) = (auth.password(), supplied.password.as_deref()) {
            if secrets_match(provided, expected) {
                return AuthDecision::allow();
            }
        }

        AuthDecision::deny(AuthFailure::Mismatch)
    }
}

#[async_trait]
impl GatewayAuthorizer for ConfigAuthorizer {
    async fn authorize(&self, request: ConnectRequest<'_>) -> Result<AuthDecision, AuthError> {
        let decision = Self::decide(&request);
        if let Some(reason) = decision.reason {
            tracing::debug!(peer = ?request.peer, "Gateway auth denied: {}", reason);
        }
        Ok(decision)
    }
}
