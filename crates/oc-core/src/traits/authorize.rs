//! Authorization traits

use async_trait::async_trait;

use crate::auth::{AuthDecision, ConnectRequest};
use crate::error::AuthError;

/// Decides whether a connecting client may use the gateway
#[async_trait]
pub trait GatewayAuthorizer: Send + Sync {
    /// Check supplied credentials against the configured policy
    ///
    /// A denial is `Ok` with `ok == false`; `Err` means the decision could
    /// not be made at all.
    async fn authorize(&self, request: ConnectRequest<'_>) -> Result<AuthDecision, AuthError>;
}
