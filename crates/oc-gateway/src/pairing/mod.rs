//! Device pairing endpoint
//!
//! `GET /api/pairing/qr` returns the deep link (and QR code) a remote
//! control client scans to connect to this gateway. The link embeds the
//! gateway secrets, so the handler checks, in order:
//!
//! 1. route and method
//! 2. origin: same-machine callers are trusted without credentials
//! 3. otherwise a bearer credential, checked by the authorizer
//!
//! Only then is the reachable host resolved and the payload built. The
//! first failing step ends the request.

pub mod credentials;
pub mod host;
pub mod origin;
pub mod payload;

use axum::http::{request::Parts, Method, StatusCode};
use axum::response::Response;

use oc_core::auth::{ConnectAuth, ConnectRequest};

use crate::error::GatewayError;
use crate::http::{host_unresolvable, method_not_allowed, send_json, unauthorized};
use crate::state::GatewayState;

pub use credentials::get_bearer_token;
pub use host::resolve_reachable_host;
pub use origin::{is_local_direct_request, RequestOrigin};
pub use payload::{build_deep_link, build_pairing_payload, PairingPayload};

/// Path served by the pairing handler
pub const PAIRING_QR_PATH: &str = "/api/pairing/qr";

/// Handle a pairing request
///
/// Returns `Ok(None)` when the request is not for the pairing path so the
/// caller can try other routes. Collaborator failures are returned as
/// errors rather than folded into a pairing response.
pub async fn handle_pairing_qr_request(
    parts: &Parts,
    state: &GatewayState,
) -> Result<Option<Response>, GatewayError> {
    if parts.uri.path() != PAIRING_QR_PATH {
        return Ok(None);
    }

    if parts.method != Method::GET {
        return Ok(Some(method_not_allowed("GET")));
    }

    let origin = RequestOrigin::from_parts(parts);
    if is_local_direct_request(&origin, state.trusted_proxies()) {
        tracing::debug!(peer = ?origin.peer, "Pairing request from local origin");
    } else {
        let connect_auth = get_bearer_token(&parts.headers).map(|t| ConnectAuth::from_bearer(&t));
        let decision = state
            .authorizer()
            .authorize(ConnectRequest {
                auth: state.auth(),
                connect_auth: connect_auth.as_ref(),
                peer: origin.peer,
                trusted_proxies: state.trusted_proxies(),
            })
            .await?;

        if !decision.ok {
            tracing::warn!(peer = ?origin.peer, "Rejected unauthorized pairing request");
            return Ok(Some(unauthorized()));
        }
    }

    let config = state.config();
    // The current resolver always yields a host; this branch keeps the
    // handler safe if a resolver that can fail is swapped in.
    let Some(host) = resolve_reachable_host(&config.bind_host, state.lan()) else {
        tracing::error!(
            bind_host = %config.bind_host,
            "Cannot determine reachable host address for pairing"
        );
        return Ok(Some(host_unresolvable()));
    };

    let payload = build_pairing_payload(
        host,
        config.port,
        config.tls_enabled(),
        state.auth(),
        state.renderer(),
    )
    .await?;

    tracing::info!(
        peer = ?origin.peer,
        host = %payload.host,
        port = payload.port,
        tls = payload.tls,
        "Served pairing payload"
    );

    Ok(Some(send_json(StatusCode::OK, &payload)))
}
