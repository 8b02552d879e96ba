//! Request dispatch
//!
//! Each route handler is offered the request in turn and either answers it
//! or declines; a request nobody answers gets a 404 here.

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::http::not_found;
use crate::pairing::handle_pairing_qr_request;
use crate::state::GatewayState;

/// Build the gateway router
pub fn build_router(state: GatewayState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

async fn dispatch(State(state): State<GatewayState>, req: Request) -> Response {
    let (parts, _body) = req.into_parts();

    match handle_pairing_qr_request(&parts, &state).await {
        Ok(Some(response)) => response,
        Ok(None) => {
            tracing::trace!(path = %parts.uri.path(), "No route matched");
            not_found()
        }
        Err(e) => e.into_response(),
    }
}
