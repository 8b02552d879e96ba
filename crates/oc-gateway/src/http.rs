//! JSON and status response helpers

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Respond with `status` and `body` serialized as JSON
pub fn send_json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, Json(body)).into_response()
}

/// Respond with `{"error": message}`
pub fn json_error(status: StatusCode, message: &str) -> Response {
    send_json(status, &serde_json::json!({ "error": message }))
}

/// 405 with the allowed methods in the `Allow` header
pub fn method_not_allowed(allow: &'static str) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static(allow))],
        "Method Not Allowed",
    )
        .into_response()
}

/// 401 without any detail about which check failed
pub fn unauthorized() -> Response {
    json_error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

/// 500 for a bind host that maps to no address a client could reach
pub fn host_unresolvable() -> Response {
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Cannot determine reachable host address",
    )
}

/// 404 for requests no route handled
pub fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "Not Found")
}
