//! Bearer credential extraction

use axum::http::{header, HeaderMap};

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// Returns `None` for a missing, repeated, unreadable or non-bearer header,
/// and for an empty token.
pub fn get_bearer_token(headers: &HeaderMap) -> Option<String> {
    let mut values = headers.get_all(header::AUTHORIZATION).iter();
    let value = values.next()?;
    if values.next().is_some() {
        return None;
    }

    let raw = value.to_str().ok()?.trim();
    let scheme = raw.get(..7)?;
    if !scheme.eq_ignore_ascii_case("bearer ") {
        return None;
    }

    let token = raw[7..].trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
