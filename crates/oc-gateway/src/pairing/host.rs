//! Reachable-host resolution for pairing links

use oc_core::traits::LanAddressSource;

const LOOPBACK_V4: &str = "127.0.0.1";

/// Map the configured bind host to an address a client can connect to
///
/// Wildcard binds advertise the primary LAN address (or loopback when
/// none is found), loopback aliases collapse to `127.0.0.1`, and any other
/// host is assumed to be externally meaningful already. Every input
/// currently resolves; callers still handle `None`.
pub fn resolve_reachable_host(bind_host: &str, lan: &dyn LanAddressSource) -> Option<String> {
    match bind_host {
        "0.0.0.0" | "::" => Some(
            lan.primary_ipv4()
                .map(|ip| ip.to_string())
                .unwrap_or_else(|| LOOPBACK_V4.to_string()),
        ),
        "127.0.0.1" | "::1" | "localhost" => Some(LOOPBACK_V4.to_string()),
        other => Some(other.to_string()),
    }
}
