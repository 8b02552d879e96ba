//! Origin trust classification
//!
//! Decides whether a request may be treated as coming from the gateway's
//! own machine. A forwarded origin is only believed when the transport
//! peer is an explicitly trusted proxy, and any header we cannot read
//! unambiguously makes the request non-local.

use std::net::{IpAddr, SocketAddr};

use axum::extract::ConnectInfo;
use axum::http::{header, request::Parts, HeaderMap, HeaderName};

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");
const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Transport-level origin of a request
#[derive(Debug, Clone, Copy)]
pub struct RequestOrigin<'a> {
    /// Address of the socket peer
    pub peer: Option<IpAddr>,
    /// Request headers, including any forwarding claims
    pub headers: &'a HeaderMap,
}

impl<'a> RequestOrigin<'a> {
    pub fn new(peer: Option<IpAddr>, headers: &'a HeaderMap) -> Self {
        Self { peer, headers }
    }

    /// Read the peer from the connection info the server attaches
    pub fn from_parts(parts: &'a Parts) -> Self {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Self::new(peer, &parts.headers)
    }
}

/// Whether the request originates from this machine
///
/// True when the socket peer is loopback and nothing forwarded the request,
/// or when a trusted proxy forwarded it on behalf of a loopback client. In
/// both cases the request must also be addressed to a loopback host name.
pub fn is_local_direct_request(origin: &RequestOrigin<'_>, trusted_proxies: &[String]) -> bool {
    let Some(peer) = origin.peer.map(normalize_ip) else {
        return false;
    };

    if !host_header_is_local(origin.headers) {
        return false;
    }

    if !has_forwarding_headers(origin.headers) {
        return peer.is_loopback();
    }

    if !is_trusted_proxy(peer, trusted_proxies) {
        return false;
    }

    if !forwarded_host_is_local(origin.headers) {
        return false;
    }

    match forwarded_client_ip(origin.headers, trusted_proxies) {
        Some(client) => client.is_loopback(),
        None => false,
    }
}

/// Whether `ip` is one of the configured trusted proxies
pub fn is_trusted_proxy(ip: IpAddr, trusted_proxies: &[String]) -> bool {
    let ip = normalize_ip(ip);
    trusted_proxies
        .iter()
        .filter_map(|entry| parse_ip(entry))
        .any(|proxy| proxy == ip)
}

/// Unwrap IPv4-mapped IPv6 addresses so `::ffff:127.0.0.1` is loopback
pub fn normalize_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6
            .to_ipv4_mapped()
            .map(IpAddr::V4)
            .unwrap_or(IpAddr::V6(v6)),
        v4 => v4,
    }
}

fn parse_ip(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);
    value.parse::<IpAddr>().ok().map(normalize_ip)
}

fn has_forwarding_headers(headers: &HeaderMap) -> bool {
    headers.contains_key(&X_FORWARDED_FOR)
        || headers.contains_key(&X_REAL_IP)
        || headers.contains_key(header::FORWARDED)
        || headers.contains_key(&X_FORWARDED_HOST)
}

/// The client address a trusted proxy claims, or `None` if the claim is
/// missing, cannot be parsed, or the headers disagree about it
fn forwarded_client_ip(headers: &HeaderMap, trusted_proxies: &[String]) -> Option<IpAddr> {
    // We do not parse RFC 7239; its presence makes any other claim suspect
    if headers.contains_key(header::FORWARDED) {
        return None;
    }

    let xff_client = if headers.contains_key(&X_FORWARDED_FOR) {
        Some(xff_client_ip(headers, trusted_proxies)?)
    } else {
        None
    };
    let real_ip = if headers.contains_key(&X_REAL_IP) {
        Some(single_ip_header(headers, &X_REAL_IP)?)
    } else {
        None
    };

    match (xff_client, real_ip) {
        (Some(a), Some(b)) if a == b => Some(a),
        (Some(_), Some(_)) => None,
        (Some(client), None) | (None, Some(client)) => Some(client),
        (None, None) => None,
    }
}

fn xff_client_ip(headers: &HeaderMap, trusted_proxies: &[String]) -> Option<IpAddr> {
    let mut hops = Vec::new();
    for value in headers.get_all(&X_FORWARDED_FOR) {
        for entry in value.to_str().ok()?.split(',') {
            hops.push(parse_ip(entry)?);
        }
    }

    // Proxies append; the rightmost untrusted hop is the first one we
    // did not put there ourselves.
    hops.iter()
        .rev()
        .find(|hop| !is_trusted_proxy(**hop, trusted_proxies))
        .or_else(|| hops.first())
        .copied()
}

fn single_ip_header(headers: &HeaderMap, name: &HeaderName) -> Option<IpAddr> {
    let mut values = headers.get_all(name).iter();
    let value = values.next()?;
    if values.next().is_some() {
        return None;
    }
    parse_ip(value.to_str().ok()?)
}

/// A forwarded host, when present, is held to the same rule as `Host`
fn forwarded_host_is_local(headers: &HeaderMap) -> bool {
    let mut values = headers.get_all(&X_FORWARDED_HOST).iter();
    let Some(value) = values.next() else {
        return true;
    };
    if values.next().is_some() {
        return false;
    }
    value.to_str().is_ok_and(is_local_host_name)
}

/// Reject requests addressed to a foreign host name, which is what a
/// DNS-rebound browser page sends
fn host_header_is_local(headers: &HeaderMap) -> bool {
    let mut values = headers.get_all(header::HOST).iter();
    let Some(value) = values.next() else {
        return true;
    };
    if values.next().is_some() {
        return false;
    }
    value.to_str().is_ok_and(is_local_host_name)
}

fn is_local_host_name(host: &str) -> bool {
    let hostname = host_without_port(host.trim());
    hostname.eq_ignore_ascii_case("localhost")
        || parse_ip(hostname).is_some_and(|ip| ip.is_loopback())
}

fn host_without_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match host.rsplit_once(':') {
        // A bare IPv6 literal has several colons and no port
        Some((name, _)) if !name.contains(':') => name,
        _ => host,
    }
}
