//! LAN address discovery
//!
//! A gateway bound to a wildcard address needs a concrete address to put in
//! pairing links. Discovery is best effort: it asks the routing table which
//! local IPv4 address would carry outbound traffic and never sends a packet.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

/// Destination used only to select a route; nothing is sent to it
const ROUTE_PROBE_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 9);

/// Source of the machine's primary LAN-facing IPv4 address
pub trait LanAddressSource: Send + Sync {
    /// Best-effort primary IPv4 address, `None` when none can be found
    fn primary_ipv4(&self) -> Option<Ipv4Addr>;
}

/// Discovers the LAN address from the operating system's routing table
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLanAddress;

impl LanAddressSource for SystemLanAddress {
    fn primary_ipv4(&self) -> Option<Ipv4Addr> {
        match probe_route_ipv4() {
            Ok(Some(ip)) => Some(ip),
            Ok(None) => {
                tracing::debug!("Route probe returned no usable LAN IPv4 address");
                None
            }
            Err(e) => {
                tracing::debug!("LAN IPv4 discovery failed: {}", e);
                None
            }
        }
    }
}

/// A fixed answer, for machines with a known address and for tests
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLanAddress(pub Option<Ipv4Addr>);

impl LanAddressSource for StaticLanAddress {
    fn primary_ipv4(&self) -> Option<Ipv4Addr> {
        self.0
    }
}

/// Connect an unbound UDP socket and read back the local address chosen
fn probe_route_ipv4() -> std::io::Result<Option<Ipv4Addr>> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(ROUTE_PROBE_ADDR)?;
    match socket.local_addr()?.ip() {
        IpAddr::V4(ip) if is_usable_lan_ipv4(ip) => Ok(Some(ip)),
        _ => Ok(None),
    }
}

/// Whether a remote device could plausibly reach us on this address
pub fn is_usable_lan_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_unspecified() || ip.is_loopback() || ip.is_link_local() || ip.is_broadcast())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_lan_ipv4() {
        assert!(is_usable_lan_ipv4(Ipv4Addr::new(192, 168, 1, 5)));
        assert!(is_usable_lan_ipv4(Ipv4Addr::new(10, 0, 0, 7)));
        assert!(is_usable_lan_ipv4(Ipv4Addr::new(100, 64, 1, 50)));

        assert!(!is_usable_lan_ipv4(Ipv4Addr::UNSPECIFIED));
        assert!(!is_usable_lan_ipv4(Ipv4Addr::LOCALHOST));
        assert!(!is_usable_lan_ipv4(Ipv4Addr::new(169, 254, 3, 4)));
        assert!(!is_usable_lan_ipv4(Ipv4Addr::BROADCAST));
    }

    #[test]
    fn test_static_source() {
        let ip = Ipv4Addr::new(192, 168, 1, 5);
        assert_eq!(StaticLanAddress(Some(ip)).primary_ipv4(), Some(ip));
        assert_eq!(StaticLanAddress(None).primary_ipv4(), None);
    }

    #[test]
    fn test_system_source_never_returns_loopback() {
        // Result depends on the host's network; only the filter is checked
        if let Some(ip) = SystemLanAddress.primary_ipv4() {
            assert!(is_usable_lan_ipv4(ip));
        }
    }
}
