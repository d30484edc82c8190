//! Hostname and MAC resolution for a live host.

use std::net::Ipv4Addr;

use tracing::debug;

use crate::domain::HostIdentity;
use crate::ports::{HostnameResolverPort, NeighborTablePort};

/// Resolves both identity fields of a live host concurrently.
///
/// Lookup failures are never errors; they become [`crate::domain::UNKNOWN`].
pub struct IdentityResolver<H, N> {
    resolver: H,
    neighbors: N,
}

impl<H: HostnameResolverPort, N: NeighborTablePort> IdentityResolver<H, N> {
    pub fn new(resolver: H, neighbors: N) -> Self {
        Self {
            resolver,
            neighbors,
        }
    }

    /// Reverse-DNS name and neighbor-table MAC for `address`.
    pub async fn resolve(&self, address: Ipv4Addr) -> HostIdentity {
        let (hostname, mac_address) = tokio::join!(
            self.resolver.hostname(address),
            self.neighbors.mac_address(address),
        );

        debug!(
            %address,
            hostname = hostname.as_deref().unwrap_or("-"),
            mac = mac_address.as_deref().unwrap_or("-"),
            "identity resolved"
        );

        HostIdentity::new(hostname, mac_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MacPattern, UNKNOWN};

    struct NoDns;

    impl HostnameResolverPort for NoDns {
        async fn hostname(&self, _address: Ipv4Addr) -> Option<String> {
            None
        }
    }

    struct StaticDns(&'static str);

    impl HostnameResolverPort for StaticDns {
        async fn hostname(&self, _address: Ipv4Addr) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    /// Neighbor table backed by canned `arp` output.
    struct CannedTable {
        output: &'static str,
        pattern: MacPattern,
    }

    impl NeighborTablePort for CannedTable {
        async fn mac_address(&self, address: Ipv4Addr) -> Option<String> {
            self.pattern.find_for(self.output, address)
        }
    }

    #[tokio::test]
    async fn test_unknown_without_dns_or_neighbor_entry() {
        let identity = IdentityResolver::new(
            NoDns,
            CannedTable {
                output: "",
                pattern: MacPattern::colon_only(),
            },
        );

        let resolved = identity.resolve(Ipv4Addr::new(192, 168, 1, 5)).await;
        assert_eq!(resolved.hostname, UNKNOWN);
        assert_eq!(resolved.mac_address, UNKNOWN);
    }

    #[tokio::test]
    async fn test_mac_from_table_line() {
        let identity = IdentityResolver::new(
            StaticDns("printer.lan"),
            CannedTable {
                output: "192.168.1.5  ether  0a:1b:2c:3d:4e:5f  C  eth0\n",
                pattern: MacPattern::colon_only(),
            },
        );

        let resolved = identity.resolve(Ipv4Addr::new(192, 168, 1, 5)).await;
        assert_eq!(resolved.hostname, "printer.lan");
        assert_eq!(resolved.mac_address, "0A:1B:2C:3D:4E:5F");
    }

    #[tokio::test]
    async fn test_other_host_line_is_not_used() {
        let identity = IdentityResolver::new(
            NoDns,
            CannedTable {
                output: "192.168.1.5  ether  0a:1b:2c:3d:4e:5f  C  eth0\n\
                         192.168.1.6  (incomplete)  eth0\n",
                pattern: MacPattern::colon_only(),
            },
        );

        let resolved = identity.resolve(Ipv4Addr::new(192, 168, 1, 6)).await;
        assert_eq!(resolved.mac_address, UNKNOWN);
    }
}
