//! Identity lookup ports (interfaces).

use std::net::Ipv4Addr;

/// Port for reverse-DNS lookups.
pub trait HostnameResolverPort: Send + Sync {
    /// Hostname for `address`, or `None` when the lookup fails.
    fn hostname(
        &self,
        address: Ipv4Addr,
    ) -> impl std::future::Future<Output = Option<String>> + Send;
}

/// Port for the OS neighbor (ARP) table.
///
/// The table is filled asynchronously by the network stack, so a miss right
/// after a liveness probe is normal.
pub trait NeighborTablePort: Send + Sync {
    /// MAC address for `address`, or `None` when absent.
    fn mac_address(
        &self,
        address: Ipv4Addr,
    ) -> impl std::future::Future<Output = Option<String>> + Send;
}
