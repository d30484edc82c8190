//! Host and port probe ports (interfaces).

use std::net::Ipv4Addr;

/// Port for the single-shot reachability check.
///
/// Implementations must use an ICMP-level probe, never a TCP connect, so a
/// host without open ports is still reported alive.
pub trait LivenessProbePort: Send + Sync {
    /// Whether `address` answered within the probe timeout.
    fn is_alive(&self, address: Ipv4Addr) -> impl std::future::Future<Output = bool> + Send;
}

/// Port for TCP reachability of the candidate service ports.
pub trait PortScannerPort: Send + Sync {
    /// Ports that accepted a connection, in completion order.
    fn scan(&self, address: Ipv4Addr) -> impl std::future::Future<Output = Vec<u16>> + Send;
}
