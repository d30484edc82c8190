//! Outbound-interface address discovery.

use std::net::{IpAddr, SocketAddr};

use tokio::net::UdpSocket;

use crate::error::{Error, Result};
use crate::ports::LocalAddressPort;

/// Well-known external endpoint used only to select a route.
pub const DEFAULT_ROUTE_PROBE: &str = "8.8.8.8:80";

/// Finds the local address by "connecting" a UDP socket.
///
/// UDP connect sends nothing; it only asks the routing table which local
/// address would be used toward `route_probe`.
pub struct UdpLocalAddress {
    route_probe: String,
}

impl UdpLocalAddress {
    pub fn new(route_probe: impl Into<String>) -> Self {
        Self {
            route_probe: route_probe.into(),
        }
    }

    pub fn route_probe(&self) -> &str {
        &self.route_probe
    }
}

impl Default for UdpLocalAddress {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_PROBE)
    }
}

impl LocalAddressPort for UdpLocalAddress {
    async fn local_address(&self) -> Result<IpAddr> {
        let target: SocketAddr = self.route_probe.parse().map_err(|_| {
            Error::Config(format!("Invalid route probe address: {}", self.route_probe))
        })?;

        let bind_addr: SocketAddr = if target.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| Error::SubnetUnavailable(format!("Failed to open socket: {}", e)))?;

        socket
            .connect(target)
            .await
            .map_err(|e| Error::SubnetUnavailable(format!("No route to {}: {}", target, e)))?;

        let local = socket
            .local_addr()
            .map_err(|e| Error::SubnetUnavailable(format!("Failed to read local address: {}", e)))?;

        if local.ip().is_unspecified() {
            return Err(Error::SubnetUnavailable(
                "OS did not bind a local address".to_string(),
            ));
        }

        Ok(local.ip())
    }
}
