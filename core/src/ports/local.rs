//! Local address port (interface).

use std::net::IpAddr;

use crate::error::Result;

/// Port for discovering the scanning host's own address.
pub trait LocalAddressPort: Send + Sync {
    /// The address the OS would use for outbound traffic.
    ///
    /// Fails when no route exists or the socket cannot be created.
    fn local_address(&self) -> impl std::future::Future<Output = Result<IpAddr>> + Send;
}
