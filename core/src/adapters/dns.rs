//! Reverse DNS lookups through the system resolver.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use dns_lookup::lookup_addr;
use tracing::{trace, warn};

use crate::ports::HostnameResolverPort;

/// Resolves hostnames with `getnameinfo` on a blocking worker.
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

/// Blocking reverse lookup for a single address.
///
/// A name equal to the textual address means the resolver had no PTR record.
pub fn reverse_lookup(address: Ipv4Addr) -> Option<String> {
    let name = lookup_addr(&IpAddr::V4(address)).ok()?;
    normalize_hostname(&name, address)
}

fn normalize_hostname(name: &str, address: Ipv4Addr) -> Option<String> {
    let name = name.trim().trim_end_matches('.');
    if name.is_empty() || name == address.to_string() {
        None
    } else {
        Some(name.to_string())
    }
}

impl HostnameResolverPort for SystemResolver {
    async fn hostname(&self, address: Ipv4Addr) -> Option<String> {
        let lookup = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || reverse_lookup(address)),
        )
        .await;

        match lookup {
            Ok(Ok(name)) => name,
            Ok(Err(e)) => {
                warn!(%address, error = %e, "DNS worker join failed");
                None
            }
            Err(_) => {
                trace!(%address, "reverse lookup timed out");
                None
            }
        }
    }
}
