//! Neighbor (ARP) table lookups through the system `arp` tool.

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
use unix as platform;

#[cfg(windows)]
use windows as platform;

use std::net::Ipv4Addr;
use std::time::Duration;

use tracing::{trace, warn};

use super::command::SystemCommand;
use crate::domain::MacPattern;
use crate::error::Error;
use crate::ports::NeighborTablePort;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Reads MAC addresses out of the OS neighbor table.
pub struct NeighborTable {
    pattern: MacPattern,
    timeout: Duration,
}

impl NeighborTable {
    /// Create a reader using the platform's default MAC pattern.
    pub fn new() -> Self {
        Self::with_pattern(MacPattern::platform_default())
    }

    /// Create a reader with a custom MAC pattern.
    pub fn with_pattern(pattern: MacPattern) -> Self {
        Self {
            pattern,
            timeout: LOOKUP_TIMEOUT,
        }
    }

    pub fn pattern(&self) -> &MacPattern {
        &self.pattern
    }

    /// Commands tried in order for `address`.
    pub fn commands_for(&self, address: Ipv4Addr) -> Vec<SystemCommand> {
        platform::neighbor_commands(address)
    }
}

impl Default for NeighborTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborTablePort for NeighborTable {
    async fn mac_address(&self, address: Ipv4Addr) -> Option<String> {
        for command in self.commands_for(address) {
            let output = match command.stdout(self.timeout).await {
                Ok(output) => output,
                Err(Error::ResourceExhausted(reason)) => {
                    warn!(%address, %reason, "neighbor lookup could not start");
                    continue;
                }
                Err(e) => {
                    trace!(%address, error = %e, "neighbor lookup failed");
                    continue;
                }
            };

            if let Some(mac) = self.pattern.find_for(&output, address) {
                return Some(mac);
            }
        }
        None
    }
}
