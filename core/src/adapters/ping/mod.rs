//! ICMP liveness probe using the system `ping` tool.
//!
//! Platform-specific flags live in the submodules; the probe itself is a
//! single attempt bounded by the configured timeout.

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
use super::limits::{EXHAUSTION_BACKOFF, EXHAUSTION_RETRIES};
use crate::error::Error;
use crate::ports::LivenessProbePort;

/// Extra time granted to the `ping` process beyond its own reply timeout.
const PROCESS_SLACK: Duration = Duration::from_millis(1500);

/// Liveness probe backed by one `ping` echo request.
pub struct PingProbe {
    timeout: Duration,
}

impl PingProbe {
    /// Create a probe that waits up to `timeout` for the echo reply.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// The `ping` invocation used for `address`.
    pub fn command_for(&self, address: Ipv4Addr) -> SystemCommand {
        platform::ping_command(address, self.timeout)
    }
}

impl Default for PingProbe {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl LivenessProbePort for PingProbe {
    /// A `ping` that cannot be spawned for lack of descriptors is retried
    /// rather than reported as a dead host.
    async fn is_alive(&self, address: Ipv4Addr) -> bool {
        let command = self.command_for(address);
        for attempt in 1..=EXHAUSTION_RETRIES {
            match command.succeeds(self.timeout + PROCESS_SLACK).await {
                Ok(alive) => return alive,
                Err(Error::ResourceExhausted(reason)) => {
                    warn!(%address, attempt, %reason, "ping could not start");
                    tokio::time::sleep(EXHAUSTION_BACKOFF).await;
                }
                Err(e) => {
                    trace!(%address, error = %e, "ping probe failed");
                    return false;
                }
            }
        }
        false
    }
}
