//! `ping` flags for Linux, the BSDs and macOS.

use std::net::Ipv4Addr;
use std::time::Duration;

use crate::adapters::command::SystemCommand;

/// One echo request, numeric output, reply wait bounded by `timeout`.
///
/// macOS takes `-W` in milliseconds; Linux and the BSDs take whole seconds.
pub fn ping_command(address: Ipv4Addr, timeout: Duration) -> SystemCommand {
    let wait = if cfg!(target_os = "macos") {
        timeout.as_millis().max(1).to_string()
    } else {
        whole_seconds(timeout).to_string()
    };

    let target = address.to_string();
    SystemCommand::new("ping", ["-n", "-c", "1", "-W", wait.as_str(), target.as_str()])
}

fn whole_seconds(timeout: Duration) -> u64 {
    let secs = timeout.as_secs();
    if timeout.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}
