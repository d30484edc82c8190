//! `ping` flags for Windows.

use std::net::Ipv4Addr;
use std::time::Duration;

use crate::adapters::command::SystemCommand;

/// One echo request with a reply wait in milliseconds.
pub fn ping_command(address: Ipv4Addr, timeout: Duration) -> SystemCommand {
    let wait = timeout.as_millis().max(1).to_string();
    let target = address.to_string();
    SystemCommand::new("ping", ["-n", "1", "-w", wait.as_str(), target.as_str()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_flags() {
        let cmd = ping_command(Ipv4Addr::new(10, 0, 0, 9), Duration::from_millis(500));
        assert_eq!(cmd.args, vec!["-n", "1", "-w", "500", "10.0.0.9"]);
    }
}
