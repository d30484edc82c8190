//! Neighbor table commands for Linux, the BSDs and macOS.

use std::net::Ipv4Addr;

use crate::adapters::command::SystemCommand;

/// `arp -n <ip>`; on Linux `ip neigh` covers hosts without net-tools.
pub fn neighbor_commands(address: Ipv4Addr) -> Vec<SystemCommand> {
    let target = address.to_string();
    let mut commands = vec![SystemCommand::new("arp", ["-n", target.as_str()])];

    if cfg!(target_os = "linux") {
        commands.push(SystemCommand::new("ip", ["neigh", "show", target.as_str()]));
    }

    commands
}
