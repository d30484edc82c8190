//! Neighbor table command for Windows.

use std::net::Ipv4Addr;

use crate::adapters::command::SystemCommand;

pub fn neighbor_commands(address: Ipv4Addr) -> Vec<SystemCommand> {
    let target = address.to_string();
    vec![SystemCommand::new("arp", ["-a", target.as_str()])]
}
