//! The /24 subnet enumerated by a scan.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of candidate hosts in a /24 (`.1` through `.254`).
pub const HOST_COUNT: usize = 254;

/// A /24 network derived from the scanning host's own address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subnet {
    /// The scanning host's address.
    pub local: Ipv4Addr,
    /// The network address (`a.b.c.0`).
    pub network: Ipv4Addr,
}

impl Subnet {
    /// Derive the /24 from the local address.
    ///
    /// Only IPv4 addresses are accepted.
    pub fn from_local(addr: IpAddr) -> Result<Self> {
        match addr {
            IpAddr::V4(v4) => Ok(Self::from_ipv4(v4)),
            IpAddr::V6(v6) => Err(Error::InvalidLocalAddress(format!(
                "{} is not an IPv4 address",
                v6
            ))),
        }
    }

    /// Parse a textual local address and derive its /24.
    pub fn parse(addr: &str) -> Result<Self> {
        let ip: IpAddr = addr
            .trim()
            .parse()
            .map_err(|_| Error::InvalidLocalAddress(format!("'{}' is not an IP address", addr)))?;
        Self::from_local(ip)
    }

    fn from_ipv4(local: Ipv4Addr) -> Self {
        let [a, b, c, _] = local.octets();
        Self {
            local,
            network: Ipv4Addr::new(a, b, c, 0),
        }
    }

    /// The first three octets followed by a dot, e.g. `"192.168.1."`.
    pub fn base(&self) -> String {
        let [a, b, c, _] = self.network.octets();
        format!("{}.{}.{}.", a, b, c)
    }

    /// Candidate addresses `.1` through `.254` in ascending order.
    pub fn targets(&self) -> impl Iterator<Item = Ipv4Addr> {
        let [a, b, c, _] = self.network.octets();
        (1..=HOST_COUNT as u8).map(move |host| Ipv4Addr::new(a, b, c, host))
    }

    /// Whether `addr` is one of this subnet's candidate targets.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let [a, b, c, d] = addr.octets();
        let [na, nb, nc, _] = self.network.octets();
        (a, b, c) == (na, nb, nc) && d != 0 && d != 255
    }
}

impl std::fmt::Display for Subnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/24", self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_from_local() {
        let subnet = Subnet::parse("192.168.1.42").unwrap();
        assert_eq!(subnet.base(), "192.168.1.");
        assert_eq!(subnet.network, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(subnet.local, Ipv4Addr::new(192, 168, 1, 42));
        assert_eq!(subnet.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn test_targets_exclude_network_and_broadcast() {
        let subnet = Subnet::parse("10.0.5.7").unwrap();
        let targets: Vec<Ipv4Addr> = subnet.targets().collect();

        assert_eq!(targets.len(), HOST_COUNT);
        assert_eq!(targets[0], Ipv4Addr::new(10, 0, 5, 1));
        assert_eq!(targets[HOST_COUNT - 1], Ipv4Addr::new(10, 0, 5, 254));
        assert!(!targets.contains(&Ipv4Addr::new(10, 0, 5, 0)));
        assert!(!targets.contains(&Ipv4Addr::new(10, 0, 5, 255)));
    }

    #[test]
    fn test_contains() {
        let subnet = Subnet::parse("10.0.5.7").unwrap();
        assert!(subnet.contains(Ipv4Addr::new(10, 0, 5, 200)));
        assert!(!subnet.contains(Ipv4Addr::new(10, 0, 6, 200)));
        assert!(!subnet.contains(Ipv4Addr::new(10, 0, 5, 255)));
    }

    #[test]
    fn test_rejects_ipv6_and_garbage() {
        assert!(matches!(
            Subnet::parse("fe80::1"),
            Err(Error::InvalidLocalAddress(_))
        ));
        assert!(matches!(
            Subnet::parse(""),
            Err(Error::InvalidLocalAddress(_))
        ));
    }
}
