//! Well-known TCP service ports.

/// Candidate ports probed on every live host.
pub const COMMON_PORTS: [u16; 21] = [
    20, 21, 22, 23, 25, 53, 80, 110, 111, 135, 139, 143, 443, 445, 993, 995, 1723, 3306, 3389,
    5900, 8080,
];

/// Conventional service name for a candidate port.
pub fn service_name(port: u16) -> Option<&'static str> {
    let name = match port {
        20 => "ftp-data",
        21 => "ftp",
        22 => "ssh",
        23 => "telnet",
        25 => "smtp",
        53 => "dns",
        80 => "http",
        110 => "pop3",
        111 => "rpcbind",
        135 => "msrpc",
        139 => "netbios-ssn",
        143 => "imap",
        443 => "https",
        445 => "microsoft-ds",
        993 => "imaps",
        995 => "pop3s",
        1723 => "pptp",
        3306 => "mysql",
        3389 => "rdp",
        5900 => "vnc",
        8080 => "http-alt",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_candidate_port_has_a_name() {
        for port in COMMON_PORTS {
            assert!(service_name(port).is_some(), "missing name for {}", port);
        }
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(service_name(31337), None);
    }
}
