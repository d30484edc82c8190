//! Scan result domain models.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Subnet;

/// Placeholder for an identity field that could not be resolved.
pub const UNKNOWN: &str = "unknown";

// ============================================================================
// HostIdentity
// ============================================================================

/// Hostname and link-layer address of a live host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostIdentity {
    /// Reverse-DNS name, or [`UNKNOWN`].
    pub hostname: String,
    /// MAC address token, or [`UNKNOWN`].
    pub mac_address: String,
}

impl HostIdentity {
    /// Build an identity, substituting the sentinel for missing fields.
    pub fn new(hostname: Option<String>, mac_address: Option<String>) -> Self {
        Self {
            hostname: hostname.unwrap_or_else(|| UNKNOWN.to_string()),
            mac_address: mac_address.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }

    /// An identity with both fields unresolved.
    pub fn unknown() -> Self {
        Self::new(None, None)
    }
}

// ============================================================================
// ScanResult
// ============================================================================

/// One discovered host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// IPv4 address of the host.
    pub address: Ipv4Addr,
    /// Resolved MAC address, or [`UNKNOWN`].
    pub mac_address: String,
    /// Resolved hostname, or [`UNKNOWN`].
    pub hostname: String,
    /// Ports that accepted a connection, in completion order.
    pub open_ports: Vec<u16>,
    /// Always true for hosts in a result collection.
    pub alive: bool,
}

impl ScanResult {
    /// Create a result for a host that answered the liveness probe.
    pub fn alive(address: Ipv4Addr, identity: HostIdentity, open_ports: Vec<u16>) -> Self {
        Self {
            address,
            mac_address: identity.mac_address,
            hostname: identity.hostname,
            open_ports,
            alive: true,
        }
    }

    /// Open ports joined for display and export (e.g. `"22, 80"`).
    pub fn ports_joined(&self) -> String {
        self.open_ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether the hostname was resolved.
    pub fn has_hostname(&self) -> bool {
        self.hostname != UNKNOWN
    }

    /// Whether the MAC address was resolved.
    pub fn has_mac_address(&self) -> bool {
        self.mac_address != UNKNOWN
    }
}

impl std::fmt::Display for ScanResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.address, self.hostname, self.mac_address)?;
        if !self.open_ports.is_empty() {
            write!(f, " ports: {}", self.ports_joined())?;
        }
        Ok(())
    }
}

// ============================================================================
// ScanReport
// ============================================================================

/// Output of one completed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// Unique identifier for this scan.
    pub id: Uuid,
    /// The /24 that was enumerated.
    pub subnet: Subnet,
    /// Discovered hosts in completion order.
    pub results: Vec<ScanResult>,
    /// Wall-clock duration of the scan.
    pub elapsed_ms: u64,
}

impl ScanReport {
    /// Number of discovered hosts.
    pub fn device_count(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_sentinels() {
        let identity = HostIdentity::unknown();
        assert_eq!(identity.hostname, UNKNOWN);
        assert_eq!(identity.mac_address, UNKNOWN);

        let identity = HostIdentity::new(Some("nas.lan".into()), None);
        assert_eq!(identity.hostname, "nas.lan");
        assert_eq!(identity.mac_address, UNKNOWN);
    }

    #[test]
    fn test_json_field_names_are_camel_case() {
        let identity = HostIdentity::new(None, Some("0A:1B:2C:3D:4E:5F".into()));
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["macAddress"], "0A:1B:2C:3D:4E:5F");
        assert!(json.get("mac_address").is_none());

        let result = ScanResult::alive(Ipv4Addr::new(10, 0, 0, 5), identity, vec![22]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["macAddress"], "0A:1B:2C:3D:4E:5F");
        assert_eq!(json["openPorts"], serde_json::json!([22]));
    }

    #[test]
    fn test_ports_joined_keeps_completion_order() {
        let result = ScanResult::alive(
            Ipv4Addr::new(192, 168, 1, 5),
            HostIdentity::unknown(),
            vec![443, 22, 80],
        );
        assert_eq!(result.ports_joined(), "443, 22, 80");
        assert!(result.alive);
        assert!(!result.has_hostname());
    }

    #[test]
    fn test_ports_joined_empty() {
        let result = ScanResult::alive(
            Ipv4Addr::new(192, 168, 1, 5),
            HostIdentity::unknown(),
            Vec::new(),
        );
        assert_eq!(result.ports_joined(), "");
    }

    #[test]
    fn test_display() {
        let result = ScanResult::alive(
            Ipv4Addr::new(10, 0, 0, 2),
            HostIdentity::new(Some("printer".into()), Some("0A:1B:2C:3D:4E:5F".into())),
            vec![80],
        );
        assert_eq!(
            result.to_string(),
            "10.0.0.2 (printer, 0A:1B:2C:3D:4E:5F) ports: 80"
        );
    }
}
