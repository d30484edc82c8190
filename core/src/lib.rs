//! LanScan Core Library
//!
//! Cross-platform library for discovering devices on the local /24 network.
//! Provides functionality to:
//! - Detect the local subnet from the outbound interface
//! - Ping every host address concurrently
//! - Resolve hostnames (reverse DNS) and MAC addresses (neighbor table)
//! - Probe a fixed list of common TCP ports on each live host
//! - Export the results to CSV
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: Network and OS tool implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - macOS: Uses `ping -W <ms>` and `arp -n`
//! - Linux: Uses `ping -W <s>`, `arp -n`, then `ip neigh`
//! - Windows: Uses `ping -w <ms>` and `arp -a`

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod engine;
pub mod error;

// Re-export domain types (primary API)
pub use domain::{
    service_name, HostIdentity, MacPattern, ScanProgress, ScanReport, ScanResult, ScanState,
    Subnet, COMMON_PORTS, HOST_COUNT, UNKNOWN,
};

// Re-export other commonly used types
pub use adapters::limits::raise_open_file_limit;
pub use adapters::{CsvExporter, DEFAULT_EXPORT_FILE};
pub use application::{HostInspector, IdentityResolver, ScanService};
pub use config::{ConfigStore, ScanConfig};
pub use engine::{ScanEngine, SystemScanService};
pub use error::{Error, Result};
