//! Domain layer - Pure scan data models.
//!
//! This module contains domain entities that represent core scanning concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod mac;
mod progress;
mod result;
mod service;
mod state;
mod subnet;

// Re-export all domain types
pub use mac::MacPattern;
pub use progress::ScanProgress;
pub use result::{HostIdentity, ScanReport, ScanResult, UNKNOWN};
pub use service::{service_name, COMMON_PORTS};
pub use state::ScanState;
pub use subnet::{Subnet, HOST_COUNT};
