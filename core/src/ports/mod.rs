//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the capabilities the application layer uses to
//! touch the network and the host OS. Implementations live in `adapters`;
//! tests substitute fakes.

mod export;
mod identity;
mod local;
mod probe;

pub use export::ResultExporterPort;
pub use identity::{HostnameResolverPort, NeighborTablePort};
pub use local::LocalAddressPort;
pub use probe::{LivenessProbePort, PortScannerPort};
