//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with the network or a host OS tool.

pub mod command;
pub mod dns;
pub mod export;
pub mod limits;
pub mod local;
pub mod neighbor;
pub mod ping;
pub mod tcp;

// Re-export main types for convenience
pub use dns::SystemResolver;
pub use export::{CsvExporter, DEFAULT_EXPORT_FILE};
pub use local::UdpLocalAddress;
pub use neighbor::NeighborTable;
pub use ping::PingProbe;
pub use tcp::TcpConnectScanner;
