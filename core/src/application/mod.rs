//! Application layer - Use case services.
//!
//! This module contains application services that orchestrate
//! domain logic and adapter interactions.
//!
//! Services are designed to be thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for network and OS access
//! - Return domain types as outputs

mod identity;
mod scan_service;

pub use identity::IdentityResolver;
pub use scan_service::{HostInspector, ScanService};
