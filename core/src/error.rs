//! Error types for the lanscan-core library.

use thiserror::Error;

/// Result type alias for lanscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the scan engine.
///
/// Per-host and per-port probe failures never appear here; they are folded
/// into the result set as omissions or sentinel values.
#[derive(Error, Debug)]
pub enum Error {
    /// The local subnet could not be determined (no route, socket failure).
    #[error("Could not determine local subnet: {0}")]
    SubnetUnavailable(String),

    /// The local address is not a usable IPv4 address.
    #[error("Invalid local address: {0}")]
    InvalidLocalAddress(String),

    /// A scan is already running on this service.
    #[error("A scan is already in progress")]
    ScanInProgress,

    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// The process ran out of file descriptors.
    #[error("Out of file descriptors: {0}")]
    ResourceExhausted(String),

    /// Failed to parse input (patterns, command output, addresses).
    #[error("Failed to parse: {0}")]
    ParseError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error aborts a scan before any host is probed.
    pub fn is_fatal_scan_error(&self) -> bool {
        matches!(
            self,
            Error::SubnetUnavailable(_) | Error::InvalidLocalAddress(_)
        )
    }
}
