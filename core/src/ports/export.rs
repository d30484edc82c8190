//! Result export port (interface).

use std::path::Path;

use crate::domain::ScanResult;
use crate::error::Result;

/// Port for writing a finished result collection to a file.
pub trait ResultExporterPort: Send + Sync {
    /// Write `results` to `path`.
    fn export(&self, results: &[ScanResult], path: &Path) -> Result<()>;
}
