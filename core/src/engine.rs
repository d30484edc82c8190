//! LanScan Engine - Composition root for system scans.
//!
//! Wires the OS and network adapters into a [`ScanService`] according to a
//! [`ScanConfig`], and adds export on top. Front ends (the CLI, a GUI) only
//! talk to this type.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::{
    CsvExporter, NeighborTable, PingProbe, SystemResolver, TcpConnectScanner, UdpLocalAddress,
};
use crate::application::{HostInspector, IdentityResolver, ScanService};
use crate::config::ScanConfig;
use crate::domain::{ScanProgress, ScanReport, ScanResult, ScanState, Subnet};
use crate::error::{Error, Result};
use crate::ports::ResultExporterPort;

/// Scan service backed by the real network and OS tools.
pub type SystemScanService =
    ScanService<UdpLocalAddress, PingProbe, SystemResolver, NeighborTable, TcpConnectScanner>;

/// The main LanScan engine.
///
/// # Usage Pattern
/// Call `run_scan()` and await it. While it runs, poll `progress()` and
/// `device_count()` from another task; after it returns, read `results()`
/// or `export()` them.
pub struct ScanEngine {
    service: SystemScanService,
    exporter: CsvExporter,
    config: ScanConfig,
}

impl ScanEngine {
    /// Create a new engine from a validated configuration.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;

        let inspector = HostInspector::new(
            PingProbe::new(config.ping_timeout()),
            IdentityResolver::new(
                SystemResolver::new(config.dns_timeout()),
                NeighborTable::with_pattern(config.mac_pattern()?),
            ),
            TcpConnectScanner::new(config.connect_timeout()),
        );

        let service = ScanService::new(
            UdpLocalAddress::new(config.route_probe_address.clone()),
            inspector,
        )
        .with_max_concurrency(config.max_concurrency);

        Ok(Self {
            service,
            exporter: CsvExporter::new(),
            config,
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    // MARK: - Scanning

    /// Determine the local /24 without scanning it.
    pub async fn detect_subnet(&self) -> Result<Subnet> {
        self.service.detect_subnet().await
    }

    /// Run one scan over the local subnet.
    pub async fn run_scan(&self) -> Result<ScanReport> {
        self.service.run().await
    }

    // MARK: - State Access

    pub fn state(&self) -> ScanState {
        self.service.state()
    }

    pub fn progress(&self) -> Arc<ScanProgress> {
        self.service.progress()
    }

    /// Results of the last scan (partial while one is running).
    pub fn results(&self) -> Vec<ScanResult> {
        self.service.results()
    }

    pub fn device_count(&self) -> usize {
        self.service.device_count()
    }

    // MARK: - Export

    /// Export the last scan's results to `path`, or the configured export path.
    ///
    /// Refused while a scan is running.
    pub fn export(&self, path: Option<&Path>) -> Result<PathBuf> {
        if self.service.is_running() {
            return Err(Error::ScanInProgress);
        }

        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.export_path.clone());

        self.exporter.export(&self.service.results(), &path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_engine_creation() {
        let engine = ScanEngine::new(ScanConfig::default());
        assert!(engine.is_ok());
    }

    #[test]
    fn test_initial_state() {
        let engine = ScanEngine::new(ScanConfig::default()).unwrap();
        assert_eq!(engine.state(), ScanState::Idle);
        assert!(engine.results().is_empty());
        assert_eq!(engine.progress().fraction(), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScanConfig {
            mac_pattern: Some("([".to_string()),
            ..Default::default()
        };
        assert!(matches!(ScanEngine::new(config), Err(Error::ParseError(_))));

        let config = ScanConfig {
            max_concurrency: Some(0),
            ..Default::default()
        };
        assert!(matches!(ScanEngine::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_export_before_scan_writes_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let engine = ScanEngine::new(ScanConfig::default()).unwrap();

        let written = engine.export(Some(&path)).unwrap();
        assert_eq!(written, path);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_loopback_subnet() {
        let config = ScanConfig {
            route_probe_address: "127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let engine = ScanEngine::new(config).unwrap();

        let subnet = tokio_test::block_on(engine.detect_subnet()).unwrap();
        assert_eq!(subnet.base(), "127.0.0.");
    }
}
