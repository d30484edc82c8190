//! CSV export of a finished result collection.
//!
//! Exports scan results to a spreadsheet-compatible file.

use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::domain::ScanResult;
use crate::error::Result;
use crate::ports::ResultExporterPort;

/// File written when no explicit path is configured.
pub const DEFAULT_EXPORT_FILE: &str = "network_scan_results.csv";

/// Column headers, in output order.
pub const HEADERS: [&str; 4] = ["IP Address", "MAC Address", "Hostname", "Open Ports"];

/// CSV exporter for scan results.
pub struct CsvExporter {
    /// Delimiter byte
    delimiter: u8,
}

impl CsvExporter {
    /// Create a new CSV exporter.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the delimiter byte (e.g. `b';'` for spreadsheet locales using decimal commas).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write the header row and one row per result to `writer`.
    pub fn write_to<W: Write>(&self, results: &[ScanResult], writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);
        write_rows(&mut csv, results)?;
        csv.flush()?;
        Ok(())
    }

    /// Render the export as a string.
    pub fn render(&self, results: &[ScanResult]) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(results, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_rows<W: Write>(csv: &mut Writer<W>, results: &[ScanResult]) -> Result<()> {
    csv.write_record(HEADERS)?;
    for result in results {
        let address = result.address.to_string();
        let ports = result.ports_joined();
        csv.write_record([
            address.as_str(),
            result.mac_address.as_str(),
            result.hostname.as_str(),
            ports.as_str(),
        ])?;
    }
    Ok(())
}

impl ResultExporterPort for CsvExporter {
    fn export(&self, results: &[ScanResult], path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(results, file)?;
        info!(path = %path.display(), rows = results.len(), "exported scan results");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HostIdentity;
    use std::net::Ipv4Addr;
    use tempfile::tempdir;

    fn sample() -> Vec<ScanResult> {
        vec![
            ScanResult::alive(
                Ipv4Addr::new(192, 168, 1, 1),
                HostIdentity::new(Some("router".into()), Some("A4:91:B1:0C:22:10".into())),
                vec![443, 80, 53],
            ),
            ScanResult::alive(
                Ipv4Addr::new(192, 168, 1, 7),
                HostIdentity::unknown(),
                Vec::new(),
            ),
        ]
    }

    #[test]
    fn test_export_row_count_and_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let results = sample();

        CsvExporter::new().export(&results, &path).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), results.len() + 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), HEADERS.to_vec());
        assert_eq!(&rows[1][0], "192.168.1.1");
        assert_eq!(&rows[1][1], "A4:91:B1:0C:22:10");
        assert_eq!(&rows[1][2], "router");
        assert_eq!(&rows[1][3], "443, 80, 53");
        assert_eq!(&rows[2][2], "unknown");
        assert_eq!(&rows[2][3], "");
    }

    #[test]
    fn test_empty_collection_is_header_only() {
        let rendered = CsvExporter::new().render(&[]).unwrap();
        assert_eq!(rendered, "IP Address,MAC Address,Hostname,Open Ports\n");
    }

    #[test]
    fn test_custom_delimiter() {
        let rendered = CsvExporter::new()
            .with_delimiter(b';')
            .render(&sample()[1..])
            .unwrap();
        assert!(rendered.contains("192.168.1.7;unknown;unknown;"));
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        assert!(CsvExporter::new().export(&sample(), &path).is_err());
    }
}
