//! CLI command implementations.

pub mod config;
pub mod scan;
pub mod subnet;

use anyhow::{Context, Result};
use lanscan_core::{ConfigStore, ScanConfig};

/// Load the stored configuration, falling back to defaults when there is no home directory.
pub async fn load_config() -> Result<ScanConfig> {
    match ConfigStore::new() {
        Ok(store) => store
            .load()
            .await
            .with_context(|| format!("loading {}", store.path().display())),
        Err(e) => {
            tracing::warn!("using default configuration: {}", e);
            Ok(ScanConfig::default())
        }
    }
}
