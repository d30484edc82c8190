//! Scan configuration and its on-disk store.
//!
//! Stores configuration in JSON format at `~/.lanscan/config.json`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::adapters::{local::DEFAULT_ROUTE_PROBE, DEFAULT_EXPORT_FILE};
use crate::domain::MacPattern;
use crate::error::{Error, Result};

/// Tunables for a scan, stored as camelCase JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    /// How long `ping` waits for the echo reply.
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout_ms: u64,

    /// TCP connect timeout per port.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Reverse-DNS lookup timeout.
    #[serde(default = "default_dns_timeout")]
    pub dns_timeout_ms: u64,

    /// Maximum hosts probed at once; `None` probes the whole subnet together.
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// External endpoint used to pick the outbound interface.
    #[serde(default = "default_route_probe")]
    pub route_probe_address: String,

    /// Regex overriding the platform's MAC pattern.
    #[serde(default)]
    pub mac_pattern: Option<String>,

    /// Where exports are written.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
}

fn default_ping_timeout() -> u64 {
    1000
}

fn default_connect_timeout() -> u64 {
    300
}

fn default_dns_timeout() -> u64 {
    2000
}

fn default_route_probe() -> String {
    DEFAULT_ROUTE_PROBE.to_string()
}

fn default_export_path() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_FILE)
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ping_timeout_ms: default_ping_timeout(),
            connect_timeout_ms: default_connect_timeout(),
            dns_timeout_ms: default_dns_timeout(),
            max_concurrency: None,
            route_probe_address: default_route_probe(),
            mac_pattern: None,
            export_path: default_export_path(),
        }
    }
}

impl ScanConfig {
    /// Keys accepted by [`ScanConfig::set_value`].
    pub const KEYS: [&'static str; 7] = [
        "pingTimeoutMs",
        "connectTimeoutMs",
        "dnsTimeoutMs",
        "maxConcurrency",
        "routeProbeAddress",
        "macPattern",
        "exportPath",
    ];

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    /// The configured MAC pattern, or the platform default.
    pub fn mac_pattern(&self) -> Result<MacPattern> {
        match &self.mac_pattern {
            Some(pattern) => MacPattern::custom(pattern),
            None => Ok(MacPattern::platform_default()),
        }
    }

    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("pingTimeoutMs", self.ping_timeout_ms),
            ("connectTimeoutMs", self.connect_timeout_ms),
            ("dnsTimeoutMs", self.dns_timeout_ms),
        ] {
            if value == 0 {
                return Err(Error::Config(format!("{} must be greater than 0", name)));
            }
        }

        if self.max_concurrency == Some(0) {
            return Err(Error::Config(
                "maxConcurrency must be greater than 0".to_string(),
            ));
        }

        self.route_probe_address
            .parse::<SocketAddr>()
            .map_err(|_| {
                Error::Config(format!(
                    "routeProbeAddress '{}' is not an ip:port pair",
                    self.route_probe_address
                ))
            })?;

        self.mac_pattern()?;
        Ok(())
    }

    /// Set a field from its JSON key and a textual value.
    ///
    /// `none` clears the optional fields. On error `self` is unchanged.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        next.apply(key, value.trim())?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let clear = value.eq_ignore_ascii_case("none");

        match key {
            "pingTimeoutMs" => self.ping_timeout_ms = parse_number(key, value)?,
            "connectTimeoutMs" => self.connect_timeout_ms = parse_number(key, value)?,
            "dnsTimeoutMs" => self.dns_timeout_ms = parse_number(key, value)?,
            "maxConcurrency" => {
                self.max_concurrency = if clear {
                    None
                } else {
                    Some(parse_number(key, value)?)
                }
            }
            "routeProbeAddress" => self.route_probe_address = value.to_string(),
            "macPattern" => {
                self.mac_pattern = if clear { None } else { Some(value.to_string()) }
            }
            "exportPath" => self.export_path = PathBuf::from(value),
            _ => {
                return Err(Error::Config(format!(
                    "Unknown key '{}' (expected one of: {})",
                    key,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("{} expects a number, got '{}'", key, value)))
}

/// Configuration store for scan settings.
///
/// Handles reading and writing configuration to `~/.lanscan/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.lanscan/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".lanscan").join("config.json");

        Ok(Self { config_path })
    }

    /// Create a config store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<ScanConfig> {
        if !self.config_path.exists() {
            return Ok(ScanConfig::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &ScanConfig) -> Result<()> {
        let config_dir = self.config_dir();
        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }

    /// Set one key and persist the result.
    pub async fn set_value(&self, key: &str, value: &str) -> Result<ScanConfig> {
        let mut config = self.load().await?;
        config.set_value(key, value)?;
        self.save(&config).await?;
        Ok(config)
    }

    /// Overwrite the stored file with defaults.
    pub async fn reset(&self) -> Result<ScanConfig> {
        let config = ScanConfig::default();
        self.save(&config).await?;
        Ok(config)
    }
}
