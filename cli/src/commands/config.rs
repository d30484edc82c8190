//! Config command - show and edit `~/.lanscan/config.json`.

use anyhow::Result;
use lanscan_core::{ConfigStore, ScanConfig};

pub async fn show(json: bool) -> Result<()> {
    let store = ConfigStore::new()?;
    let config = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file: {}", store.path().display());
    println!();
    print_config(&config);
    Ok(())
}

pub async fn set(key: &str, value: &str) -> Result<()> {
    let store = ConfigStore::new()?;
    store.set_value(key, value).await?;
    println!("Set {} = {}", key, value);
    Ok(())
}

pub async fn reset() -> Result<()> {
    let store = ConfigStore::new()?;
    store.reset().await?;
    println!("Configuration reset to defaults.");
    Ok(())
}

fn print_config(config: &ScanConfig) {
    let optional = |value: Option<String>| value.unwrap_or_else(|| "none".to_string());

    println!("  pingTimeoutMs:     {}", config.ping_timeout_ms);
    println!("  connectTimeoutMs:  {}", config.connect_timeout_ms);
    println!("  dnsTimeoutMs:      {}", config.dns_timeout_ms);
    println!(
        "  maxConcurrency:    {}",
        optional(config.max_concurrency.map(|n| n.to_string()))
    );
    println!("  routeProbeAddress: {}", config.route_probe_address);
    println!("  macPattern:        {}", optional(config.mac_pattern.clone()));
    println!("  exportPath:        {}", config.export_path.display());
}
