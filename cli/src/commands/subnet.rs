//! Subnet command - show the network that would be scanned.

use anyhow::Result;
use lanscan_core::ScanEngine;

pub async fn run(json: bool) -> Result<()> {
    let engine = ScanEngine::new(super::load_config().await?)?;
    let subnet = engine.detect_subnet().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&subnet)?);
        return Ok(());
    }

    println!("Local address: {}", subnet.local);
    println!("Subnet:        {}", subnet);
    println!("Hosts:         {}1 - {}254", subnet.base(), subnet.base());
    Ok(())
}
