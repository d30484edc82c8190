//! Example: Scan the local subnet and display every live host.

use lanscan_core::{raise_open_file_limit, ScanConfig, ScanEngine};

#[tokio::main]
async fn main() {
    if let Err(e) = raise_open_file_limit() {
        eprintln!("Could not raise open file limit: {}", e);
    }

    let engine = match ScanEngine::new(ScanConfig::default()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    match engine.detect_subnet().await {
        Ok(subnet) => println!("Scanning {}...\n", subnet),
        Err(e) => {
            eprintln!("Error detecting subnet: {}", e);
            return;
        }
    }

    match engine.run_scan().await {
        Ok(report) => {
            if report.results.is_empty() {
                println!("No devices found.");
                return;
            }

            println!(
                "{:<16} {:<18} {:<30} {}",
                "IP", "MAC", "HOSTNAME", "PORTS"
            );
            println!("{}", "-".repeat(90));

            for result in &report.results {
                println!(
                    "{:<16} {:<18} {:<30} {}",
                    result.address,
                    result.mac_address,
                    result.hostname.chars().take(30).collect::<String>(),
                    result.ports_joined()
                );
            }

            println!(
                "\nTotal: {} devices ({} ms)",
                report.device_count(),
                report.elapsed_ms
            );
        }
        Err(e) => {
            eprintln!("Error scanning subnet: {}", e);
        }
    }
}
