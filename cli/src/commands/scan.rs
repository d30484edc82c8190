//! Scan command - sweep the local subnet and report live hosts.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use lanscan_core::{service_name, ScanEngine, ScanReport, ScanResult};

use crate::ScanArgs;

pub async fn run(args: ScanArgs, json: bool) -> Result<()> {
    let mut config = super::load_config().await?;
    if let Some(limit) = args.concurrency {
        config.max_concurrency = Some(limit);
    }

    let engine = Arc::new(ScanEngine::new(config).context("invalid scan configuration")?);

    let show_progress = !args.no_progress && !json && atty::is(atty::Stream::Stdout);
    let report = if show_progress {
        scan_with_progress(&engine).await?
    } else {
        engine.run_scan().await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = args.export {
        let written = engine.export(path.as_deref())?;
        if !json {
            println!("Results exported to {}", written.display());
        }
    }

    Ok(())
}

async fn scan_with_progress(engine: &Arc<ScanEngine>) -> Result<ScanReport> {
    let progress = engine.progress();
    let bar = ProgressBar::new(progress.total() as u64);
    bar.set_style(progress_style());
    bar.set_message("Scanning");

    let ticker = {
        let bar = bar.clone();
        let engine = Arc::clone(engine);
        let progress = Arc::clone(&progress);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(100));
            loop {
                interval.tick().await;
                bar.set_position(progress.completed() as u64);
                bar.set_message(format!("{} devices", engine.device_count()));
            }
        })
    };

    let outcome = engine.run_scan().await;
    ticker.abort();

    match &outcome {
        Ok(report) => {
            bar.set_position(progress.completed() as u64);
            bar.finish_with_message(format!("{} devices", report.device_count()));
        }
        Err(_) => bar.abandon_with_message("Scan failed"),
    }

    Ok(outcome?)
}

fn progress_style() -> ProgressStyle {
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}");

    match style {
        Ok(s) => s.progress_chars("#>-"),
        Err(_) => ProgressStyle::default_bar(),
    }
}

fn print_report(report: &ScanReport) {
    println!(
        "Scanned {} ({} hosts) at {}",
        report.subnet,
        lanscan_core::HOST_COUNT,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!();

    if report.results.is_empty() {
        println!("No devices found.");
        return;
    }

    let mut results: Vec<&ScanResult> = report.results.iter().collect();
    results.sort_by_key(|r| r.address);

    // Table header
    println!(
        "{:<16} {:<18} {:<28} OPEN PORTS",
        "IP ADDRESS", "MAC ADDRESS", "HOSTNAME"
    );
    println!("{}", "-".repeat(90));

    for result in results {
        println!(
            "{:<16} {:<18} {:<28} {}",
            result.address,
            result.mac_address,
            truncate(&result.hostname, 28),
            describe_ports(&result.open_ports)
        );
    }

    println!(
        "\nTotal: {} devices in {:.1}s",
        report.device_count(),
        report.elapsed_ms as f64 / 1000.0
    );
}

fn describe_ports(ports: &[u16]) -> String {
    let mut ports = ports.to_vec();
    ports.sort_unstable();
    ports
        .iter()
        .map(|port| match service_name(*port) {
            Some(name) => format!("{}/{}", port, name),
            None => port.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}
