// VoltCity CLI - Dataset generation entry point
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # VoltCity CLI
//!
//! One-shot synthetic dataset generation for the VoltCity platform.
//!
//! ## Usage
//!
//! ```bash
//! # Default production-sized dataset under ./output
//! voltcity-cli
//!
//! # Smaller dataset, custom seed and destination
//! voltcity-cli --seed 7 --buildings 10 --clients 40 --out-dir /tmp/fixtures
//! ```

use chrono::Duration;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;
use voltcity_testdata::{
    GenerationPipeline, RelationalExporter, ReportExporter, RunConfig, TelemetryExporter,
};

/// VoltCity synthetic dataset generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Random seed; a fixed seed reproduces every artifact byte-for-byte
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Output directory; sql/, json/ and csv/ are created inside
    #[arg(short, long, default_value = "output")]
    out_dir: PathBuf,

    /// Number of regions taken from the catalog
    #[arg(long, default_value = "8")]
    regions: usize,

    /// Number of buildings
    #[arg(long, default_value = "50")]
    buildings: usize,

    /// Number of clients
    #[arg(long, default_value = "200")]
    clients: usize,

    /// Number of contracts
    #[arg(long, default_value = "180")]
    contracts: usize,

    /// Days of telemetry to emit, from the start of the data window
    #[arg(long, default_value = "14")]
    telemetry_days: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("VoltCity dataset generator v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("Generation failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> voltcity_testdata::Result<()> {
    let config = RunConfig::new()
        .with_seed(args.seed)
        .with_regions(args.regions)
        .with_buildings(args.buildings)
        .with_clients(args.clients)
        .with_contracts(args.contracts);

    let sql_dir = args.out_dir.join("sql");
    let json_dir = args.out_dir.join("json");
    let csv_dir = args.out_dir.join("csv");
    for dir in [&sql_dir, &json_dir, &csv_dir] {
        fs::create_dir_all(dir)?;
    }

    info!(
        "Window {} .. {}, seed {}",
        config.start_date, config.end_date, config.seed
    );

    let dataset = GenerationPipeline::new(config.clone())?.run();
    for (name, count) in dataset.counts() {
        info!("  {:<14} {}", name, count);
    }

    let sql_path = sql_dir.join("insert_data.sql");
    RelationalExporter::new(&dataset).write_to_path(&sql_path)?;
    info!("SQL inserts: {}", sql_path.display());

    if args.telemetry_days > 0 {
        let to = (config.start_date + Duration::days(args.telemetry_days as i64 - 1))
            .min(config.end_date);
        let files =
            TelemetryExporter::new(&dataset, &config).write_files(config.start_date, to, &json_dir)?;
        info!("Telemetry: {} files in {}", files.len(), json_dir.display());
    }

    let files =
        ReportExporter::new(&dataset, &config).write_files(config.start_date, config.end_date, &csv_dir)?;
    info!("Reports: {} files in {}", files.len(), csv_dir.display());

    info!("Generation finished");
    Ok(())
}
