use clap::Parser;
use lakibeam_driver::{run_driver, LakiBeamConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Reads LakiBeam packets and prints the current frame as JSON.
#[derive(Parser, Debug)]
#[command(about = "LiDAR data receiver.", disable_version_flag = true)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the listen port of the configuration
    #[arg(long)]
    port: Option<u16>,
    /// Update period in milliseconds
    #[arg(long, default_value_t = 100)]
    period_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => LakiBeamConfig::load(path)?,
        None => LakiBeamConfig::default(),
    };
    if let Some(port) = args.port {
        config.listen_port = port;
    }

    // Threads stop when the handle goes out of scope
    let (_driver_threads, frame) = run_driver(&config)?;

    loop {
        std::thread::sleep(Duration::from_millis(args.period_ms));
        let report = frame.ingest_cycle();
        if !report.malformed.is_empty() {
            warn!("Dropped {} malformed datagrams", report.malformed.len());
        }
        if report.datagrams_decoded == 0 {
            continue;
        }
        println!("{}", serde_json::to_string(&frame.snapshot())?);
    }
}
