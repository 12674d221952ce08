//! Rail Probe - INA3221 power-rail telemetry binary
//!
//! Prints power-rail samples to the console or appends them to a CSV file.

use anyhow::Context;
use clap::Parser;
use rail_probe::{
    OutputFormat, RunMode, Sampler, SamplerConfig, DEFAULT_INTERVAL_MS,
    RECOMMENDED_MIN_INTERVAL_MS,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "rail_probe")]
#[command(about = "Reads the power information from the INA3221 devices on the Jetson TX2 board")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Austin Couch")]
struct Cli {
    /// Write samples to a CSV file. Existing files are appended to.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of probing iterations (0 = single shot, or unbounded with --interval)
    #[arg(short, long, default_value_t = 0)]
    count: u64,

    /// Sample interval in milliseconds. A value of 1000 or more is recommended.
    #[arg(short = 't', long, default_value_t = DEFAULT_INTERVAL_MS)]
    interval: u64,

    /// Text for a trailing "comments" CSV column
    #[arg(long)]
    comment: Option<String>,

    /// IIO device directory to monitor (repeatable, replaces the defaults)
    #[arg(long = "device", value_name = "PATH")]
    devices: Vec<PathBuf>,

    /// Console output format: pretty or json
    #[arg(long, default_value = "pretty")]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let config = build_config(&cli)?;
    let mode = config.run_mode();
    if config.interval_ms != 0 && config.interval_ms < RECOMMENDED_MIN_INTERVAL_MS {
        warn!(
            "Sample interval of {}ms is below the recommended {}ms",
            config.interval_ms, RECOMMENDED_MIN_INTERVAL_MS
        );
    }

    let mut sampler = Sampler::from_config(&config).context("invalid sampler configuration")?;

    let running = Arc::new(AtomicBool::new(true));
    if matches!(mode, RunMode::Continuous { .. }) {
        let flag = running.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, stopping after the current sample");
                flag.store(false, Ordering::SeqCst);
            }
        });
    }

    info!("Starting sampler in {:?} mode", mode);
    let rounds = sampler.run(mode, &running).await;
    info!("Took {} sample(s)", rounds);

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<SamplerConfig> {
    let format = match cli.format.as_str() {
        "pretty" => OutputFormat::Pretty,
        "json" => OutputFormat::Json,
        other => {
            error!("Unsupported format: {}. Use 'pretty' or 'json'", other);
            anyhow::bail!("unsupported output format '{}'", other);
        }
    };

    let mut config = SamplerConfig::default()
        .with_csv_file(cli.file.clone())
        .with_interval_ms(cli.interval)
        .with_iterations(cli.count)
        .with_comment(cli.comment.clone())
        .with_format(format);

    if !cli.devices.is_empty() {
        config = config.with_device_paths(cli.devices.iter().cloned());
    }

    Ok(config)
}
