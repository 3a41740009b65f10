//! radar-sweep - run one sweep on the simulated turntable and draw the map
//!
//! Usage:
//!   radar-sweep                              # defaults, ASCII map on stdout
//!   radar-sweep --config sweep.toml --output map.png
//!   radar-sweep --dump-config > sweep.toml   # print default config

use clap::Parser;
use radar_sweep::devices::{MockTurntable, RasterDisplay};
use radar_sweep::error::{Error, Result};
use radar_sweep::{AppConfig, Pipeline, ScanLimits};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Single-revolution obstacle map on a simulated turntable
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the rendered map as PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the rendered map as ASCII
    #[arg(long)]
    ascii: bool,

    /// Give up if the sweep takes longer than this
    #[arg(long)]
    timeout_secs: Option<f64>,

    /// Give up after this many polls without rotation progress
    #[arg(long)]
    stall_polls: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    if args.dump_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("radar-sweep v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        log::info!("Using config: {}", path.display());
    }
    config.validate()?;

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        flag.store(true, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let mut limits = ScanLimits::default().with_cancel(cancel);
    if let Some(secs) = args.timeout_secs {
        let timeout = Duration::try_from_secs_f64(secs)
            .map_err(|e| Error::InvalidConfig(format!("--timeout-secs: {}", e)))?;
        limits = limits.with_timeout(timeout);
    }
    if let Some(polls) = args.stall_polls {
        limits = limits.with_stall_polls(polls);
    }

    let mut turntable = MockTurntable::new(config.simulation.clone());
    let mut display = RasterDisplay::new(config.display.width, config.display.height);

    let pipeline = Pipeline::new(&config, limits);
    let result = pipeline.run(&mut turntable, &mut display)?;

    for (i, object) in result.segmentation.enabled().enumerate() {
        log::info!(
            "Object {}: {} deg, {:.1} cm, ({:.1}, {:.1}) -> ({:.1}, {:.1}), {:.1} cm wide",
            i,
            object.angle,
            object.distance,
            object.start.x,
            object.start.y,
            object.end.x,
            object.end.y,
            object.extent()
        );
    }
    if result.segmentation.unterminated {
        log::warn!("An obstacle spanned the end of the sweep and was discarded");
    }

    if let Some(path) = &args.output {
        display.save_png(path)?;
        log::info!("Map written to {}", path.display());
    }
    if args.ascii || args.output.is_none() {
        print!("{}", display.to_ascii());
    }

    Ok(())
}
