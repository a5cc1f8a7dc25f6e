//! Brick Value - price per gram and per piece of a theme's sets
//!
//! Reads the theme's sets year by year, weighs every set from its part
//! inventory and writes a CSV report with a per-year summary.

use brick_common::{BrickResult, Endpoints};
use brick_value::config::{default_cache_dir, default_output, DEFAULT_TIMEOUT_SECS};
use brick_value::{analyse_theme, write_report, Config, HttpClient, JsonWeightStore};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Analyse the value of a theme's sets by weight and piece count
#[derive(Parser, Debug)]
#[command(name = "brick_value")]
#[command(version, about, long_about = None)]
struct Args {
    /// Theme token as shown in the listing URL (e.g. alpha-team)
    #[arg(short, long)]
    theme: String,

    /// Directory for cached documents and part weights
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Report file (default: <theme>_sets.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URL of the set listing site
    #[arg(long, default_value = brick_common::endpoints::DEFAULT_BRICKSET_URL)]
    brickset_url: String,

    /// Base URL of the part catalog site
    #[arg(long, default_value = brick_common::endpoints::DEFAULT_BRICKLINK_URL)]
    bricklink_url: String,

    /// Timeout for each request in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Look up parts whose cached weight lookup failed again
    #[arg(long, default_value_t = false)]
    retry_failed: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            cache_dir: args.cache_dir.unwrap_or_else(default_cache_dir),
            output: args.output.unwrap_or_else(|| default_output(&args.theme)),
            endpoints: Endpoints::new(&args.brickset_url, &args.bricklink_url),
            timeout: Duration::from_secs(args.timeout_secs),
            retry_failed: args.retry_failed,
            theme: args.theme,
        }
    }
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=brick_value=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Args::parse());
    log::info!("Analysing theme {}", config.theme);
    log::info!("Cache directory: {}", config.cache_dir.display());

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> BrickResult<()> {
    let client = HttpClient::new(config.timeout)?;
    let mut store = JsonWeightStore::open(config.weight_cache_path());

    let years = analyse_theme(&client, config, &mut store)?;
    if store.failed_count() > 0 {
        log::warn!(
            "{} parts have no known weight; rerun with --retry-failed to look them up again",
            store.failed_count()
        );
    }
    write_report(&config.output, &years)?;
    Ok(())
}
