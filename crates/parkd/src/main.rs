//! parkd - parking lot front desk
//!
//! This is the main entry point. It wires together:
//! - Configuration loading
//! - The lot (slots, tickets, fee policy)
//! - The interactive desk loop, or the demo run

mod desk;

use anyhow::{Context, Result};
use clap::Parser;
use desk::{Desk, Reply};
use parkd_config::{LotPolicy, check_capacity, load_config};
use parkd_core::{ParkingLot, SharedLot};
use parkd_util::{SystemClock, default_config_path};
use std::io::Write;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{SignalKind, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// parkd - Parking lot front desk
#[derive(Parser, Debug)]
#[command(name = "parkd")]
#[command(about = "Parks vehicles, issues tickets and charges on departure", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/parkd/config.toml)
    #[arg(short, long, env = "PARKD_CONFIG")]
    config: Option<PathBuf>,

    /// Number of slots, overriding the configuration
    #[arg(long)]
    capacity: Option<NonZeroU32>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Run the scripted two-vehicle demo instead of the interactive desk
    #[arg(long)]
    demo: bool,
}

fn load_policy(args: &Args) -> Result<LotPolicy> {
    if let Some(capacity) = args.capacity {
        check_capacity(u64::from(capacity.get())).context("Invalid --capacity")?;
    }

    let policy = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            } else {
                info!(config_path = %path.display(), "No config file, using defaults");
                LotPolicy::default()
            }
        }
    };

    Ok(match args.capacity {
        Some(capacity) => policy.with_capacity(capacity),
        None => policy,
    })
}

fn print_reply(reply: Option<Reply>) {
    if let Some(Reply::Print(text)) = reply {
        println!("{text}");
    }
}

/// The scenario the desk was first written for: two arrivals two seconds
/// apart, a look at free slots, then both leave.
async fn run_demo(desk: &Desk) {
    print_reply(desk.handle_line("park car KA-01-AA-1111"));

    tokio::time::sleep(Duration::from_secs(2)).await;

    for line in [
        "park bike KA-02-BB-2222",
        "available",
        "unpark KA-01-AA-1111",
        "unpark KA-02-BB-2222",
    ] {
        print_reply(desk.handle_line(line));
    }
}

async fn run_desk(desk: &Desk) -> Result<()> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type 'help' for commands.");

    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, closing desk");
                break;
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, closing desk");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match desk.handle_line(&line) {
                    Some(Reply::Quit) => break,
                    reply => print_reply(reply),
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so desk output on stdout stays readable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "parkd starting");

    let policy = load_policy(&args)?;
    let clock = SystemClock::from_env();
    let mock_time = clock.is_mocked();
    let lot = SharedLot::new(ParkingLot::from_policy(&policy, Arc::new(clock)));
    let desk = Desk::new(lot.clone(), policy.desk.currency.clone());

    info!(
        name = %policy.name,
        capacity = policy.capacity.get(),
        pricing = ?policy.pricing,
        mock_time,
        "Lot ready"
    );

    if args.demo {
        run_demo(&desk).await;
    } else {
        run_desk(&desk).await?;
    }

    let remaining = lot.snapshot().occupied;
    if remaining > 0 {
        warn!(remaining, "Closing with vehicles still parked");
    }

    info!("Shutdown complete");
    Ok(())
}
