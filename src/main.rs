//! CLI entry point for sensor-rec.
//!
//! Headless surface for running the recording engine without a UI bridge:
//! record one bounded session against the mock IMU, or print the effective
//! configuration. The real platform integration replaces the mock sensor
//! source and the no-op wake lock with its own implementations of the same
//! seams.
//!
//! # Usage
//!
//! Record a 10 second WALKING session:
//! ```bash
//! sensor-rec record --activity WALKING --duration 10
//! ```
//!
//! Inspect the effective settings:
//! ```bash
//! sensor-rec show-config
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use sensor_rec::{logging, MockImu, NoopWakeLock, SessionController, Settings};

#[derive(Parser)]
#[command(name = "sensor-rec")]
#[command(about = "Background motion-sensor session recorder", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record one bounded session against the simulated IMU
    Record {
        /// Activity label stamped on every row
        #[arg(long, default_value = "SITTING")]
        activity: String,

        /// Session identifier (generated when omitted)
        #[arg(long)]
        session_id: Option<String>,

        /// Recording duration in seconds
        #[arg(long, default_value = "10")]
        duration: u64,

        /// Simulated sensor event rate in Hz
        #[arg(long, default_value = "100")]
        event_rate_hz: u32,
    },

    /// Print the effective settings
    ShowConfig,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let settings = match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("failed to load settings")?;
    settings.validate().map_err(|e| anyhow!(e))?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_ref())?;
    logging::init(&settings.application.log_level)?;

    match cli.command {
        Commands::Record {
            activity,
            session_id,
            duration,
            event_rate_hz,
        } => {
            let session_id =
                session_id.unwrap_or_else(|| format!("session_{}", Uuid::new_v4().simple()));

            let controller = SessionController::new(
                settings.recording,
                Box::new(MockImu::new(event_rate_hz)),
                Arc::new(NoopWakeLock),
            );

            controller.start(&activity, &session_id).await?;
            tokio::time::sleep(Duration::from_secs(duration)).await;
            let summary = controller.stop().await;

            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
