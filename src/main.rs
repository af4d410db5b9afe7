//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geoip_enrich` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Exit status and the final error message
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use geoip_enrich::initialization::init_logger_with;
use geoip_enrich::{run_enrichment, Config};

fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting GEOIP_DATABASES_DIR without exporting it manually
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_enrichment(config) {
        // Summary is logged by the library; stdout carries only events
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("geoip error: {:#}", e);
            process::exit(1);
        }
    }
}
