//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mail_posture` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - The run summary and exit status
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mail_posture::initialization::init_logger_with;
use mail_posture::{run_audit, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // MAIL_POSTURE_* defaults may live in a .env file, here or next to the executable
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

    let config = Config::from(Opt::parse());

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_audit(config).await {
        Ok(summary) => {
            eprintln!("{summary}");
            Ok(())
        }
        Err(e) => {
            eprintln!("mail_posture error: {:#}", e);
            process::exit(1);
        }
    }
}
