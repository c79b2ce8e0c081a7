//! Seedconf CLI Binary
//!
//! Command-line entry point for the update-configuration provisioning tool.

use clap::Parser;
use seedconf::cli::{execute, Cli};
use seedconf::config::{ConfigLoader, SeedconfConfig};
use seedconf::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = load_config(&cli);
    let logging_config = build_logging_config(&cli, &config);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(root = %cli.root.display(), "Seedconf starting");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        eprintln!("{:#}", e);
        process::exit(1);
    }

    match execute(&cli, &config) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

/// Load configuration from an explicit file or the layered sources under the root.
fn load_config(cli: &Cli) -> SeedconfConfig {
    let loaded = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(&cli.root),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Warning: failed to load configuration, using defaults: {}", e);
        SeedconfConfig::default()
    })
}

/// Build logging configuration from CLI args and the loaded config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &SeedconfConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}
