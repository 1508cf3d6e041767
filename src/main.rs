// telclean - Phone number pseudonymization for delimited exports
// Copyright (c) 2025 Telclean Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use telclean::cli::Cli;
use telclean::config::load_config_or_default;
use telclean::logging::init_logging;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            process::exit(e.exit_code());
        }
    };

    // CLI log level wins over the configured one
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.application.log_level.clone());
    let logging_guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "telclean - Phone number pseudonymization"
    );

    let exit_code = match cli.clean.execute(config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, flush file logs first
    drop(logging_guard);
    process::exit(exit_code);
}
