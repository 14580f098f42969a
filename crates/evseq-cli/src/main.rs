//! Evseq CLI: validate recorded pointer event sequences
//!
//! ## Usage
//!
//! ```bash
//! evseq validate tap.json                      # Validate with the trace's own device/platform
//! evseq validate tap.json --device touch       # Validate as another device
//! evseq grammar --device pen --shape button    # Print an expected grammar
//! evseq table --platform ios                   # Print a platform's table
//! evseq lint "Entered Moved* Moved Exited"     # Find starved terms
//! ```

use clap::Parser;
use evseq_cli::{build_config, handlers, logging, run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(&config);

    match run(&cli, &config) {
        Ok(verdict) => verdict.exit_code(),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            handlers::error_exit_code()
        }
    }
}
