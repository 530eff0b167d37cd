//! NAB CLI entry point
//!
//! Handles command-line argument parsing, logging setup, error display, and
//! command execution. All real work happens in the library crate; this binary
//! only wires the pieces together and maps failures to a nonzero exit code.

use anyhow::Result;
use clap::Parser;
use nab_cli::cli::Cli;
use nab_cli::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    init_tracing(&cli);

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `--verbose`/`--quiet` override `RUST_LOG`; without either, `RUST_LOG` is
/// honored and defaults to warnings. Log output goes to stderr so npm's
/// passthrough stdout stays clean.
fn init_tracing(cli: &Cli) {
    let filter = match cli.log_directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
