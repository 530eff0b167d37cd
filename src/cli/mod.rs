//! Command-line interface for NAB (Node Asset Bridge).
//!
//! The CLI is a thin wrapper over the library pipeline: it parses arguments,
//! configures logging, loads the resolver snapshot, and dispatches to the
//! [`AssetInstaller`](crate::installer::AssetInstaller). Each subcommand lives
//! in its own module with its own argument structure and execution logic.
//!
//! # Available Commands
//!
//! - `install` - Aggregate asset declarations, synchronize `package.json`,
//!   and install (fresh or from the lock artifact, chosen automatically)
//! - `update` - Delete the lock artifact and reinstall from scratch
//!
//! # Usage
//!
//! ```bash
//! # Install assets for the project in the current directory
//! nab install
//!
//! # Same, with npm's info-level output and a longer timeout
//! nab --verbose install --timeout 300
//!
//! # Regenerate the lock artifact from scratch
//! nab update
//!
//! # Point at an explicit project directory and resolver snapshot
//! nab install --project-dir ./web --packages ./web/resolved.json
//! ```

pub mod install;
pub mod update;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Main CLI structure for the `nab` binary.
#[derive(Parser)]
#[command(
    name = "nab",
    version,
    about = "Node Asset Bridge - aggregate frontend asset declarations and drive npm",
    long_about = "NAB collects the frontend asset declarations of every resolved package, \
                  merges them into package.json, and runs npm to install them."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output.
    ///
    /// Turns on NAB's debug logging and asks npm for its info-level log.
    /// Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors for automation.
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Install frontend assets declared by resolved packages
    Install(install::InstallCommand),
    /// Remove the lock artifact and reinstall assets from scratch
    Update(update::UpdateCommand),
}

impl Cli {
    /// Logging directive derived from the verbosity flags.
    ///
    /// `None` means "defer to `RUST_LOG`".
    #[must_use]
    pub fn log_directive(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Install(cmd) => cmd.execute(self.verbose).await,
            Commands::Update(cmd) => cmd.execute(self.verbose).await,
        }
    }
}
