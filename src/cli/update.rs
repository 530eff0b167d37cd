//! Update frontend assets by regenerating the lock artifact.
//!
//! Deletes `package-lock.json` (if present), then runs the same pipeline as
//! `install`, which necessarily takes the fresh-install path and lets npm
//! write a new lock artifact from the current declarations.
//!
//! ```bash
//! nab update
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::InstallerOptions;
use crate::constants::{DEFAULT_NPM_TIMEOUT_SECS, SNAPSHOT_FILE};
use crate::installer::AssetInstaller;
use crate::npm::sink::StdioSink;
use crate::package::ResolverSnapshot;

/// Command to refresh the lock artifact and reinstall assets.
#[derive(Args)]
pub struct UpdateCommand {
    /// Project directory containing the manifest and lock artifact
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Path to the resolver snapshot (defaults to installed.json in the
    /// project directory)
    #[arg(long)]
    packages: Option<PathBuf>,

    /// npm subprocess timeout in seconds
    #[arg(long, env = "NAB_TIMEOUT", default_value_t = DEFAULT_NPM_TIMEOUT_SECS)]
    timeout: u64,
}

impl UpdateCommand {
    /// Execute the update command.
    pub async fn execute(self, verbose: bool) -> Result<()> {
        let snapshot_path =
            self.packages.unwrap_or_else(|| self.project_dir.join(SNAPSHOT_FILE));
        let snapshot = ResolverSnapshot::load(&snapshot_path)?;

        let options = InstallerOptions {
            timeout_secs: self.timeout,
            verbose,
        };

        AssetInstaller::new(&self.project_dir, options, Arc::new(StdioSink))
            .update(&snapshot)
            .await
    }
}
