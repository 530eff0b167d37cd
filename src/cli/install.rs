//! Install frontend assets declared across the resolved package set.
//!
//! Reads the resolver snapshot, aggregates every package's asset declaration,
//! synchronizes `package.json`, and drives npm. The install mode is chosen
//! automatically: a fresh install (which creates `package-lock.json`) when no
//! lock artifact exists, a reproducible `npm ci` when one does.
//!
//! ```bash
//! nab install
//! nab install --project-dir ./web --timeout 300
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

/// Command to install frontend assets for the project.
#[derive(Args)]
pub struct InstallCommand {
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

impl InstallCommand {
    /// Execute the install command.
    pub async fn execute(self, verbose: bool) -> Result<()> {
        let snapshot_path =
            self.packages.unwrap_or_else(|| self.project_dir.join(SNAPSHOT_FILE));
        let snapshot = ResolverSnapshot::load(&snapshot_path)?;

        let options = InstallerOptions {
            timeout_secs: self.timeout,
            verbose,
        };

        AssetInstaller::new(&self.project_dir, options, Arc::new(StdioSink))
            .install(&snapshot)
            .await
    }
}
