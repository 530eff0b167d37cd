//! The asset pipeline - aggregation, manifest sync, and install orchestration.
//!
//! This module composes the stages of a NAB run into an explicit pipeline
//! object, [`AssetInstaller`]. The stages are strictly sequential because each
//! one's precondition is the previous one's flushed side effect: npm reads the
//! manifest that the synchronizer just wrote.
//!
//! # Pipeline
//!
//! 1. **Aggregate** all asset declarations ([`crate::aggregator`]). An empty
//!    result short-circuits the entire run: no file writes, no subprocess.
//! 2. **Synchronize** the manifest ([`crate::manifest`]).
//! 3. **Orchestrate** the install ([`crate::npm`]): with no lock artifact
//!    present, a fresh install that pins exact versions and creates the lock;
//!    with a lock artifact present, a reproducible install strictly from it.
//!
//! `update` is a degenerate third path: it deletes the lock artifact
//! (ignore-if-absent) and then proceeds exactly like a fresh install.
//!
//! A failure in any stage aborts the run. A manifest written before a failed
//! npm run stays in place on purpose: once the external problem is fixed,
//! re-running picks up the already-synchronized manifest.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::aggregator::aggregate;
use crate::config::InstallerOptions;
use crate::constants::{LOCK_FILE, MANIFEST_FILE};
use crate::core::NabError;
use crate::manifest::Manifest;
use crate::npm::NpmClient;
use crate::npm::sink::OutputSink;
use crate::package::ResolverSnapshot;

/// Pipeline object driving a complete NAB run against one project directory.
///
/// All collaborators are injected: the package set arrives per call, the
/// output sink at construction, and the npm program is overridable for tests.
/// Callers must not run two pipelines against the same project directory
/// concurrently - both would race on the manifest and lock files.
pub struct AssetInstaller {
    project_dir: PathBuf,
    options: InstallerOptions,
    npm: NpmClient,
}

impl AssetInstaller {
    /// Create a pipeline for `project_dir`.
    #[must_use]
    pub fn new(
        project_dir: impl Into<PathBuf>,
        options: InstallerOptions,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        let project_dir = project_dir.into();
        let npm = NpmClient::new(&project_dir, sink);
        Self {
            project_dir,
            options,
            npm,
        }
    }

    /// Override the npm program (tests substitute a stub binary).
    #[must_use]
    pub fn with_npm_program(mut self, program: impl Into<String>) -> Self {
        self.npm = self.npm.with_program(program);
        self
    }

    /// Path of the npm manifest inside the project directory.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join(MANIFEST_FILE)
    }

    /// Path of the npm lock artifact inside the project directory.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.project_dir.join(LOCK_FILE)
    }

    /// Aggregate declarations, synchronize the manifest, and run the installer.
    ///
    /// No-ops when no package anywhere declares any asset.
    ///
    /// # Errors
    ///
    /// Propagates [`NabError::AssetConflict`] from aggregation, manifest
    /// read/parse/write failures, and npm subprocess failures. Aggregation
    /// conflicts abort before any file is written.
    pub async fn install(&self, snapshot: &ResolverSnapshot) -> Result<()> {
        let assets = aggregate(&snapshot.root, &snapshot.packages)?;

        if assets.is_empty() {
            tracing::debug!("No frontend assets declared anywhere; skipping install");
            return Ok(());
        }

        self.npm.preflight()?;

        Manifest::synchronize(&self.manifest_path(), &assets)?;

        if self.lock_path().exists() {
            tracing::debug!("Lock artifact present; installing from {LOCK_FILE}");
            self.npm.ci(&self.options).await
        } else {
            tracing::debug!("No lock artifact; running fresh install");
            self.npm.install(&self.options).await
        }
    }

    /// Delete the lock artifact and reinstall from scratch.
    ///
    /// Removal is unconditional and ignores an absent artifact; the
    /// subsequent run therefore always takes the fresh-install path and lets
    /// npm regenerate the lock.
    ///
    /// # Errors
    ///
    /// Same as [`install`](Self::install), plus a file system error when the
    /// lock artifact exists but cannot be removed.
    pub async fn update(&self, snapshot: &ResolverSnapshot) -> Result<()> {
        remove_if_exists(&self.lock_path())?;
        self.install(snapshot).await
    }
}

/// Remove a file, treating "not found" as success.
fn remove_if_exists(path: &Path) -> Result<(), NabError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(_) => Err(NabError::FileSystemError {
            operation: "remove".to_string(),
            path: path.display().to_string(),
        }),
    }
}
