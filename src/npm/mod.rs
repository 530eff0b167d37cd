//! npm integration - command construction and invocation.
//!
//! NAB drives the system npm command the way cargo drives the system git:
//! no bundled JavaScript tooling, just a subprocess with a well-defined
//! command line. This module owns the two invocations NAB ever makes and the
//! mapping from their outcomes to typed errors:
//!
//! - **Fresh install** (`npm install --no-audit --save-exact --no-optional
//!   --loglevel <level>`): resolves the manifest's dependency section to
//!   exact pinned versions and creates `package-lock.json` as a side effect.
//!   Audit and optional-dependency resolution are disabled because the
//!   dependency section is machine generated and reproducibility matters
//!   more than advisories at this point in the build.
//! - **Reproducible install** (`npm ci --loglevel <level>`): installs
//!   strictly from the existing `package-lock.json` without modifying it.
//!
//! The log level is `info` when the caller asked for verbose output and
//! `error` otherwise, mapping the host tool's verbosity straight onto npm's.
//!
//! Subprocess mechanics (streaming, timeout, exit codes) live in
//! [`command_builder`]; output destinations live in [`sink`].

pub mod command_builder;
pub mod sink;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::InstallerOptions;
use crate::core::NabError;
use crate::utils::platform::{command_exists, npm_program};

use command_builder::NpmCommand;
use sink::OutputSink;

/// Derive npm's `--loglevel` value from the verbosity flag.
#[must_use]
pub const fn log_level(verbose: bool) -> &'static str {
    if verbose { "info" } else { "error" }
}

/// Client for the two npm invocations NAB performs.
///
/// Holds the executed program, the project directory the subprocess runs in,
/// and the sink receiving its output. The program defaults to the platform
/// npm binary; tests substitute a stub.
pub struct NpmClient {
    program: String,
    project_dir: PathBuf,
    sink: Arc<dyn OutputSink>,
}

impl NpmClient {
    /// Create a client running npm inside `project_dir`.
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>, sink: Arc<dyn OutputSink>) -> Self {
        Self {
            program: npm_program().to_string(),
            project_dir: project_dir.into(),
            sink,
        }
    }

    /// Override the executed program (tests substitute a stub binary).
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Check that the npm executable is reachable before running anything.
    ///
    /// # Errors
    ///
    /// Returns [`NabError::NpmNotFound`] when the program is not in PATH.
    pub fn preflight(&self) -> Result<(), NabError> {
        if command_exists(&self.program) {
            Ok(())
        } else {
            Err(NabError::NpmNotFound)
        }
    }

    /// Run the fresh-install subcommand.
    ///
    /// Expected to create `package-lock.json` as a side effect of npm itself,
    /// not of NAB.
    ///
    /// # Errors
    ///
    /// [`NabError::NpmCommandFailed`] on nonzero exit,
    /// [`NabError::NpmTimeout`] when the timeout fires.
    pub async fn install(&self, options: &InstallerOptions) -> Result<()> {
        self.run("install", &install_args(options.verbose), options).await
    }

    /// Run the reproducible-install subcommand against the existing lock artifact.
    ///
    /// # Errors
    ///
    /// [`NabError::NpmCommandFailed`] on nonzero exit,
    /// [`NabError::NpmTimeout`] when the timeout fires.
    pub async fn ci(&self, options: &InstallerOptions) -> Result<()> {
        self.run("ci", &ci_args(options.verbose), options).await
    }

    async fn run(
        &self,
        operation: &str,
        args: &[&'static str],
        options: &InstallerOptions,
    ) -> Result<()> {
        let exit = NpmCommand::new(Arc::clone(&self.sink))
            .with_program(&self.program)
            .args(args.iter().copied())
            .current_dir(&self.project_dir)
            .with_timeout(Some(options.timeout()))
            .execute()
            .await?;

        if exit.timed_out {
            return Err(NabError::NpmTimeout {
                operation: operation.to_string(),
                seconds: options.timeout_secs,
            }
            .into());
        }

        match exit.code {
            Some(0) => Ok(()),
            code => Err(NabError::NpmCommandFailed {
                operation: operation.to_string(),
                // None means killed by a signal; report it like a shell would.
                code: code.unwrap_or(-1),
            }
            .into()),
        }
    }
}

/// Argument vector for the fresh-install subcommand.
fn install_args(verbose: bool) -> [&'static str; 6] {
    [
        "install",
        "--no-audit",
        "--save-exact",
        "--no-optional",
        "--loglevel",
        log_level(verbose),
    ]
}

/// Argument vector for the reproducible-install subcommand.
fn ci_args(verbose: bool) -> [&'static str; 3] {
    ["ci", "--loglevel", log_level(verbose)]
}
