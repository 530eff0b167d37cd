//! NAB - Node Asset Bridge
//!
//! A post-resolution hook that aggregates the frontend-asset declarations
//! scattered across a dependency graph of resolved packages, merges them
//! deterministically into a single `package.json`, and drives npm to
//! materialize those assets on disk.
//!
//! # Architecture Overview
//!
//! NAB runs after an external package resolver has fixed the set of installed
//! packages. Each package may declare frontend assets (a mapping of npm
//! package names to version specifiers) under the `npm` key of its metadata.
//! NAB's job is everything between that metadata and a populated
//! `node_modules/`:
//!
//! 1. **Aggregate**: merge every declaration under a deterministic precedence
//!    and conflict policy - the root package always wins, conflicting
//!    non-root declarations fail the run.
//! 2. **Synchronize**: rewrite the `dependencies` section of `package.json`,
//!    preserving every other field byte-for-byte.
//! 3. **Orchestrate**: run `npm install` (no lock artifact) or `npm ci`
//!    (lock artifact present) with streamed output and a timeout.
//!
//! ## Key Properties
//!
//! - **Deterministic**: aggregated keys are lexicographically sorted and
//!   manifest rewrites are idempotent, so repeated runs are byte-identical.
//! - **Conflict-safe**: irreconcilable declarations abort before any file is
//!   written; the root package's declaration is the documented escape hatch.
//! - **Delegating**: semver resolution, the asset dependency graph, and file
//!   caching all belong to npm. NAB never parses the lock artifact - it only
//!   checks its existence.
//!
//! # Core Modules
//!
//! - [`aggregator`] - Deterministic merge of asset declarations with conflict
//!   detection
//! - [`manifest`] - `package.json` synchronization with field preservation
//! - [`installer`] - The pipeline object orchestrating aggregation, manifest
//!   sync, and npm
//! - [`npm`] - npm command construction, subprocess execution, output sinks
//!
//! ## Supporting Modules
//!
//! - [`package`] - Package model and resolver-snapshot input
//! - [`cli`] - Command-line interface (`nab install`, `nab update`)
//! - [`config`] - Runtime options (timeout, verbosity)
//! - [`core`] - Error types and user-facing error presentation
//! - [`constants`] - Well-known file names and manifest field values
//! - [`utils`] - Atomic file writes and npm discovery
//!
//! # Example
//!
//! ```rust,no_run
//! use nab_cli::config::InstallerOptions;
//! use nab_cli::installer::AssetInstaller;
//! use nab_cli::npm::sink::StdioSink;
//! use nab_cli::package::ResolverSnapshot;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let snapshot = ResolverSnapshot::load(Path::new("installed.json"))?;
//! let installer =
//!     AssetInstaller::new(".", InstallerOptions::default(), Arc::new(StdioSink));
//! installer.install(&snapshot).await?;
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod installer;
pub mod manifest;
pub mod npm;
pub mod package;
pub mod utils;
