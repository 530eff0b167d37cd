//! Error handling for NAB
//!
//! This module provides the error types and user-friendly error reporting for the
//! Node Asset Bridge. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`NabError`] - Enumerated error types for all failure cases in NAB
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! NAB errors are organized into several categories:
//! - **Aggregation**: [`NabError::AssetConflict`]
//! - **Manifest**: [`NabError::ManifestParseError`], [`NabError::FileSystemError`]
//! - **Resolver input**: [`NabError::PackageInputError`]
//! - **npm subprocess**: [`NabError::NpmNotFound`], [`NabError::NpmCommandFailed`],
//!   [`NabError::NpmTimeout`]
//!
//! Every failure aborts the run: there is no partial-success state, no retry, and
//! no rollback of a manifest that was already written before the failure.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nab_cli::core::{NabError, user_friendly_error};
//!
//! fn run_pipeline() -> anyhow::Result<()> {
//!     Err(NabError::NpmNotFound.into())
//! }
//!
//! if let Err(e) = run_pipeline() {
//!     let friendly = user_friendly_error(e);
//!     friendly.display(); // Shows colored error with suggestions
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for NAB operations
///
/// Each variant represents a specific failure mode of the asset pipeline and
/// carries enough context (asset names, file paths, exit codes) for the caller
/// to produce an actionable message. Variants map one-to-one onto the stages
/// of the pipeline: aggregation, manifest synchronization, and npm execution.
#[derive(Error, Debug)]
pub enum NabError {
    /// Two or more non-root packages declare the same asset with different specifiers
    ///
    /// Raised by the aggregator before any file is written. The root package's
    /// own `npm` declaration always overrides lower-level declarations, so
    /// pinning the asset there silences the conflict.
    ///
    /// # Fields
    /// - `assets`: The conflicting asset names, sorted
    #[error("Conflicting frontend assets: {}", .assets.join(", "))]
    AssetConflict {
        /// The conflicting asset names, sorted lexicographically
        assets: Vec<String>,
    },

    /// An existing manifest file is not valid JSON (or not a JSON object)
    ///
    /// NAB refuses to overwrite a manifest it cannot understand; the file must
    /// be fixed or removed by hand.
    #[error("Failed to parse manifest {file}: {reason}")]
    ManifestParseError {
        /// Path of the manifest that failed to parse
        file: String,
        /// The underlying parse failure
        reason: String,
    },

    /// The resolver snapshot could not be read or decoded
    #[error("Failed to load package snapshot {file}: {reason}")]
    PackageInputError {
        /// Path of the snapshot file
        file: String,
        /// The underlying read or decode failure
        reason: String,
    },

    /// npm executable not found in PATH
    ///
    /// NAB drives the system `npm` command to materialize assets; it must be
    /// installed and reachable through the PATH environment variable.
    #[error("npm is not installed or not found in PATH")]
    NpmNotFound,

    /// npm subcommand exited with a nonzero status
    ///
    /// # Fields
    /// - `operation`: The npm subcommand that failed (e.g., "install", "ci")
    /// - `code`: The exit code reported by npm
    #[error("npm {operation} exited with status {code}")]
    NpmCommandFailed {
        /// The npm subcommand that failed (e.g., "install", "ci")
        operation: String,
        /// The exit code reported by npm
        code: i32,
    },

    /// npm subcommand was killed after exceeding the configured timeout
    #[error("npm {operation} timed out after {seconds} seconds")]
    NpmTimeout {
        /// The npm subcommand that was killed
        operation: String,
        /// The configured timeout in seconds
        seconds: u64,
    },

    /// General file system operation failure
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g., "read", "write", "remove")
        operation: String,
        /// The path involved in the failed operation
        path: String,
    },

    /// Standard I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error with a message
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

/// User-friendly error wrapper with optional suggestion and details
///
/// Wraps a [`NabError`] with contextual guidance for CLI display. Suggestions
/// are actionable steps shown in green; details explain the failure and are
/// shown in yellow.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying NAB error
    pub error: NabError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`NabError`]
    #[must_use]
    pub const fn new(error: NabError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions should be actionable steps the user can take, such as
    /// pinning a conflicting asset in the root package.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{} {}", "Details:".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{} {}", "Suggestion:".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// This is the main entry point for converting arbitrary errors into
/// user-friendly messages for CLI display. [`NabError`] variants get tailored
/// suggestions; everything else is wrapped with its rendered message chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    match error.downcast::<NabError>() {
        Ok(nab_error) => create_error_context(nab_error),
        Err(other) => {
            let message = other
                .chain()
                .map(std::string::ToString::to_string)
                .collect::<Vec<_>>()
                .join(": ");
            ErrorContext::new(NabError::Other { message })
        }
    }
}

/// Attach variant-specific suggestions and details to a [`NabError`]
fn create_error_context(error: NabError) -> ErrorContext {
    let (suggestion, details): (Option<String>, Option<String>) = match &error {
        NabError::AssetConflict { .. } => (
            Some(
                "Pin the conflicting assets in the root package's \"npm\" section; \
                 the root declaration always overrides lower-level declarations"
                    .to_string(),
            ),
            Some(
                "Two or more installed packages declare the same frontend asset \
                 with different version specifiers"
                    .to_string(),
            ),
        ),
        NabError::ManifestParseError { file, .. } => (
            Some(
                "Fix the JSON syntax in the manifest, or remove the file to let NAB regenerate it"
                    .to_string(),
            ),
            Some(format!(
                "NAB refuses to overwrite {file} because it could not understand its contents"
            )),
        ),
        NabError::PackageInputError { .. } => (
            Some(
                "Re-run the package resolver to regenerate the snapshot, or pass --packages \
                 with the correct path"
                    .to_string(),
            ),
            None,
        ),
        NabError::NpmNotFound => (
            Some(
                "Install Node.js and npm from https://nodejs.org/ and ensure npm is in your PATH"
                    .to_string(),
            ),
            None,
        ),
        NabError::NpmCommandFailed { operation, .. } => {
            let details = if operation == "install" {
                "Failed to generate package-lock.json and install assets"
            } else {
                "Failed to install assets from the existing package-lock.json"
            };
            (
                Some(
                    "Inspect the npm output above; re-run with --verbose for npm's info-level log"
                        .to_string(),
                ),
                Some(details.to_string()),
            )
        }
        NabError::NpmTimeout { .. } => (
            Some(
                "Increase the timeout with --timeout (or NAB_TIMEOUT) and check network connectivity"
                    .to_string(),
            ),
            None,
        ),
        NabError::FileSystemError { .. } => (
            Some("Check file permissions and that the project directory is writable".to_string()),
            None,
        ),
        _ => (None, None),
    };

    ErrorContext {
        error,
        suggestion,
        details,
    }
}
