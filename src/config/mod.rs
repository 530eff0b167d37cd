//! Runtime options for the asset pipeline.
//!
//! NAB deliberately has no configuration file of its own: everything it needs
//! beyond the resolver snapshot arrives as two knobs, both surfaced as CLI
//! flags and defaulted from the host environment. The options bag is built
//! once by the CLI layer and passed down by value.

use std::time::Duration;

use crate::constants::DEFAULT_NPM_TIMEOUT_SECS;

/// Options controlling a single pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct InstallerOptions {
    /// Maximum npm subprocess runtime in seconds
    pub timeout_secs: u64,
    /// Whether to request npm's info-level log output
    pub verbose: bool,
}

impl Default for InstallerOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_NPM_TIMEOUT_SECS,
            verbose: false,
        }
    }
}

impl InstallerOptions {
    /// The subprocess timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
