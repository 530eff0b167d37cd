//! Global constants used throughout the NAB codebase.
//!
//! This module contains the well-known file names of the npm ecosystem and the
//! fixed field values written into a freshly synthesized manifest. Defining
//! them centrally keeps the manifest and installer modules in agreement about
//! the on-disk contract.

/// File name of the npm manifest at the project root.
pub const MANIFEST_FILE: &str = "package.json";

/// File name of the npm lock artifact at the project root.
///
/// Only its existence is ever inspected; the contents are opaque to NAB and
/// are produced and consumed exclusively by npm itself.
pub const LOCK_FILE: &str = "package-lock.json";

/// Default file name of the resolver snapshot consumed as input.
pub const SNAPSHOT_FILE: &str = "installed.json";

/// Metadata key under which a package declares its frontend assets.
pub const ASSET_KEY: &str = "npm";

/// Notice written into the `description` field of a synthesized manifest.
pub const GENERATED_NOTICE: &str =
    "THE FILE IS GENERATED PROGRAMMATICALLY, ALL MANUAL CHANGES IN DEPENDENCIES SECTION WILL BE LOST";

/// Documentation reference written into the `homepage` field of a synthesized manifest.
pub const DOCS_HOMEPAGE: &str = "https://github.com/nab-dev/nab#declaring-frontend-assets";

/// Default timeout for npm subprocess execution (60 seconds).
pub const DEFAULT_NPM_TIMEOUT_SECS: u64 = 60;
