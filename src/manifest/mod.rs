//! npm manifest (`package.json`) synchronization.
//!
//! NAB owns exactly one field of the manifest: `dependencies`. Everything else
//! in a pre-existing `package.json` - scripts, engines, custom tooling config -
//! is preserved verbatim, in original field order, across rewrites. When no
//! manifest exists yet, a minimal private one is synthesized around the
//! dependency section.
//!
//! # Determinism
//!
//! Serialization is deterministic: field order follows the source document
//! (or the fixed synthesis order), dependency keys are lexicographically
//! sorted by construction, output is pretty-printed with a single trailing
//! newline, and the file is written atomically. Re-synchronizing the same
//! aggregated map therefore produces byte-identical output, which keeps the
//! manifest quiet in version control.
//!
//! # Failure Policy
//!
//! An existing manifest that cannot be read or parsed always fails the run.
//! NAB never silently replaces a file it cannot understand.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::constants::{DOCS_HOMEPAGE, GENERATED_NOTICE};
use crate::core::NabError;
use crate::package::AssetMap;
use crate::utils::fs::atomic_write;

/// In-memory view of a `package.json` document.
///
/// The document is held as a raw JSON object so unknown fields survive a
/// load/save round trip untouched.
#[derive(Debug, Clone)]
pub struct Manifest {
    document: serde_json::Map<String, Value>,
}

impl Manifest {
    /// Load an existing manifest from disk.
    ///
    /// # Errors
    ///
    /// - I/O failure reading the file (the path is part of the error context)
    /// - [`NabError::ManifestParseError`] when the content is not valid JSON
    ///   or the top-level value is not an object
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| {
            format!(
                "Cannot read manifest {}, make sure the user has permission to read it",
                path.display()
            )
        })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| NabError::ManifestParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(document) => Ok(Self { document }),
            _ => Err(NabError::ManifestParseError {
                file: path.display().to_string(),
                reason: "top-level value is not a JSON object".to_string(),
            }
            .into()),
        }
    }

    /// Synthesize a new manifest document.
    ///
    /// The generated document carries a notice that the dependency section is
    /// machine generated, a documentation reference, an empty dependency
    /// section, and a private flag so the manifest is never published.
    #[must_use]
    pub fn synthesize() -> Self {
        let mut document = serde_json::Map::new();
        document.insert("description".to_string(), Value::String(GENERATED_NOTICE.to_string()));
        document.insert("homepage".to_string(), Value::String(DOCS_HOMEPAGE.to_string()));
        document.insert("dependencies".to_string(), Value::Object(serde_json::Map::new()));
        document.insert("private".to_string(), Value::Bool(true));
        Self { document }
    }

    /// Load the manifest at `path`, or synthesize a new one if absent.
    pub fn load_or_synthesize(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No manifest at {}, synthesizing a new one", path.display());
            Ok(Self::synthesize())
        }
    }

    /// Replace the `dependencies` field with the aggregated asset map.
    ///
    /// If the field already exists its position in the document is kept;
    /// otherwise it is appended. No other field is touched.
    pub fn set_dependencies(&mut self, assets: &AssetMap) {
        let dependencies: serde_json::Map<String, Value> = assets
            .iter()
            .map(|(name, specifier)| (name.clone(), Value::String(specifier.clone())))
            .collect();

        self.document.insert("dependencies".to_string(), Value::Object(dependencies));
    }

    /// The current `dependencies` field, if it is an object.
    #[must_use]
    pub fn dependencies(&self) -> Option<&serde_json::Map<String, Value>> {
        self.document.get("dependencies").and_then(Value::as_object)
    }

    /// Serialize the document to its canonical on-disk form.
    ///
    /// Pretty-printed JSON with a single trailing newline. serde_json never
    /// escapes forward slashes, so URLs and path-like specifiers stay
    /// readable.
    pub fn to_json_string(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&self.document)
            .context("Failed to serialize manifest to JSON")?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Write the document to disk atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let rendered = self.to_json_string()?;
        atomic_write(path, rendered.as_bytes())
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        tracing::debug!("Wrote manifest: {}", path.display());
        Ok(())
    }

    /// Synchronize the manifest at `path` with the aggregated asset map.
    ///
    /// Loads the existing manifest (or synthesizes one), replaces its
    /// dependency section, and writes it back.
    pub fn synchronize(path: &Path, assets: &AssetMap) -> Result<()> {
        let mut manifest = Self::load_or_synthesize(path)?;
        manifest.set_dependencies(assets);
        manifest.save(path)
    }
}
