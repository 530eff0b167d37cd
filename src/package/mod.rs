//! Package model for the resolver snapshot consumed by NAB.
//!
//! NAB runs after an external package resolver has already fixed the set of
//! installed packages. That resolver hands over a snapshot document listing
//! the root package (the project itself) and the ordered sequence of installed
//! packages, each a name plus an opaque metadata bag. NAB never mutates these
//! records; the only key it interprets is the `npm` asset declaration.
//!
//! # Snapshot Format
//!
//! ```json
//! {
//!   "root":     { "name": "acme/app", "npm": { "jquery": "^3.6" } },
//!   "packages": [ { "name": "acme/ui", "npm": { "lodash": "4.17.21" } } ]
//! }
//! ```
//!
//! All fields of a package other than `name` are carried verbatim in the
//! metadata bag, so resolvers are free to include whatever bookkeeping they
//! need without NAB caring.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::ASSET_KEY;
use crate::core::NabError;

/// Mapping from asset name to version specifier.
///
/// Used both for a single package's declaration and for the aggregated result.
/// The ordered map representation guarantees lexicographic (byte-wise
/// ascending) key order everywhere an asset map is serialized or compared.
pub type AssetMap = BTreeMap<String, String>;

/// Read-only view of one node in the dependency graph.
///
/// A package is a name plus an extensible metadata bag. The frontend-asset
/// declaration, if any, lives under the metadata key `npm` and maps asset
/// names to version specifiers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Package {
    /// Package name as reported by the resolver
    pub name: String,

    /// Opaque metadata carried verbatim from the resolver
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, Value>,
}

impl Package {
    /// Create a package from a name and an explicit metadata bag.
    #[must_use]
    pub fn new(name: impl Into<String>, metadata: serde_json::Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }

    /// Extract this package's asset declaration.
    ///
    /// Returns an empty map when the declaration is absent or malformed:
    /// a non-object `npm` value, or an object containing non-string version
    /// specifiers. Malformed declarations are logged and skipped rather than
    /// failing the run, since the package metadata is not under the control
    /// of the project being built.
    #[must_use]
    pub fn asset_declaration(&self) -> AssetMap {
        let Some(value) = self.metadata.get(ASSET_KEY) else {
            return AssetMap::new();
        };

        let Some(object) = value.as_object() else {
            tracing::warn!(
                "Package '{}' declares a non-object '{ASSET_KEY}' section; treating as empty",
                self.name
            );
            return AssetMap::new();
        };

        let mut declaration = AssetMap::new();
        for (asset, specifier) in object {
            match specifier.as_str() {
                Some(spec) => {
                    declaration.insert(asset.clone(), spec.to_string());
                }
                None => {
                    tracing::warn!(
                        "Package '{}' declares a non-string specifier for asset '{}'; \
                         treating the whole declaration as empty",
                        self.name,
                        asset
                    );
                    return AssetMap::new();
                }
            }
        }

        declaration
    }
}

/// The resolver's output: root package plus ordered installed packages.
///
/// Package order is whatever the external resolver produced; NAB preserves it
/// and does not re-sort or topologically order the sequence.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverSnapshot {
    /// The package representing the project being built
    pub root: Package,

    /// Installed packages, in resolver order
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl ResolverSnapshot {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`NabError::PackageInputError`] when the file cannot be read
    /// or does not decode into the snapshot shape.
    pub fn load(path: &Path) -> Result<Self, NabError> {
        let content = std::fs::read_to_string(path).map_err(|e| NabError::PackageInputError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| NabError::PackageInputError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn package_with_npm(name: &str, npm: Value) -> Package {
        let mut metadata = serde_json::Map::new();
        metadata.insert("npm".to_string(), npm);
        Package::new(name, metadata)
    }

    #[test]
    fn test_asset_declaration_extracts_mapping() {
        let package = package_with_npm("a", json!({"jquery": "^3.0", "lodash": "4.17.21"}));

        let declaration = package.asset_declaration();
        assert_eq!(declaration.len(), 2);
        assert_eq!(declaration["jquery"], "^3.0");
        assert_eq!(declaration["lodash"], "4.17.21");
    }

    #[test]
    fn test_asset_declaration_absent_is_empty() {
        let package = Package::new("a", serde_json::Map::new());
        assert!(package.asset_declaration().is_empty());
    }

    #[test]
    fn test_asset_declaration_non_object_is_empty() {
        let package = package_with_npm("a", json!("not-a-map"));
        assert!(package.asset_declaration().is_empty());

        let package = package_with_npm("a", json!(["jquery"]));
        assert!(package.asset_declaration().is_empty());
    }

    #[test]
    fn test_asset_declaration_non_string_specifier_is_empty() {
        let package = package_with_npm("a", json!({"jquery": "^3.0", "lodash": 4}));
        assert!(package.asset_declaration().is_empty());
    }

    #[test]
    fn test_snapshot_round_trip_preserves_metadata() {
        let input = json!({
            "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
            "packages": [
                { "name": "acme/ui", "version": "1.2.0", "npm": { "lodash": "4.17.21" } }
            ]
        });

        let snapshot: ResolverSnapshot = serde_json::from_value(input).unwrap();
        assert_eq!(snapshot.root.name, "acme/app");
        assert_eq!(snapshot.packages.len(), 1);
        assert_eq!(snapshot.packages[0].metadata["version"], json!("1.2.0"));
    }

    #[test]
    fn test_snapshot_load_missing_file_is_input_error() {
        let result = ResolverSnapshot::load(Path::new("/nonexistent/installed.json"));
        assert!(matches!(result, Err(NabError::PackageInputError { .. })));
    }

    #[test]
    fn test_snapshot_load_invalid_json_is_input_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("installed.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = ResolverSnapshot::load(&path);
        assert!(matches!(result, Err(NabError::PackageInputError { .. })));
    }
}
