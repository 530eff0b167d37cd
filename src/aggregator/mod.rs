//! Deterministic aggregation of frontend-asset declarations.
//!
//! Every installed package may declare frontend assets under the `npm` key of
//! its metadata. This module walks the resolver-ordered package sequence plus
//! the root package and merges all declarations into a single map, detecting
//! irreconcilable conflicts along the way.
//!
//! # Merge Semantics
//!
//! - Packages are visited in resolver order, each exactly once (keyed by
//!   package name; later duplicates are skipped).
//! - Empty, absent, and malformed declarations are skipped.
//! - A collision between two non-root packages on the same asset name with
//!   *different* specifier strings is a conflict, unless the root package
//!   also declares that asset. Specifiers are compared literally; NAB has no
//!   notion of semver ranges.
//! - Non-conflicting collisions merge last-writer-wins.
//! - The root declaration is merged last and unconditionally overwrites, so
//!   the project owner can always silence a lower-level conflict by pinning
//!   the asset at the root, without patching the conflicting packages. The
//!   root never participates in the conflict check itself; it is the
//!   resolution mechanism.
//!
//! The returned map iterates in lexicographic key order, which keeps the
//! serialized `dependencies` section stable across runs.
//!
//! # Examples
//!
//! ```rust
//! use nab_cli::aggregator::aggregate;
//! use nab_cli::package::Package;
//! use serde_json::json;
//!
//! let root: Package = serde_json::from_value(json!({
//!     "name": "acme/app", "npm": { "jquery": "^3.6" }
//! })).unwrap();
//! let packages: Vec<Package> = serde_json::from_value(json!([
//!     { "name": "acme/ui",    "npm": { "jquery": "^3.0", "lodash": "4.17.21" } },
//!     { "name": "acme/admin", "npm": { "jquery": "^3.5" } }
//! ])).unwrap();
//!
//! // Both non-root packages declare jquery, but the root pins it.
//! let assets = aggregate(&root, &packages).unwrap();
//! assert_eq!(assets["jquery"], "^3.6");
//! assert_eq!(assets["lodash"], "4.17.21");
//! ```

use std::collections::HashSet;

use crate::core::NabError;
use crate::package::{AssetMap, Package};

/// Merge all asset declarations in the dependency graph into one map.
///
/// Walks `packages` in the order supplied by the external resolver, merges
/// each package's declaration into an accumulator under the conflict policy
/// described in the module docs, then merges the root declaration last with
/// unconditional precedence.
///
/// An empty result is a valid terminal state: it means no package anywhere
/// declares any asset, and callers are expected to no-op the rest of the
/// pipeline in that case.
///
/// # Errors
///
/// Returns [`NabError::AssetConflict`] listing the offending asset names
/// (sorted) when two non-root packages declare the same asset with different
/// specifiers and the root does not override it.
pub fn aggregate(root: &Package, packages: &[Package]) -> Result<AssetMap, NabError> {
    // A malformed root declaration never fails the run; it only forfeits the
    // override mechanism.
    let root_assets = root.asset_declaration();

    let mut accumulator = AssetMap::new();
    let mut processed: HashSet<&str> = HashSet::new();

    for package in packages {
        if !processed.insert(package.name.as_str()) {
            tracing::debug!("Skipping already-processed package '{}'", package.name);
            continue;
        }

        let declaration = package.asset_declaration();
        if declaration.is_empty() {
            continue;
        }

        // Sorted, since BTreeMap iterates in key order.
        let conflicts: Vec<String> = declaration
            .iter()
            .filter(|(asset, specifier)| {
                accumulator
                    .get(asset.as_str())
                    .is_some_and(|existing| existing != *specifier)
                    && !root_assets.contains_key(asset.as_str())
            })
            .map(|(asset, _)| asset.clone())
            .collect();

        if !conflicts.is_empty() {
            tracing::debug!(
                "Package '{}' conflicts with earlier declarations on: {}",
                package.name,
                conflicts.join(", ")
            );
            return Err(NabError::AssetConflict { assets: conflicts });
        }

        accumulator.extend(declaration);
    }

    accumulator.extend(root_assets);

    Ok(accumulator)
}
