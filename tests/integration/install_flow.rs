//! Manifest synchronization and install-mode selection.

#![cfg(unix)]

use crate::common::TestProject;
use predicates::prelude::*;
use serde_json::json;

#[test]
fn fresh_install_invokes_npm_install_with_pinning_flags() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": {} },
        "packages": [
            { "name": "acme/ui", "npm": { "jquery": "^3.6", "axios": "^1.6" } }
        ]
    }));

    project.nab(&["install"]).assert().success();

    assert_eq!(
        project.npm_calls(),
        vec!["install --no-audit --save-exact --no-optional --loglevel error".to_string()]
    );

    let manifest = project.manifest();
    assert!(manifest.contains("\"jquery\": \"^3.6\""));
    assert!(manifest.contains("\"axios\": \"^1.6\""));
    // The stub created the lock artifact, like the real tool would.
    assert!(project.has_lock());
}

#[test]
fn install_with_lock_present_invokes_npm_ci() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_lock();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": []
    }));

    project.nab(&["install"]).assert().success();

    assert_eq!(project.npm_calls(), vec!["ci --loglevel error".to_string()]);
}

#[test]
fn verbose_flag_maps_to_npm_info_loglevel() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": []
    }));

    project.nab(&["--verbose", "install"]).assert().success();

    assert!(project.npm_calls()[0].ends_with("--loglevel info"));
}

#[test]
fn command_line_is_echoed_to_stdout() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": []
    }));

    project.nab(&["install"]).assert().success().stdout(predicate::str::contains(
        "npm install --no-audit --save-exact --no-optional --loglevel error",
    ));
}

#[test]
fn no_declared_assets_performs_no_writes_and_no_subprocess() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_snapshot(json!({
        "root": { "name": "acme/app" },
        "packages": [ { "name": "acme/lib" }, { "name": "acme/other", "npm": {} } ]
    }));

    project.nab(&["install"]).assert().success();

    assert!(!project.has_manifest());
    assert!(!project.has_lock());
    assert!(project.npm_calls().is_empty());
}

#[test]
fn existing_manifest_fields_survive_synchronization() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_manifest(
        r#"{"name":"my-app","scripts":{"build":"webpack --mode production"},"dependencies":{"stale":"0.1.0"}}"#,
    );
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": []
    }));

    project.nab(&["install"]).assert().success();

    let manifest = project.manifest();
    assert!(manifest.contains("\"name\": \"my-app\""));
    assert!(manifest.contains("webpack --mode production"));
    assert!(manifest.contains("\"jquery\": \"^3.6\""));
    assert!(!manifest.contains("stale"));
}

#[test]
fn repeated_install_is_byte_identical() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6", "axios": "^1.6" } },
        "packages": []
    }));

    project.nab(&["install"]).assert().success();
    let first = project.manifest();

    project.nab(&["install"]).assert().success();
    let second = project.manifest();

    assert_eq!(first, second);
}

#[test]
fn explicit_packages_path_overrides_default() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    let custom = project.path().join("resolved.json");
    std::fs::write(
        &custom,
        serde_json::to_string(&json!({
            "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
            "packages": []
        }))
        .unwrap(),
    )
    .unwrap();

    project
        .nab(&["install", "--packages", custom.to_str().unwrap()])
        .assert()
        .success();

    assert!(project.manifest().contains("jquery"));
}
