//! Conflicts, malformed inputs, and exit codes.

use crate::common::TestProject;
use predicates::prelude::*;
use serde_json::json;

#[test]
fn conflicting_assets_fail_and_name_the_offender() {
    let project = TestProject::new();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": {} },
        "packages": [
            { "name": "acme/a", "npm": { "jquery": "^3.0" } },
            { "name": "acme/b", "npm": { "jquery": "^3.5" } }
        ]
    }));

    project
        .nab(&["install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conflicting frontend assets: jquery"))
        .stderr(predicate::str::contains("root package"));

    // Conflicts abort before any file is written.
    assert!(!project.has_manifest());
}

#[cfg(unix)]
#[test]
fn root_declaration_overrides_the_conflict() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": [
            { "name": "acme/a", "npm": { "jquery": "^3.0" } },
            { "name": "acme/b", "npm": { "jquery": "^3.5" } }
        ]
    }));

    project.nab(&["install"]).assert().success();

    assert!(project.manifest().contains("\"jquery\": \"^3.6\""));
}

#[test]
fn missing_snapshot_is_reported_with_its_path() {
    let project = TestProject::new();

    project
        .nab(&["install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load package snapshot"))
        .stderr(predicate::str::contains("installed.json"));
}

#[test]
fn invalid_snapshot_json_is_an_input_error() {
    let project = TestProject::new();
    std::fs::write(project.path().join("installed.json"), "{ nope").unwrap();

    project
        .nab(&["install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load package snapshot"));
}

#[cfg(unix)]
#[test]
fn malformed_manifest_is_never_overwritten() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_manifest("{ this is not json");
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": []
    }));

    project
        .nab(&["install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse manifest"));

    // The broken file is left exactly as it was, and npm never ran.
    assert_eq!(project.manifest(), "{ this is not json");
    assert!(project.npm_calls().is_empty());
}

#[test]
fn verbose_and_quiet_are_mutually_exclusive() {
    let project = TestProject::new();

    project.nab(&["--verbose", "--quiet", "install"]).assert().failure();
}
