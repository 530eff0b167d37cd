//! Lock-artifact removal and regeneration.

#![cfg(unix)]

use crate::common::TestProject;
use serde_json::json;

#[test]
fn update_removes_lock_and_runs_fresh_install() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_lock();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": []
    }));

    project.nab(&["update"]).assert().success();

    let calls = project.npm_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("install "), "expected fresh install, got: {}", calls[0]);
}

#[test]
fn update_without_lock_still_succeeds() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": []
    }));

    project.nab(&["update"]).assert().success();

    assert!(project.npm_calls()[0].starts_with("install "));
}

#[test]
fn install_after_update_uses_the_regenerated_lock() {
    let mut project = TestProject::new();
    project.install_stub_npm();
    project.write_snapshot(json!({
        "root": { "name": "acme/app", "npm": { "jquery": "^3.6" } },
        "packages": []
    }));

    // update regenerates the lock (via the stub's install side effect)...
    project.nab(&["update"]).assert().success();
    assert!(project.has_lock());

    // ...so the next plain install takes the reproducible path.
    project.nab(&["install"]).assert().success();

    let calls = project.npm_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].starts_with("ci "), "expected npm ci, got: {}", calls[1]);
}
