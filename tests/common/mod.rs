//! Shared test utilities for the integration suite.
//!
//! Provides [`TestProject`], a temporary project directory with helpers for
//! writing resolver snapshots, planting a stub `npm` executable on a
//! prepended PATH, and invoking the real `nab` binary against it.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory the `nab` binary runs against.
pub struct TestProject {
    dir: TempDir,
    stub_bin: Option<PathBuf>,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp project"),
            stub_bin: None,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write the resolver snapshot consumed by `nab`.
    pub fn write_snapshot(&self, snapshot: serde_json::Value) {
        let content = serde_json::to_string_pretty(&snapshot).unwrap();
        fs::write(self.path().join("installed.json"), content).unwrap();
    }

    /// Write a pre-existing manifest.
    pub fn write_manifest(&self, content: &str) {
        fs::write(self.path().join("package.json"), content).unwrap();
    }

    /// Create an (opaque) lock artifact.
    pub fn write_lock(&self) {
        fs::write(self.path().join("package-lock.json"), "{}\n").unwrap();
    }

    pub fn manifest(&self) -> String {
        fs::read_to_string(self.path().join("package.json")).unwrap()
    }

    pub fn has_manifest(&self) -> bool {
        self.path().join("package.json").exists()
    }

    pub fn has_lock(&self) -> bool {
        self.path().join("package-lock.json").exists()
    }

    /// Plant a stub `npm` on a bin dir that [`Self::nab`] prepends to PATH.
    ///
    /// The stub records each invocation's argv (one line per call) and, like
    /// the real tool, creates the lock artifact when asked to `install`.
    #[cfg(unix)]
    pub fn install_stub_npm(&mut self) {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.path().join("stub-bin");
        fs::create_dir_all(&bin).unwrap();

        let stub = bin.join("npm");
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> \"{log}\"\ncase \"$1\" in install) touch package-lock.json;; esac\n",
            log = self.path().join("npm-args.log").display()
        );
        fs::write(&stub, script).unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

        self.stub_bin = Some(bin);
    }

    /// Argv lines recorded by the stub npm, one per invocation.
    pub fn npm_calls(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("npm-args.log"))
            .map(|content| content.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Build a `nab` command pointed at this project.
    pub fn nab(&self, args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("nab").expect("nab binary");
        cmd.args(args).arg("--project-dir").arg(self.path());

        if let Some(ref bin) = self.stub_bin {
            let path = std::env::var("PATH").unwrap_or_default();
            cmd.env("PATH", format!("{}:{path}", bin.display()));
        }

        cmd
    }
}
