//! Platform-specific helpers for locating the npm executable.
//!
//! NAB shells out to the system npm command rather than bundling a JavaScript
//! package manager, the same way cargo shells out to the system git. These
//! helpers pick the right executable name per platform and preflight its
//! availability before any subprocess is spawned.

/// Returns `true` when compiled for Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the platform-specific npm command name.
///
/// On Windows npm is installed as a `npm.cmd` shim, which `CreateProcess`
/// does not resolve from a bare `npm`. Unix platforms rely on PATH lookup.
///
/// This returns the command name, not a full path; the executable must still
/// be reachable through the PATH environment variable.
#[must_use]
pub const fn npm_program() -> &'static str {
    if is_windows() {
        "npm.cmd"
    } else {
        "npm"
    }
}

/// Checks whether a command is available in the system PATH.
///
/// # Examples
///
/// ```rust
/// use nab_cli::utils::platform::command_exists;
///
/// if !command_exists("npm") {
///     eprintln!("npm is not installed or not in PATH");
/// }
/// ```
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}
