//! Cross-platform utilities for file operations and npm discovery.

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, safe_write};
pub use platform::{command_exists, is_windows, npm_program};
