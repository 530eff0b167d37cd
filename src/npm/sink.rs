//! Output sinks for subprocess stream passthrough.
//!
//! The executor forwards every chunk of npm's standard output and standard
//! error verbatim to a caller-supplied sink, one method per stream. Passing
//! the sink in (rather than writing to ambient stdout/stderr) is what lets
//! tests capture and assert on subprocess output without process-global
//! redirection.

use std::io::Write;

/// Destination for subprocess output streams.
///
/// Implementations must be `Send + Sync`: the executor pumps stdout and
/// stderr from separate tasks. Chunks arrive verbatim and in arrival order
/// per stream; no buffering or reordering is applied on top of what the
/// underlying pipes guarantee.
pub trait OutputSink: Send + Sync {
    /// Write a chunk of the subprocess's standard output (the "info" stream).
    fn write_out(&self, chunk: &str);

    /// Write a chunk of the subprocess's standard error (the "error" stream).
    fn write_err(&self, chunk: &str);
}

/// Sink that forwards to the current process's stdout and stderr.
///
/// Each chunk is flushed immediately so npm's progress output appears live
/// rather than on process exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioSink;

impl OutputSink for StdioSink {
    fn write_out(&self, chunk: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        let _ = handle.write_all(chunk.as_bytes());
        let _ = handle.flush();
    }

    fn write_err(&self, chunk: &str) {
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = handle.write_all(chunk.as_bytes());
        let _ = handle.flush();
    }
}
