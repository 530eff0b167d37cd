//! Builder for executing npm commands with streaming output and timeout.
//!
//! This module provides [`NpmCommand`], a builder that wraps subprocess
//! execution of the system npm binary. It handles working-directory
//! placement, timeout enforcement, and verbatim passthrough of the child's
//! output streams to a caller-supplied [`OutputSink`] in a unified way.
//!
//! # Execution Contract
//!
//! - The full command line is echoed to the info sink before the child starts.
//! - Every chunk of child stdout goes to the info sink and every chunk of
//!   child stderr to the error sink, in arrival order per stream.
//! - A nonzero exit code is a **normal return value** ([`CommandExit`]), not
//!   an error; the caller decides whether it is fatal.
//! - A child that outlives the timeout is killed and reported as
//!   `timed_out: true`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nab_cli::npm::command_builder::NpmCommand;
//! use nab_cli::npm::sink::StdioSink;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let exit = NpmCommand::new(Arc::new(StdioSink))
//!     .args(["ci", "--loglevel", "error"])
//!     .current_dir("/path/to/project")
//!     .with_timeout(Some(Duration::from_secs(60)))
//!     .execute()
//!     .await?;
//!
//! if !exit.success() {
//!     eprintln!("npm failed");
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::constants::DEFAULT_NPM_TIMEOUT_SECS;
use crate::core::NabError;
use crate::utils::platform::npm_program;

use super::sink::OutputSink;

/// Terminal state of an executed command.
///
/// Carries the raw exit code (or `None` when the child was killed by a
/// signal) and whether the timeout fired. Mapping either condition to a
/// typed failure is the caller's decision.
#[derive(Debug, Clone, Copy)]
pub struct CommandExit {
    /// Exit code reported by the child, if it exited normally
    pub code: Option<i32>,
    /// Whether the child was killed after exceeding the timeout
    pub timed_out: bool,
}

impl CommandExit {
    /// True when the child exited on its own with code zero.
    #[must_use]
    pub fn success(&self) -> bool {
        !self.timed_out && self.code == Some(0)
    }
}

/// Builder for npm command execution.
///
/// Defaults to the platform npm executable and the default timeout; both can
/// be overridden, which is how tests substitute a stub binary.
pub struct NpmCommand {
    /// Program to execute (the platform npm binary unless overridden)
    program: String,
    /// Arguments to pass to the program
    args: Vec<String>,
    /// Working directory for the child process
    current_dir: Option<PathBuf>,
    /// Maximum duration to wait for completion (None = no timeout)
    timeout_duration: Option<Duration>,
    /// Destination for the child's output streams
    sink: Arc<dyn OutputSink>,
}

impl NpmCommand {
    /// Create a new command targeting the platform npm executable.
    #[must_use]
    pub fn new(sink: Arc<dyn OutputSink>) -> Self {
        Self {
            program: npm_program().to_string(),
            args: Vec::new(),
            current_dir: None,
            timeout_duration: Some(Duration::from_secs(DEFAULT_NPM_TIMEOUT_SECS)),
            sink,
        }
    }

    /// Override the executed program.
    ///
    /// Used by tests to point at a stub executable; production code always
    /// runs the platform npm binary.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Add a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the child process.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set a custom timeout for the command (None for no timeout).
    #[must_use]
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Execute the command, streaming output to the sink.
    ///
    /// # Errors
    ///
    /// Only spawn-level failures are errors: [`NabError::NpmNotFound`] when
    /// the program does not exist, or an I/O error wiring up the pipes. A
    /// nonzero exit or a timeout is reported through [`CommandExit`].
    pub async fn execute(self) -> Result<CommandExit> {
        let start = std::time::Instant::now();
        let command_line = self.command_line();

        // Echo the command line before starting, like the child's own output.
        self.sink.write_out(&format!("{command_line}\n"));
        tracing::debug!(target: "npm", "Executing command: {command_line}");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::Error::new(NabError::NpmNotFound)
            } else {
                anyhow::Error::new(e).context(format!("Failed to execute {command_line}"))
            }
        })?;

        let stdout = child.stdout.take().context("child stdout was not captured")?;
        let stderr = child.stderr.take().context("child stderr was not captured")?;

        let out_pump = spawn_pump(stdout, Arc::clone(&self.sink), false);
        let err_pump = spawn_pump(stderr, Arc::clone(&self.sink), true);

        let status = if let Some(duration) = self.timeout_duration {
            match timeout(duration, child.wait()).await {
                Ok(result) => result.with_context(|| format!("Failed to wait on {command_line}"))?,
                Err(_) => {
                    tracing::warn!(
                        target: "npm",
                        "Command timed out after {} seconds: {command_line}",
                        duration.as_secs()
                    );
                    child.kill().await.ok();
                    // Killing the child closes its pipes, so the pumps drain
                    // whatever was already written and finish.
                    out_pump.await.ok();
                    err_pump.await.ok();
                    return Ok(CommandExit {
                        code: None,
                        timed_out: true,
                    });
                }
            }
        } else {
            child.wait().await.with_context(|| format!("Failed to wait on {command_line}"))?
        };

        // Drain both streams fully before reporting completion.
        out_pump.await.ok();
        err_pump.await.ok();

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "npm::perf",
                "npm {} took {:.2}s",
                self.args.first().map_or("<none>", String::as_str),
                elapsed.as_secs_f64()
            );
        }

        tracing::debug!(
            target: "npm",
            "Command completed with exit code: {:?}",
            status.code()
        );

        Ok(CommandExit {
            code: status.code(),
            timed_out: false,
        })
    }

    fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Pump a child stream to the sink chunk-by-chunk until EOF.
fn spawn_pump<R>(mut reader: R, sink: Arc<dyn OutputSink>, is_stderr: bool) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = [0u8; 8192];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]);
                    if is_stderr {
                        sink.write_err(&chunk);
                    } else {
                        sink.write_out(&chunk);
                    }
                }
            }
        }
    })
}
