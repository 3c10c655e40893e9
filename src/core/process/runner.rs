// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//!          run()
//!            |
//!            v
//!     build_command()
//!     args, cwd, env, stdio
//!            |
//!            v
//!   spawn() -> write stdin -> wait_with_output()
//!            |
//!            v
//!    forward / keep lines
//!            |
//!            v
//!    validate exit_code
//!    (skip if ALLOW_FAILURE)
//!            |
//!            v
//!      ProcessOutput
//!  { exit_code, stdout, stderr }
//! ```
//!
//! Execution is blocking: exactly one child runs at a time and the caller
//! waits for it to exit.

use std::io::Write as _;
use std::process::{Command, Stdio};
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - Writing stdin or collecting output fails.
    /// - The process exits with a code outside the success set (and
    ///   `ALLOW_FAILURE` is not set).
    pub fn run(self) -> Result<ProcessOutput, ProcessError> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        trace!(process = %name, pid = child.id(), "spawned");

        if let Some(content) = self.stdin_content()
            && let Some(mut stdin) = child.stdin.take()
        {
            stdin
                .write_all(content.as_bytes())
                .map_err(|source| ProcessError::OutputError {
                    command: cmd_line.clone(),
                    source,
                })?;
            // stdin is dropped here so the child sees EOF
        }

        let raw = child
            .wait_with_output()
            .map_err(|source| ProcessError::OutputError {
                command: cmd_line.clone(),
                source,
            })?;

        let output = ProcessOutput::new(
            raw.status.code().unwrap_or(-1),
            collect_stream(&raw.stdout, self.stdout_config(), &name, "stdout"),
            collect_stream(&raw.stderr, self.stderr_config(), &name, "stderr"),
        );

        if !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE)
            && !self.success_code_set().contains(&output.exit_code())
        {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
                stderr: output.stderr().trim().to_string(),
            });
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Builds the std Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        for (key, value) in self.environment() {
            command.env(key, value);
        }

        if self.stdin_content().is_some() {
            command.stdin(Stdio::piped());
        } else {
            command.stdin(Stdio::null());
        }

        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        command
    }
}

/// Forwards and/or keeps the lines of a finished stream.
fn collect_stream(bytes: &[u8], flags: StreamFlags, process_name: &str, stream: &str) -> String {
    if flags.is_empty() {
        return String::new();
    }

    let text = String::from_utf8_lossy(bytes);
    if flags.contains(StreamFlags::FORWARD_TO_LOG) {
        for line in text.lines() {
            trace!(process = %process_name, stream = %stream, line = %line, "output");
        }
    }

    if flags.contains(StreamFlags::KEEP_IN_STRING) {
        text.into_owned()
    } else {
        String::new()
    }
}
