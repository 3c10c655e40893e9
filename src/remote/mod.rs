// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote-shell transport.
//!
//! ```text
//!        connect(host, &SshSettings)
//!                  |
//!      program = settings.program
//!             or platform default
//!                  |
//!        +---------+---------+
//!        v                   v
//!   SshConnection      PlinkConnection
//!   ssh -T [opts]      plink -ssh -batch -T [opts]
//!   <host> <cmd>       <host> <cmd>
//!        |                   |
//!        '--------+----------'
//!                 v
//!       RemoteConnection::run()
//!       (one blocking ProcessBuilder)
//! ```
//!
//! Remote command lines are single strings interpreted by the remote login
//! shell. Build them with [`quote`] and [`join`].

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::SshSettings;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{RemoteError, SynchgResult};

#[cfg(windows)]
const DEFAULT_PROGRAM: &str = "plink";
#[cfg(not(windows))]
const DEFAULT_PROGRAM: &str = "ssh";

/// A shell session target that can run command lines on a remote host.
pub trait RemoteConnection {
    /// Host name as given on the command line.
    fn host(&self) -> &str;

    /// Builds the local process that runs `remote_command` on the host.
    fn command(&self, remote_command: &str) -> ProcessBuilder;

    /// Runs `remote_command` on the host and returns its output whatever the
    /// exit code. Callers decide which codes are failures.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the transport cannot be spawned.
    fn run(&self, remote_command: &str, stdin: Option<&str>) -> SynchgResult<ProcessOutput> {
        debug!(host = %self.host(), cmd = %remote_command, "remote exec");
        let mut builder = self
            .command(remote_command)
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output();
        if let Some(content) = stdin {
            builder = builder.stdin(content);
        }
        Ok(builder.run()?)
    }
}

/// OpenSSH client transport.
#[derive(Debug, Clone)]
pub struct SshConnection {
    program: PathBuf,
    host: String,
    options: Vec<String>,
}

impl SshConnection {
    pub fn new(program: impl Into<PathBuf>, host: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            program: program.into(),
            host: host.into(),
            options,
        }
    }
}

impl RemoteConnection for SshConnection {
    fn host(&self) -> &str {
        &self.host
    }

    fn command(&self, remote_command: &str) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .name("ssh")
            .arg("-T")
            .args(&self.options)
            .arg(&self.host)
            .arg(remote_command)
    }
}

/// `PuTTY` command-line transport.
#[derive(Debug, Clone)]
pub struct PlinkConnection {
    program: PathBuf,
    host: String,
    options: Vec<String>,
}

impl PlinkConnection {
    pub fn new(program: impl Into<PathBuf>, host: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            program: program.into(),
            host: host.into(),
            options,
        }
    }
}

impl RemoteConnection for PlinkConnection {
    fn host(&self) -> &str {
        &self.host
    }

    fn command(&self, remote_command: &str) -> ProcessBuilder {
        ProcessBuilder::new(&self.program)
            .name("plink")
            .args(["-ssh", "-batch", "-T"])
            .args(&self.options)
            .arg(&self.host)
            .arg(remote_command)
    }
}

/// Returns true if `program` names the `PuTTY` client.
fn is_plink(program: &std::path::Path) -> bool {
    program
        .file_stem()
        .is_some_and(|stem| stem.to_string_lossy().eq_ignore_ascii_case("plink"))
}

/// Builds the transport for `host` without contacting it.
///
/// The program comes from `settings.program` or the platform default
/// (`plink` on Windows, `ssh` elsewhere). Bare names are resolved via PATH.
///
/// # Errors
///
/// Returns `RemoteError::TransportNotFound` if the program cannot be resolved.
pub fn transport(host: &str, settings: &SshSettings) -> SynchgResult<Box<dyn RemoteConnection>> {
    let requested = settings
        .program
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM));

    let program = if requested.components().count() > 1 || requested.is_absolute() {
        requested
    } else {
        let name = requested.to_string_lossy();
        ProcessBuilder::find(&name).ok_or_else(|| RemoteError::TransportNotFound {
            program: name.to_string(),
        })?
    };

    let options = settings.options.clone();
    let connection: Box<dyn RemoteConnection> = if is_plink(&program) {
        Box::new(PlinkConnection::new(program, host, options))
    } else {
        Box::new(SshConnection::new(program, host, options))
    };
    Ok(connection)
}

/// Opens a connection to `host` and checks that it answers.
///
/// # Errors
///
/// Returns `RemoteError::TransportNotFound` if no transport program is found
/// and `RemoteError::Unreachable` if the probe command fails.
pub fn connect(host: &str, settings: &SshSettings) -> SynchgResult<Box<dyn RemoteConnection>> {
    let connection = transport(host, settings)?;
    probe(connection.as_ref())?;
    info!(host = %host, "connected");
    Ok(connection)
}

/// Runs `true` on the host.
///
/// # Errors
///
/// Returns `RemoteError::Unreachable` on a nonzero exit.
pub fn probe(connection: &dyn RemoteConnection) -> SynchgResult<()> {
    let output = connection.run("true", None)?;
    if output.success() {
        return Ok(());
    }
    Err(RemoteError::Unreachable {
        host: connection.host().to_string(),
        code: output.exit_code(),
        stderr: output.stderr().trim().to_string(),
    }
    .into())
}

/// Quotes one word for a POSIX remote shell.
///
/// # Errors
///
/// Returns `RemoteError::InvalidArgument` if the word contains a NUL byte.
pub fn quote(word: &str) -> SynchgResult<String> {
    shlex::try_quote(word)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| {
            RemoteError::InvalidArgument {
                argument: word.to_string(),
                message: e.to_string(),
            }
            .into()
        })
}

/// Quotes and joins words into one remote command line.
///
/// # Errors
///
/// Returns `RemoteError::InvalidArgument` if any word contains a NUL byte.
pub fn join<'a>(words: impl IntoIterator<Item = &'a str>) -> SynchgResult<String> {
    let words: Vec<&str> = words.into_iter().collect();
    shlex::try_join(words.iter().copied()).map_err(|e| {
        RemoteError::InvalidArgument {
            argument: words.join(" "),
            message: e.to_string(),
        }
        .into()
    })
}
