// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Executor seam between a repository handle and the machine it lives on.
//!
//! ```text
//!              HgExecutor
//!   hg(args) / exists / read_file / write_file
//!          |                      |
//!          v                      v
//!       LocalHg                RemoteHg
//!   ProcessBuilder(hg)     RemoteConnection::run(
//!   cwd = root               "cd <path> && HGPLAIN=1 hg <args>")
//!   HGPLAIN=1              test -e / cat / cat > <path>/<file>
//!   std::fs
//! ```
//!
//! A nonzero hg exit is reported as `HgError::CommandFailed` with the exact
//! code so callers can treat documented sentinels (1, 255) as outcomes.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{HgError, RemoteError, SynchgResult};
use crate::remote::{self, RemoteConnection};

/// Runs hg and touches repository-relative files for one repository.
pub trait HgExecutor {
    /// Runs `hg <args>` in the repository root and returns stdout.
    ///
    /// # Errors
    ///
    /// Returns `HgError::CommandFailed` on a nonzero exit, or a transport
    /// error if hg could not be started.
    fn hg(&self, args: &[&str]) -> SynchgResult<String>;

    /// Returns true if the repository-relative path exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the check itself cannot be performed.
    fn exists(&self, relative: &str) -> SynchgResult<bool>;

    /// Reads a repository-relative file; `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    fn read_file(&self, relative: &str) -> SynchgResult<Option<String>>;

    /// Replaces a repository-relative file's contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_file(&self, relative: &str, contents: &str) -> SynchgResult<()>;

    /// Human readable location for log messages.
    fn location(&self) -> String;
}

fn command_text(args: &[&str]) -> String {
    format!("hg {}", args.join(" "))
}

// --- LocalHg ---

/// hg in a directory on this machine.
#[derive(Debug, Clone)]
pub struct LocalHg {
    root: PathBuf,
    program: PathBuf,
}

impl LocalHg {
    /// Creates an executor for the repository at `root`.
    pub fn new(root: impl Into<PathBuf>, program: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            program: program.into(),
        }
    }

    /// Repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl HgExecutor for LocalHg {
    fn hg(&self, args: &[&str]) -> SynchgResult<String> {
        let output = ProcessBuilder::new(&self.program)
            .name("hg")
            .args(args)
            .cwd(&self.root)
            .env("HGPLAIN", "1")
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output()
            .run()?;

        if !output.success() {
            return Err(HgError::CommandFailed {
                command: command_text(args),
                code: output.exit_code(),
                stderr: output.stderr().trim().to_string(),
            }
            .into());
        }
        Ok(output.stdout().to_string())
    }

    fn exists(&self, relative: &str) -> SynchgResult<bool> {
        Ok(self.root.join(relative).exists())
    }

    fn read_file(&self, relative: &str) -> SynchgResult<Option<String>> {
        let path = self.root.join(relative);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_file(&self, relative: &str, contents: &str) -> SynchgResult<()> {
        let path = self.root.join(relative);
        debug!(path = %path.display(), "write");
        std::fs::write(&path, contents)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

// --- RemoteHg ---

/// hg in a directory on a remote host, driven through a remote shell.
pub struct RemoteHg {
    connection: Box<dyn RemoteConnection>,
    path: String,
}

impl RemoteHg {
    /// Creates an executor for the repository at `path` on the connection's host.
    ///
    /// Relative paths start at the remote login directory.
    pub fn new(connection: Box<dyn RemoteConnection>, path: impl Into<String>) -> Self {
        Self {
            connection,
            path: path.into(),
        }
    }

    /// Remote repository path as given.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Builds `cd <root> && <command>` with `root` quoted for the remote shell.
    fn in_root(&self, command: &str) -> SynchgResult<String> {
        Ok(format!("cd {} && {command}", shell_path(&self.path)?))
    }

    /// Quoted `<root>/<relative>`; file operations must not depend on `cd`.
    fn target(&self, relative: &str) -> SynchgResult<String> {
        let root = self.path.trim_end_matches('/');
        let root = if root.is_empty() {
            String::new()
        } else {
            shell_path(root)?
        };
        Ok(format!("{root}/{}", remote::quote(relative)?))
    }
}

/// Quotes a remote path, leaving a leading `~/` to the remote shell.
///
/// # Errors
///
/// Returns `RemoteError::InvalidArgument` if the path cannot be quoted.
pub fn shell_path(path: &str) -> SynchgResult<String> {
    if path == "~" {
        return Ok(path.to_string());
    }
    match path.strip_prefix("~/") {
        Some(rest) if rest.is_empty() => Ok("~/".to_string()),
        Some(rest) => Ok(format!("~/{}", remote::quote(rest)?)),
        None => remote::quote(path),
    }
}

impl HgExecutor for RemoteHg {
    fn hg(&self, args: &[&str]) -> SynchgResult<String> {
        let line = self.in_root(&format!("HGPLAIN=1 hg {}", remote::join(args.iter().copied())?))?;
        let output = self.connection.run(&line, None)?;

        if !output.success() {
            return Err(HgError::CommandFailed {
                command: command_text(args),
                code: output.exit_code(),
                stderr: output.stderr().trim().to_string(),
            }
            .into());
        }
        Ok(output.stdout().to_string())
    }

    fn exists(&self, relative: &str) -> SynchgResult<bool> {
        let line = format!("test -e {}", self.target(relative)?);
        let output = self.connection.run(&line, None)?;
        match output.exit_code() {
            0 => Ok(true),
            1 => Ok(false),
            code => Err(RemoteError::CommandFailed {
                host: self.connection.host().to_string(),
                command: line,
                code,
                stderr: output.stderr().trim().to_string(),
            }
            .into()),
        }
    }

    fn read_file(&self, relative: &str) -> SynchgResult<Option<String>> {
        if !self.exists(relative)? {
            return Ok(None);
        }
        let line = format!("cat {}", self.target(relative)?);
        let output = self.connection.run(&line, None)?;
        if !output.success() {
            return Err(RemoteError::CommandFailed {
                host: self.connection.host().to_string(),
                command: line,
                code: output.exit_code(),
                stderr: output.stderr().trim().to_string(),
            }
            .into());
        }
        Ok(Some(output.stdout().to_string()))
    }

    fn write_file(&self, relative: &str, contents: &str) -> SynchgResult<()> {
        let line = format!("cat > {}", self.target(relative)?);
        let output = self.connection.run(&line, Some(contents))?;
        if !output.success() {
            return Err(RemoteError::CommandFailed {
                host: self.connection.host().to_string(),
                command: line,
                code: output.exit_code(),
                stderr: output.stderr().trim().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn location(&self) -> String {
        format!("{}:{}", self.connection.host(), self.path)
    }
}
