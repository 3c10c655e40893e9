// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             SynchgError (~24 bytes)
//!                     |
//!   +-------+-------+-------+-------+-------+
//!   |       |       |       |       |       |
//!   v       v       v       v       v       v
//!  Hg    Remote  Config  Process  Sync   Io/Other
//!  Box    Box     Box     Box     Box    Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Hg      CommandFailed{code}, IdentityParse, ListParse, MissingRemote
//!   Remote  TransportNotFound, Unreachable, InvalidArgument
//!   Config  ReadError, ParseError, MissingKey, InvalidValue
//!   Process SpawnFailed, NonZeroExit
//!   Sync    Aborted, RemoteUncommittedChanges
//! ```
//!
//! `SyncError::Aborted` is the cooperative cancellation raised when the user
//! declines a prompt. It is caught at the top level and is not a failure.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SynchgError`].
pub type SynchgResult<T> = std::result::Result<T, SynchgError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum SynchgError {
    /// Mercurial command or output error.
    #[error("hg error: {0}")]
    Hg(#[from] Box<HgError>),

    /// Remote-shell transport error.
    #[error("remote error: {0}")]
    Remote(#[from] Box<RemoteError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Sync stopped, either by the user or by a safety check.
    #[error("{0}")]
    Sync(#[from] Box<SyncError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl SynchgError {
    /// Returns true if the user declined a confirmation prompt.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Sync(e) if matches!(**e, SyncError::Aborted))
    }

    /// Returns the exit code of a failed hg command, if this is one.
    #[must_use]
    pub fn hg_exit_code(&self) -> Option<i32> {
        match self {
            Self::Hg(e) => match **e {
                HgError::CommandFailed { code, .. } => Some(code),
                _ => None,
            },
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SynchgError {
                fn from(err: $error) -> Self {
                    SynchgError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    HgError => Hg,
    RemoteError => Remote,
    ConfigError => Config,
    ProcessError => Process,
    SyncError => Sync,
    std::io::Error => Io,
}

// --- Hg Errors ---

/// Mercurial invocation and output errors.
#[derive(Debug, Error)]
pub enum HgError {
    /// hg exited with a code not recognised as a benign sentinel.
    #[error("`{command}` exited with code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// `hg id -i -b` output did not contain a revision and branch.
    #[error("could not parse current revision from hg id output: {output:?}")]
    IdentityParse { output: String },

    /// A list-style query returned fewer lines than its fixed header.
    #[error("unexpected output from `{command}`: {message}")]
    ListParse { command: String, message: String },

    /// A remote-directed operation was attempted on a local-only handle.
    #[error("{operation} requires a remote name, but this repository has none")]
    MissingRemote { operation: &'static str },
}

// --- Remote Errors ---

/// Remote-shell transport errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Neither the configured nor the platform default transport was found.
    #[error("remote shell program not found: '{program}'")]
    TransportNotFound { program: String },

    /// The connectivity probe failed.
    #[error("could not connect to {host} (exit code {code}): {stderr}")]
    Unreachable {
        host: String,
        code: i32,
        stderr: String,
    },

    /// An argument could not be quoted for the remote shell.
    #[error("cannot pass {argument:?} to the remote shell: {message}")]
    InvalidArgument { argument: String, message: String },

    /// A remote filesystem query returned an unexpected status.
    #[error("`{command}` on {host} exited with code {code}: {stderr}")]
    CommandFailed {
        host: String,
        command: String,
        code: i32,
        stderr: String,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// No per-user configuration directory could be determined.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a code outside its success set.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Failed to feed stdin or collect output.
    #[error("failed to communicate with process '{command}': {source}")]
    OutputError {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Sync Errors ---

/// Conditions that stop a sync without a tool failure.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The user declined a confirmation prompt.
    #[error("aborted by user")]
    Aborted,

    /// The remote working tree has uncommitted modifications.
    #[error("Remote repository has uncommitted changes")]
    RemoteUncommittedChanges,
}

/// Shorthand for the cancellation error.
#[must_use]
pub fn aborted() -> SynchgError {
    SyncError::Aborted.into()
}
