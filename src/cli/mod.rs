// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for synchg-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! synchg [global options] <command>
//! sync <remote-host> [local-path] [-n NAME] [-y]
//! config [--hgroot PATH | --show]
//! version
//! ```

pub mod config;
pub mod global;
pub mod sync;


use crate::cli::config::ConfigArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::sync::SyncArgs;
use clap::{Parser, Subcommand};

/// Mercurial Remote Sync Tool
///
/// Mirrors a local Mercurial repository and its patch queue onto a remote
/// host over SSH.
#[derive(Debug, Parser)]
#[command(
    name = "synchg",
    author,
    version,
    about = "Sync a Mercurial repository and its patch queue to a remote host",
    long_about = "synchg-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Makes a remote copy of a Mercurial repository match the local\n\
                  one: pushes outgoing changesets, strips remote-only ones after\n\
                  asking, updates the remote working copy and carries the applied\n\
                  mq patch across.\n\n\
                  Run `synchg config` once to set the remote root directory, then\n\
                  `synchg sync <host>` from inside a repository.",
    after_help = "CONFIGURATION:\n\n\
                  The remote root (hgroot) is read from synchg.toml in the user\n\
                  configuration directory, or from the file given with\n\
                  --config-file. SYNCHG_* environment variables override file\n\
                  values, e.g. SYNCHG_HGROOT=src or SYNCHG_SSH_PROGRAM=plink."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Syncs a repository to a remote host.
    Sync(SyncArgs),

    /// Sets or shows the per-user configuration.
    Config(ConfigArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
