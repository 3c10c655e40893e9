// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Host to sync to. Also the name of the remote in `.hg/hgrc`.
    #[arg(value_name = "REMOTE_HOST")]
    pub host: String,

    /// Local repository. Defaults to the current directory.
    #[arg(value_name = "LOCAL_PATH")]
    pub path: Option<PathBuf>,

    /// Repository name under the remote root. Defaults to the local
    /// directory's name.
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Answers yes to every question.
    #[arg(short = 'y', long)]
    pub yes: bool,
}
