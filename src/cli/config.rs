// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command arguments.
//!
//! ```text
//! config                 → asks for hgroot, saves
//! config --hgroot PATH   → saves without asking
//! config --show          → prints sources and values
//! ```

use clap::Args;

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Remote directory under which repositories are kept. Relative paths
    /// start at the remote login directory.
    #[arg(long, value_name = "PATH", conflicts_with = "show")]
    pub hgroot: Option<String>,

    /// Prints the loaded configuration instead of changing it.
    #[arg(long)]
    pub show: bool,
}
