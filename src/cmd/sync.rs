// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use tracing::debug;

use crate::cli::sync::SyncArgs;
use crate::config::Config;
use crate::error::Result;
use crate::hg::{LocalHg, RemoteHg, Repository};
use crate::remote;
use crate::sync::{AssumeYes, SyncTarget, TerminalPrompt, sync_remote};

/// Main handler for the sync command.
///
/// # Errors
///
/// Returns an error if the local path is not a repository, `hgroot` is not
/// configured, the host cannot be reached, or the sync fails or is declined.
pub fn run_sync_command(args: &SyncArgs, config: &Config) -> Result<()> {
    let requested = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let local_path = requested
        .canonicalize()
        .with_context(|| format!("cannot access local path '{}'", requested.display()))?;
    let name = match &args.name {
        Some(name) => name.clone(),
        None => default_name(&local_path)?,
    };
    let target = SyncTarget::new(args.host.as_str(), name, config.hgroot()?);
    debug!(local = %local_path.display(), remote = %target.remote_url(), "sync target");

    let mut local = Repository::new(LocalHg::new(&local_path, config.hg_program()))
        .with_remote_name(args.host.as_str());
    if !local.is_repository()? {
        bail!("'{}' is not a Mercurial repository", local_path.display());
    }

    let connection = remote::connect(&args.host, &config.ssh)?;
    let mut remote = Repository::new(RemoteHg::new(connection, target.remote_path()));

    if args.yes {
        sync_remote(&target, &mut local, &mut remote, &mut AssumeYes::stdout())?;
    } else {
        sync_remote(&target, &mut local, &mut remote, &mut TerminalPrompt::stdio())?;
    }
    Ok(())
}

/// Base name of the local repository directory.
///
/// # Errors
///
/// Returns an error for paths without a final component, such as `/`.
pub fn default_name(local_path: &Path) -> Result<String> {
    local_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| {
            format!(
                "cannot derive a repository name from '{}', pass --name",
                local_path.display()
            )
        })
}
