// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository handle.
//!
//! ```text
//! Repository<E: HgExecutor>
//!   exec          local or remote hg
//!   remote_name   push/pull target, None for a local-only handle
//!   identity      cached `hg id -i -b`, dropped by update/strip
//!   config        .hg/hgrc
//!   mq_config     .hg/patches/.hg/hgrc
//!
//! Runs with the patch queue popped (CleanMq):
//!   identity, outgoings, incomings, push_to_remote, strip, update, clone_to
//! ```
//!
//! Exit-code sentinels swallowed here:
//!
//! ```text
//! outgoing / incoming   1    nothing found
//! qapplied              1    nothing applied
//! qapplied              255  mq extension disabled
//! push --mq             1    nothing to push
//! commit --mq           1    nothing changed
//! ```

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::exec::HgExecutor;
use super::hgrc::RepoConfig;
use super::mq::CleanMq;
use super::parse::{
    self, CHANGESET_TEMPLATE, LIST_HEADER_LINES, parse_changesets, parse_identity, parse_summary,
};
use super::types::{AsRevision, Changeset, Identity, Summary};
use crate::error::{HgError, SynchgResult};

/// Metadata directory of a repository.
pub const HG_DIR: &str = ".hg";
/// Patch queue directory, relative to the repository root.
pub const PATCHES_DIR: &str = ".hg/patches";
/// Metadata directory of a versioned patch queue.
pub const PATCHES_HG_DIR: &str = ".hg/patches/.hg";
/// Main repository config.
pub const HGRC: &str = ".hg/hgrc";
/// Patch queue repository config.
pub const PATCHES_HGRC: &str = ".hg/patches/.hg/hgrc";

/// Commit message used when committing the patch queue.
pub const DEFAULT_MQ_MESSAGE: &str = "synchg: patch queue sync";

fn tolerate(result: SynchgResult<String>, codes: &[i32]) -> SynchgResult<Option<String>> {
    match result {
        Ok(output) => Ok(Some(output)),
        Err(e) if e.hg_exit_code().is_some_and(|code| codes.contains(&code)) => {
            debug!(code = ?e.hg_exit_code(), "tolerated hg exit code");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// A Mercurial repository reachable through an executor.
pub struct Repository<E: HgExecutor> {
    exec: E,
    remote_name: Option<String>,
    identity: Option<Identity>,
    config: RepoConfig,
    mq_config: RepoConfig,
}

impl<E: HgExecutor> Repository<E> {
    /// Creates a local-only handle.
    pub fn new(exec: E) -> Self {
        Self {
            exec,
            remote_name: None,
            identity: None,
            config: RepoConfig::new(HGRC),
            mq_config: RepoConfig::new(PATCHES_HGRC),
        }
    }

    /// Sets the remote used by push and outgoing/incoming queries.
    #[must_use]
    pub fn with_remote_name(mut self, name: impl Into<String>) -> Self {
        self.remote_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn exec(&self) -> &E {
        &self.exec
    }

    #[must_use]
    pub fn location(&self) -> String {
        self.exec.location()
    }

    fn require_remote(&self, operation: &'static str) -> SynchgResult<String> {
        self.remote_name
            .clone()
            .ok_or_else(|| HgError::MissingRemote { operation }.into())
    }

    // --- Scope ---

    /// Pops the patch queue until the returned guard is finished or dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch queue cannot be popped.
    pub fn clean_mq(&mut self) -> SynchgResult<CleanMq<'_, E>> {
        CleanMq::enter(self)
    }

    /// Runs `op` with the patch queue popped and re-applies it afterwards.
    ///
    /// # Errors
    ///
    /// Returns the first error from entering the scope, `op`, or restoring.
    pub fn with_clean_mq<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> SynchgResult<T>,
    ) -> SynchgResult<T> {
        let mut guard = self.clean_mq()?;
        let value = op(&mut *guard)?;
        guard.finish()?;
        Ok(value)
    }

    // --- Queries ---

    /// Parsed `hg summary`.
    ///
    /// # Errors
    ///
    /// Returns an error if hg fails.
    pub fn summary(&self) -> SynchgResult<Summary> {
        parse_summary(&self.exec.hg(&["summary"])?)
    }

    /// Revision and branch of the working copy with no patches applied.
    ///
    /// # Errors
    ///
    /// Returns `HgError::IdentityParse` if hg reports no usable identity.
    pub fn identity(&mut self) -> SynchgResult<Identity> {
        if let Some(identity) = &self.identity {
            return Ok(identity.clone());
        }
        let identity =
            self.with_clean_mq(|repo| parse_identity(&repo.exec.hg(&["id", "-i", "-b"])?))?;
        debug!(
            location = %self.exec.location(),
            revision = %identity.revision,
            branch = %identity.branch,
            "identity"
        );
        self.identity = Some(identity.clone());
        Ok(identity)
    }

    /// Working-copy revision (12 hex digits).
    ///
    /// # Errors
    ///
    /// See [`Repository::identity`].
    pub fn current_rev(&mut self) -> SynchgResult<String> {
        Ok(self.identity()?.revision)
    }

    /// Active branch.
    ///
    /// # Errors
    ///
    /// See [`Repository::identity`].
    pub fn branch(&mut self) -> SynchgResult<String> {
        Ok(self.identity()?.branch)
    }

    /// Changesets on the current branch up to the current revision that the
    /// remote lacks.
    ///
    /// # Errors
    ///
    /// Returns `HgError::MissingRemote` before running anything on a local-only
    /// handle, or any hg failure other than exit code 1.
    pub fn outgoings(&mut self) -> SynchgResult<Vec<Changeset>> {
        let remote = self.require_remote("outgoing")?;
        self.with_clean_mq(|repo| {
            let id = repo.identity()?;
            let args = [
                "outgoing",
                "-b",
                id.branch.as_str(),
                "-r",
                id.revision.as_str(),
                "--template",
                CHANGESET_TEMPLATE,
                remote.as_str(),
            ];
            repo.list_query(&args)
        })
    }

    /// Changesets on the current branch that the remote has and we lack.
    ///
    /// # Errors
    ///
    /// Same as [`Repository::outgoings`].
    pub fn incomings(&mut self) -> SynchgResult<Vec<Changeset>> {
        let remote = self.require_remote("incoming")?;
        self.with_clean_mq(|repo| {
            let id = repo.identity()?;
            let args = [
                "incoming",
                "-b",
                id.branch.as_str(),
                "--template",
                CHANGESET_TEMPLATE,
                remote.as_str(),
            ];
            repo.list_query(&args)
        })
    }

    fn list_query(&self, args: &[&str]) -> SynchgResult<Vec<Changeset>> {
        let command = format!("hg {}", args.first().copied().unwrap_or_default());
        match tolerate(self.exec.hg(args), &[1])? {
            Some(output) => parse_changesets(&output, LIST_HEADER_LINES, &command),
            None => Ok(Vec::new()),
        }
    }

    /// Top of the applied patch stack. Never changes it.
    ///
    /// Exit 255 means mq is disabled. Over ssh it is also the transport's
    /// own failure code, so a dropped connection here reads as no patch.
    ///
    /// # Errors
    ///
    /// Returns hg failures other than exit codes 1 and 255.
    pub fn last_applied_patch(&self) -> SynchgResult<Option<String>> {
        Ok(tolerate(self.exec.hg(&["qapplied"]), &[1, 255])?
            .and_then(|output| parse::parse_last_applied(&output)))
    }

    /// True if the root directory itself exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    pub fn root_exists(&self) -> SynchgResult<bool> {
        self.exec.exists(".")
    }

    /// True if `.hg` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    pub fn is_repository(&self) -> SynchgResult<bool> {
        self.exec.exists(HG_DIR)
    }

    /// True if `.hg/patches` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    pub fn has_patch_queue(&self) -> SynchgResult<bool> {
        self.exec.exists(PATCHES_DIR)
    }

    /// True if the patch queue is itself a repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    pub fn is_mq_versioned(&self) -> SynchgResult<bool> {
        self.exec.exists(PATCHES_HG_DIR)
    }

    // --- Mutations ---

    /// Pushes the current branch up to the current revision.
    ///
    /// # Errors
    ///
    /// Returns `HgError::MissingRemote` or any hg failure.
    pub fn push_to_remote(&mut self) -> SynchgResult<()> {
        let remote = self.require_remote("push")?;
        self.with_clean_mq(|repo| {
            let id = repo.identity()?;
            info!(location = %repo.exec.location(), remote = %remote, revision = %id.revision, "push");
            repo.exec.hg(&[
                "push",
                "-b",
                id.branch.as_str(),
                "-r",
                id.revision.as_str(),
                remote.as_str(),
            ])?;
            Ok(())
        })
    }

    /// Pushes the patch queue repository.
    ///
    /// # Errors
    ///
    /// Returns `HgError::MissingRemote` or hg failures other than exit code 1.
    pub fn push_mq_to_remote(&mut self) -> SynchgResult<()> {
        let remote = self.require_remote("push --mq")?;
        tolerate(self.exec.hg(&["push", "--mq", remote.as_str()]), &[1])?;
        Ok(())
    }

    /// Unapplies `patch` and everything above it, or all patches when `None`.
    /// Does nothing when no patch is applied.
    ///
    /// # Errors
    ///
    /// Returns any hg failure.
    pub fn pop_patch(&mut self, patch: Option<&str>) -> SynchgResult<()> {
        if self.last_applied_patch()?.is_none() {
            return Ok(());
        }
        match patch {
            Some(name) => self.exec.hg(&["qpop", name])?,
            None => self.exec.hg(&["qpop", "-a"])?,
        };
        Ok(())
    }

    /// Applies patches up to `patch`, or all when `None`.
    ///
    /// # Errors
    ///
    /// Returns any hg failure.
    pub fn push_patch(&mut self, patch: Option<&str>) -> SynchgResult<()> {
        match patch {
            Some(name) => self.exec.hg(&["qpush", name])?,
            None => self.exec.hg(&["qpush", "-a"])?,
        };
        Ok(())
    }

    /// Strips `changesets` in one command. Empty input does nothing.
    ///
    /// # Errors
    ///
    /// Returns any hg failure.
    pub fn strip(&mut self, changesets: &[Changeset]) -> SynchgResult<()> {
        if changesets.is_empty() {
            return Ok(());
        }
        self.with_clean_mq(|repo| {
            let mut args = vec!["strip"];
            args.extend(changesets.iter().map(|c| c.hash.as_str()));
            info!(location = %repo.exec.location(), count = changesets.len(), "strip");
            repo.exec.hg(&args)?;
            Ok(())
        })?;
        self.identity = None;
        Ok(())
    }

    /// Updates the working copy to `revision`.
    ///
    /// # Errors
    ///
    /// Returns any hg failure.
    pub fn update<R: AsRevision + ?Sized>(&mut self, revision: &R) -> SynchgResult<()> {
        let revision = revision.as_revision();
        self.with_clean_mq(|repo| {
            info!(location = %repo.exec.location(), revision = %revision, "update");
            repo.exec.hg(&["update", revision])?;
            Ok(())
        })?;
        self.identity = None;
        Ok(())
    }

    /// Updates the patch queue repository's working copy.
    ///
    /// # Errors
    ///
    /// Returns any hg failure.
    pub fn update_mq(&mut self) -> SynchgResult<()> {
        self.exec.hg(&["update", "--mq"])?;
        Ok(())
    }

    /// Folds working-tree changes into the top patch.
    ///
    /// # Errors
    ///
    /// Returns any hg failure.
    pub fn refresh_mq(&mut self) -> SynchgResult<()> {
        self.exec.hg(&["qrefresh"])?;
        Ok(())
    }

    /// Commits the patch queue repository.
    ///
    /// # Errors
    ///
    /// Returns hg failures other than exit code 1.
    pub fn commit_mq(&mut self, message: Option<&str>) -> SynchgResult<()> {
        let message = message.unwrap_or(DEFAULT_MQ_MESSAGE);
        tolerate(self.exec.hg(&["commit", "--mq", "-m", message]), &[1])?;
        Ok(())
    }

    /// Turns an existing `.hg/patches` into a repository.
    ///
    /// # Errors
    ///
    /// Returns any hg failure.
    pub fn init_mq(&mut self) -> SynchgResult<()> {
        self.exec.hg(&["qinit", "-c"])?;
        Ok(())
    }

    /// Clones this repository, and its patch queue if present, to `dest`.
    ///
    /// With `create_remote_link` and a remote name, records `dest` under that
    /// name in both hgrc files.
    ///
    /// # Errors
    ///
    /// Returns any hg or hgrc failure.
    pub fn clone_to(&mut self, dest: &str, create_remote_link: bool) -> SynchgResult<()> {
        let mq_dest = format!("{dest}/{PATCHES_DIR}");
        self.with_clean_mq(|repo| {
            info!(location = %repo.exec.location(), dest = %dest, "clone");
            repo.exec.hg(&["clone", ".", dest])?;

            let has_mq = repo.has_patch_queue()?;
            if has_mq {
                repo.exec.hg(&["clone", PATCHES_DIR, mq_dest.as_str()])?;
            }

            if create_remote_link && let Some(name) = repo.remote_name.clone() {
                repo.add_remote(&name, dest)?;
                if has_mq {
                    repo.add_mq_remote(&name, &mq_dest)?;
                }
            }
            Ok(())
        })
    }

    /// Clones only the patch queue repository to `<dest>/.hg/patches`.
    ///
    /// # Errors
    ///
    /// Returns any hg failure.
    pub fn clone_mq_to(&mut self, dest: &str) -> SynchgResult<()> {
        let mq_dest = format!("{dest}/{PATCHES_DIR}");
        info!(location = %self.exec.location(), dest = %mq_dest, "clone patch queue");
        self.exec.hg(&["clone", PATCHES_DIR, mq_dest.as_str()])?;
        Ok(())
    }

    // --- hgrc ---

    /// `[paths]` of `.hg/hgrc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the hgrc cannot be read or parsed.
    pub fn remotes(&mut self) -> SynchgResult<BTreeMap<String, String>> {
        self.config.remotes(&self.exec)
    }

    /// Sets `name = dest` in `.hg/hgrc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the hgrc cannot be read, parsed or written.
    pub fn add_remote(&mut self, name: &str, dest: &str) -> SynchgResult<()> {
        self.config.add_remote(&self.exec, name, dest)
    }

    /// `[paths]` of the patch queue's hgrc.
    ///
    /// # Errors
    ///
    /// Returns an error if the hgrc cannot be read or parsed.
    pub fn mq_remotes(&mut self) -> SynchgResult<BTreeMap<String, String>> {
        self.mq_config.remotes(&self.exec)
    }

    /// Sets `name = dest` in the patch queue's hgrc.
    ///
    /// # Errors
    ///
    /// Returns an error if the hgrc cannot be read, parsed or written.
    pub fn add_mq_remote(&mut self, name: &str, dest: &str) -> SynchgResult<()> {
        self.mq_config.add_remote(&self.exec, name, dest)
    }
}
