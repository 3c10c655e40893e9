// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync orchestration between a local repository and its remote copy.
//!
//! ```text
//! sync_remote(target, local, remote, console)
//!   |
//!   +-- prepare
//!   |     .hg/patches unversioned      -> qinit -c, commit --mq
//!   |     remote root missing          -> ask, clone (+ links)
//!   |     [paths] <host> missing       -> add to .hg/hgrc (+ mq hgrc)
//!   |     remote has no patch queue    -> clone .hg/patches
//!   |
//!   +-- do_sync
//!         remote modified files        -> SyncError
//!         local modified files         -> ask: qrefresh / ignore
//!         remote qpop -a
//!         local patches popped {
//!             outgoing empty           -> skip
//!             incoming non-empty       -> list, ask, remote strip
//!             push
//!         }
//!         remote update <local rev>
//!         local patch applied          -> commit --mq, push --mq,
//!                                         remote update --mq, qpush <top>
//! ```
//!
//! Nothing is rolled back: a failure or a declined prompt leaves every step
//! already taken in place.

pub mod confirm;


use tracing::{debug, info};

use crate::error::{SyncError, SynchgResult, aborted};
use crate::hg::repo::PATCHES_DIR;
use crate::hg::{HgExecutor, Repository};

pub use confirm::{AssumeYes, Confirm, TerminalPrompt, require};

/// Printed when the user declines to deal with local changes.
const DEAL_WITH_CHANGES: &str = "Ok.  Please run again after dealing with changes.";

/// Where a repository is synced to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    /// Host name, also used as the `[paths]` entry name.
    pub host: String,
    /// Repository name under the remote root.
    pub name: String,
    /// Remote directory holding synced repositories.
    pub remote_root: String,
}

impl SyncTarget {
    pub fn new(
        host: impl Into<String>,
        name: impl Into<String>,
        remote_root: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            name: name.into(),
            remote_root: remote_root.into(),
        }
    }

    /// `<root>/<name>` as seen by the remote shell.
    #[must_use]
    pub fn remote_path(&self) -> String {
        format!("{}/{}", self.remote_root.trim_end_matches('/'), self.name)
    }

    /// hg URL of the remote repository.
    #[must_use]
    pub fn remote_url(&self) -> String {
        format!("ssh://{}/{}", self.host, self.remote_path())
    }

    /// hg URL of the remote patch queue repository.
    #[must_use]
    pub fn remote_mq_url(&self) -> String {
        format!("{}/{PATCHES_DIR}", self.remote_url())
    }
}

/// Brings the remote repository in line with the local one.
///
/// `local` must carry `target.host` as its remote name; `remote` is rooted at
/// [`SyncTarget::remote_path`].
///
/// # Errors
///
/// Returns `SyncError::Aborted` when a prompt is declined,
/// `SyncError::RemoteUncommittedChanges` when the remote working tree is
/// dirty, and any hg, transport or hgrc failure unchanged.
pub fn sync_remote<L, R, C>(
    target: &SyncTarget,
    local: &mut Repository<L>,
    remote: &mut Repository<R>,
    console: &mut C,
) -> SynchgResult<()>
where
    L: HgExecutor,
    R: HgExecutor,
    C: Confirm + ?Sized,
{
    console.say(&format!("Sync {} -> {}", target.name, target.host));
    info!(
        host = %target.host,
        name = %target.name,
        path = %target.remote_path(),
        "sync"
    );

    prepare(target, local, remote, console)?;
    do_sync(local, remote, console)
}

/// Makes sure both sides exist and know about each other.
fn prepare<L, R, C>(
    target: &SyncTarget,
    local: &mut Repository<L>,
    remote: &mut Repository<R>,
    console: &mut C,
) -> SynchgResult<()>
where
    L: HgExecutor,
    R: HgExecutor,
    C: Confirm + ?Sized,
{
    let has_mq = local.has_patch_queue()?;
    if has_mq && !local.is_mq_versioned()? {
        info!(location = %local.location(), "versioning patch queue");
        local.init_mq()?;
        local.commit_mq(None)?;
    }

    let url = target.remote_url();
    if !remote.root_exists()? {
        console.say("Remote repository can't be found.");
        require(console, "Do you want to create a clone?")?;
        local.clone_to(&url, true)?;
    }

    if !local.remotes()?.contains_key(&target.host) {
        local.add_remote(&target.host, &url)?;
    }

    if has_mq {
        if !local.mq_remotes()?.contains_key(&target.host) {
            local.add_mq_remote(&target.host, &target.remote_mq_url())?;
        }
        if !remote.has_patch_queue()? {
            local.clone_mq_to(&url)?;
        }
    }
    Ok(())
}

fn do_sync<L, R, C>(
    local: &mut Repository<L>,
    remote: &mut Repository<R>,
    console: &mut C,
) -> SynchgResult<()>
where
    L: HgExecutor,
    R: HgExecutor,
    C: Confirm + ?Sized,
{
    if remote.summary()?.commit.modified > 0 {
        return Err(SyncError::RemoteUncommittedChanges.into());
    }

    let summary = local.summary()?;
    if summary.commit.modified > 0 {
        console.say("Local repository has uncommitted changes.");
        if summary.mq.applied > 0 {
            if !console.confirm("Do you want to refresh the current patch?")? {
                console.say(DEAL_WITH_CHANGES);
                return Err(aborted());
            }
            local.refresh_mq()?;
        } else if !console.confirm("Do you want to ignore these changes?")? {
            console.say(DEAL_WITH_CHANGES);
            return Err(aborted());
        }
    }

    remote.pop_patch(None)?;

    local.with_clean_mq(|local| {
        if local.outgoings()?.is_empty() {
            debug!("nothing outgoing");
            return Ok(());
        }

        let incomings = local.incomings()?;
        if !incomings.is_empty() {
            console.say("Changesets will be stripped from remote:");
            for changeset in &incomings {
                console.say(&format!("  {}", changeset.display_line()));
            }
            require(console, "Do you want to continue?")?;
            remote.strip(&incomings)?;
        }

        console.say("Pushing to remote");
        local.push_to_remote()
    })?;

    console.say("Updating remote");
    let revision = local.current_rev()?;
    remote.update(&revision)?;

    if let Some(patch) = local.last_applied_patch()? {
        console.say("Syncing mq repos");
        local.commit_mq(None)?;
        local.push_mq_to_remote()?;

        console.say("Updating remote mq repo");
        remote.update_mq()?;
        remote.push_patch(Some(&patch))?;
    }

    console.say("Ok!");
    Ok(())
}
