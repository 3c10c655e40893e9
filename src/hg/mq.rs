// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scope with the patch queue popped.
//!
//! ```text
//!   enter:  top = qapplied.last
//!           top.is_some() => qpop -a
//!              |
//!              v
//!     (Deref to Repository, patches unapplied)
//!              |
//!   finish() or Drop:
//!           top.is_some() => qpush <top>
//! ```
//!
//! `finish` reports a failed restore; `Drop` covers early returns and logs.
//! A scope entered while nothing is applied records nothing, so nesting is
//! harmless.

use std::ops::{Deref, DerefMut};

use tracing::{debug, error};

use super::exec::HgExecutor;
use super::repo::Repository;
use crate::error::SynchgResult;

/// Guard that keeps the patch queue popped while alive.
pub struct CleanMq<'a, E: HgExecutor> {
    repo: &'a mut Repository<E>,
    restore: Option<String>,
}

impl<'a, E: HgExecutor> CleanMq<'a, E> {
    /// Pops all patches, remembering the top one.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch state cannot be read or popped.
    pub fn enter(repo: &'a mut Repository<E>) -> SynchgResult<Self> {
        let restore = repo.last_applied_patch()?;
        if let Some(patch) = &restore {
            debug!(location = %repo.location(), patch = %patch, "unapplying patches");
            repo.exec().hg(&["qpop", "-a"])?;
        }
        Ok(Self { repo, restore })
    }

    /// Patch that will be pushed back on exit.
    #[must_use]
    pub fn restores(&self) -> Option<&str> {
        self.restore.as_deref()
    }

    /// Leaves the scope, pushing the recorded patch back.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch cannot be re-applied.
    pub fn finish(mut self) -> SynchgResult<()> {
        match self.restore.take() {
            Some(patch) => self.repo.push_patch(Some(&patch)),
            None => Ok(()),
        }
    }
}

impl<E: HgExecutor> Deref for CleanMq<'_, E> {
    type Target = Repository<E>;

    fn deref(&self) -> &Self::Target {
        self.repo
    }
}

impl<E: HgExecutor> DerefMut for CleanMq<'_, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.repo
    }
}

impl<E: HgExecutor> Drop for CleanMq<'_, E> {
    fn drop(&mut self) {
        if let Some(patch) = self.restore.take()
            && let Err(e) = self.repo.push_patch(Some(&patch))
        {
            error!(
                location = %self.repo.location(),
                patch = %patch,
                error = %e,
                "failed to re-apply patch queue"
            );
        }
    }
}
