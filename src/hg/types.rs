// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Values produced by hg queries.
//!
//! ```text
//! Summary   { commit: WorkingTreeStatus, mq: PatchQueueCounts }
//! Identity  { revision, branch }      <- hg id -i -b
//! Changeset { hash, description }     <- hg outgoing/incoming
//! ```

use std::fmt;

/// Uncommitted file counts from the `commit:` line of `hg summary`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkingTreeStatus {
    pub modified: u32,
    pub unknown: u32,
}

/// Patch counts from the `mq:` line of `hg summary`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchQueueCounts {
    pub applied: u32,
    pub unapplied: u32,
}

/// Parsed `hg summary` report. Absent fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub commit: WorkingTreeStatus,
    pub mq: PatchQueueCounts,
}

/// Working-copy revision and branch, as reported by `hg id -i -b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// 12 hex digit short hash, without the `+` dirty marker.
    pub revision: String,
    pub branch: String,
}

/// One changeset from a templated list query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub hash: String,
    pub description: String,
}

impl Changeset {
    /// Creates a new changeset descriptor.
    pub fn new(hash: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            description: description.into(),
        }
    }

    /// Short form used when listing changesets to the user:
    /// a 6 character hash prefix and a description capped at 50 characters.
    #[must_use]
    pub fn display_line(&self) -> String {
        let short_hash = self.hash.get(..6).unwrap_or(&self.hash);
        let description = if self.description.chars().count() > 50 {
            let head: String = self.description.chars().take(47).collect();
            format!("{head}...")
        } else {
            self.description.clone()
        };
        format!("{short_hash}  {description}")
    }
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hash, self.description)
    }
}

/// Anything that names a revision for `hg update`.
pub trait AsRevision {
    fn as_revision(&self) -> &str;
}

impl AsRevision for str {
    fn as_revision(&self) -> &str {
        self
    }
}

impl AsRevision for String {
    fn as_revision(&self) -> &str {
        self
    }
}

impl AsRevision for Changeset {
    fn as_revision(&self) -> &str {
        &self.hash
    }
}

impl AsRevision for Identity {
    fn as_revision(&self) -> &str {
        &self.revision
    }
}
