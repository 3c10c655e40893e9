// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mercurial operations module.
//!
//! ```text
//!            Repository<E>              repo.rs
//!        queries | mutations | hgrc
//!          /          |          \
//!         v           v           v
//!     parse.rs     mq.rs       hgrc.rs
//!   (stdout ->   (CleanMq     (RepoConfig,
//!    values)      guard)       [paths])
//!          \          |          /
//!           v         v         v
//!      ,----------------------------,
//!      |    HgExecutor (exec.rs)    |
//!      '-----+----------------+-----'
//!            |                |
//!            v                v
//!         LocalHg          RemoteHg
//!      (ProcessBuilder)  (RemoteConnection)
//! ```

pub mod exec;
pub mod hgrc;
pub mod mq;
pub mod parse;
pub mod repo;
pub mod types;

pub use exec::{HgExecutor, LocalHg, RemoteHg};
pub use repo::Repository;
pub use types::{AsRevision, Changeset, Identity, Summary};

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
