// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                               sync / config
//!                                      |
//!              ,-----------------------+---,
//!              |          config           |
//!              |  synchg.toml + SYNCHG_*   |
//!              '-------------+-------------'
//!                            v
//!              ,---------------------------,
//!              |   sync (orchestrator)     |
//!              |   prompts via Confirm     |
//!              '------+-------------+------'
//!                     v             v
//!              hg::Repository  hg::Repository
//!                 LocalHg         RemoteHg
//!                     |             |
//!                     |          remote
//!                     |        ssh / plink
//!                     v             v
//!   +-----------------------------------------+
//!   |  core   process (blocking spawn)        |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod hg;
pub mod logging;
pub mod remote;
pub mod sync;
