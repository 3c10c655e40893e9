// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   sync, config
//! ```

pub mod config;
pub mod sync;
