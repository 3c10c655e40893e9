// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Blocking process spawning.
//!
//! ```text
//! ProcessBuilder::new("hg")
//!   .args() .cwd() .env() .stdin() .capture_output()
//!   .run()
//!       --> std::process::Command
//!           wait, collect stdout/stderr
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod runner;
