// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsers for hg output.
//!
//! ```text
//! hg summary        commit: <N> modified, <N> unknown
//!                   mq:     <N> applied, <N> unapplied
//!                   (any order, any subset, other lines ignored)
//!
//! hg id -i -b       <12 hex>[+]<ws><branch>
//!
//! hg outgoing/      <header line>
//! hg incoming       <header line>
//!                   <40 hex node> <first line of description>
//!                   ...
//! ```
//!
//! These are pure functions over captured stdout so they can be tested
//! without spawning hg.

use regex::Regex;

use super::types::{Changeset, Identity, PatchQueueCounts, Summary, WorkingTreeStatus};
use crate::error::{HgError, SynchgError, SynchgResult};

/// Template passed to `hg outgoing`/`hg incoming`: one changeset per line.
pub const CHANGESET_TEMPLATE: &str = "{node} {desc|firstline}\\n";

/// Lines hg prints before the list ("comparing with ...", "searching for changes").
pub const LIST_HEADER_LINES: usize = 2;

fn pattern(source: &str) -> SynchgResult<Regex> {
    Regex::new(source).map_err(|e| SynchgError::Other(format!("bad pattern {source}: {e}").into()))
}

/// Parses an `hg summary` report.
///
/// Counts are read from `<number> <word>` pairs on the `commit:` and `mq:`
/// lines. Words other than the four counted ones (`added`, `deleted`, ...)
/// are ignored and every absent count is zero.
///
/// # Errors
///
/// Only fails if the internal pattern cannot be compiled.
pub fn parse_summary(output: &str) -> SynchgResult<Summary> {
    let count = pattern(r"(\d+)\s+(\w+)")?;
    let mut summary = Summary::default();

    for line in output.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix("commit:") {
            let mut commit = WorkingTreeStatus::default();
            for caps in count.captures_iter(rest) {
                let value = caps[1].parse().unwrap_or(u32::MAX);
                match &caps[2] {
                    "modified" => commit.modified = value,
                    "unknown" => commit.unknown = value,
                    _ => {}
                }
            }
            summary.commit = commit;
        } else if let Some(rest) = line.strip_prefix("mq:") {
            let mut mq = PatchQueueCounts::default();
            for caps in count.captures_iter(rest) {
                let value = caps[1].parse().unwrap_or(u32::MAX);
                match &caps[2] {
                    "applied" => mq.applied = value,
                    "unapplied" => mq.unapplied = value,
                    _ => {}
                }
            }
            summary.mq = mq;
        }
    }

    Ok(summary)
}

/// Parses the output of `hg id -i -b`.
///
/// # Errors
///
/// Returns `HgError::IdentityParse` if the output is not a 12 digit hash
/// (optionally followed by `+`) and a branch name.
pub fn parse_identity(output: &str) -> SynchgResult<Identity> {
    let identity = pattern(r"^([0-9a-fA-F]{12})\+?\s+(\S.*?)\s*$")?;
    let text = output.trim_end();

    let caps = identity
        .captures(text)
        .ok_or_else(|| HgError::IdentityParse {
            output: output.to_string(),
        })?;

    Ok(Identity {
        revision: caps[1].to_string(),
        branch: caps[2].to_string(),
    })
}

/// Parses a templated changeset list, skipping `header_lines` leading lines.
///
/// # Errors
///
/// Returns `HgError::ListParse` if the output is shorter than the header.
pub fn parse_changesets(
    output: &str,
    header_lines: usize,
    command: &str,
) -> SynchgResult<Vec<Changeset>> {
    let lines: Vec<&str> = output.lines().collect();
    if lines.len() < header_lines {
        return Err(HgError::ListParse {
            command: command.to_string(),
            message: format!(
                "expected at least {header_lines} header lines, got {}",
                lines.len()
            ),
        }
        .into());
    }

    Ok(lines[header_lines..]
        .iter()
        .map(|line| line.trim_end())
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((hash, description)) => Changeset::new(hash, description),
            None => Changeset::new(line, ""),
        })
        .collect())
}

/// Returns the top of the patch stack from `hg qapplied` output.
#[must_use]
pub fn parse_last_applied(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(String::from)
}
