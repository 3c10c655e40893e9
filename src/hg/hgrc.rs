// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `[paths]` section of a repository's hgrc.
//!
//! ```text
//! first access --> exec.read_file(path) --> raw text (cached)
//!                        |
//!                  missing file = empty text
//!
//! remotes()        raw text --> readable() --> Ini (escapes off) --> [paths]
//! add_remote(n, d) raw text --> upsert() --> exec.write_file(path)
//! ```
//!
//! Only the `name = dest` line is touched on write. Every other line,
//! including continuation lines and `%include` directives, is written back
//! as it was read. The document is read through the owning repository's
//! executor, so a remote hgrc is edited the same way as a local one.

use std::collections::BTreeMap;

use ini::{Ini, ParseOption};
use tracing::debug;

use super::exec::HgExecutor;
use crate::error::{ConfigError, SynchgResult};

const PATHS: &str = "paths";

/// Lazily loaded remote-name to destination mapping.
#[derive(Debug, Clone)]
pub struct RepoConfig {
    path: String,
    text: Option<String>,
}

impl RepoConfig {
    /// Creates a store for the repository-relative hgrc at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: None,
        }
    }

    /// Repository-relative location of the hgrc.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the `[paths]` entries.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if the hgrc cannot be parsed.
    pub fn remotes<E: HgExecutor + ?Sized>(
        &mut self,
        exec: &E,
    ) -> SynchgResult<BTreeMap<String, String>> {
        let text = self.text(exec)?;
        let document = parse(text).map_err(|message| ConfigError::ParseError {
            path: format!("{}/{}", exec.location(), self.path),
            message,
        })?;
        Ok(document
            .section(Some(PATHS))
            .map(|paths| {
                paths
                    .iter()
                    .map(|(name, dest)| (name.to_string(), dest.to_string()))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Sets `name = dest` under `[paths]` and writes the file.
    ///
    /// Creates the file and the section when absent. Writing is skipped when
    /// the entry already has this value.
    ///
    /// # Errors
    ///
    /// Returns an error if the hgrc cannot be parsed or written.
    pub fn add_remote<E: HgExecutor + ?Sized>(
        &mut self,
        exec: &E,
        name: &str,
        dest: &str,
    ) -> SynchgResult<()> {
        if self.remotes(exec)?.get(name).map(String::as_str) == Some(dest) {
            debug!(hgrc = %self.path, remote = %name, "remote already set");
            return Ok(());
        }

        let updated = upsert(self.text(exec)?, name, dest);
        debug!(hgrc = %self.path, location = %exec.location(), remote = %name, dest = %dest, "add remote");
        exec.write_file(&self.path, &updated)?;
        self.text = Some(updated);
        Ok(())
    }

    fn text<E: HgExecutor + ?Sized>(&mut self, exec: &E) -> SynchgResult<&str> {
        let text = match self.text.take() {
            Some(text) => text,
            None => exec.read_file(&self.path)?.unwrap_or_default(),
        };
        Ok(self.text.insert(text).as_str())
    }
}

fn parse(text: &str) -> Result<Ini, String> {
    let option = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ini::load_from_str_opt(&readable(text), option).map_err(|e| e.to_string())
}

/// Rewrites hg-only syntax into plain INI for reading.
///
/// `%include` and `%unset` lines are dropped. Indented continuation lines
/// are folded into the value above them.
fn readable(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.starts_with('%') {
            continue;
        }
        let continues = line.starts_with([' ', '\t']) && !line.trim().is_empty();
        match out.last_mut() {
            Some(previous) if continues && is_entry(previous.as_str()) => {
                previous.push(' ');
                previous.push_str(line.trim());
            }
            _ if continues => {}
            _ => out.push(line.to_string()),
        }
    }
    out.join("\n")
}

fn is_entry(line: &str) -> bool {
    !line.starts_with([' ', '\t', '#', ';', '[']) && line.contains('=')
}

fn section_name(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix('[')?;
    let end = rest.find(']')?;
    Some(rest[..end].trim())
}

fn entry_key(line: &str) -> Option<&str> {
    if !is_entry(line) {
        return None;
    }
    line.split_once('=').map(|(key, _)| key.trim())
}

/// Sets `name = dest` in `text`, leaving every unrelated line untouched.
///
/// Existing `name` entries in `[paths]` are replaced in place along with
/// their continuation lines. Otherwise the entry is appended to the last
/// `[paths]` section, or to a new one at the end of the file.
fn upsert(text: &str, name: &str, dest: &str) -> String {
    let entry = format!("{name} = {dest}");

    let mut in_paths = false;
    let mut replaced = false;
    let mut skipping = false;
    let mut paths_end = None;
    let mut kept: Vec<String> = Vec::new();

    for line in text.lines().map(str::to_string) {
        if skipping && line.starts_with([' ', '\t']) && !line.trim().is_empty() {
            continue;
        }
        skipping = false;

        if let Some(section) = section_name(&line)
            && !line.starts_with([' ', '\t'])
        {
            in_paths = section == PATHS;
            kept.push(line);
            if in_paths {
                paths_end = Some(kept.len());
            }
            continue;
        }

        if in_paths && entry_key(&line) == Some(name) {
            kept.push(entry.clone());
            replaced = true;
            skipping = true;
        } else {
            kept.push(line);
        }
        if in_paths && !kept.last().is_some_and(|l| l.trim().is_empty()) {
            paths_end = Some(kept.len());
        }
    }

    if !replaced {
        match paths_end {
            Some(at) => kept.insert(at, entry),
            None => {
                if kept.last().is_some_and(|l| !l.trim().is_empty()) {
                    kept.push(String::new());
                }
                kept.push(format!("[{PATHS}]"));
                kept.push(entry);
            }
        }
    }

    let mut out = kept.join("\n");
    out.push('\n');
    out
}
