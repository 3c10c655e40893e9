// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recording executor for unit tests.
//!
//! Responses are looked up by the full argument line, then by subcommand.
//! The last scripted response for a key repeats; unscripted commands print
//! nothing and succeed. Local and remote fakes made by [`FakeHg::pair`]
//! share one command log.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;

use super::exec::HgExecutor;
use crate::error::{HgError, SynchgResult};

type Scripted = Result<String, i32>;

#[derive(Default)]
struct State {
    responses: BTreeMap<String, VecDeque<Scripted>>,
    paths: BTreeSet<String>,
    files: BTreeMap<String, String>,
}

#[derive(Clone)]
pub struct FakeHg {
    side: &'static str,
    log: Rc<RefCell<Vec<String>>>,
    state: Rc<RefCell<State>>,
}

impl FakeHg {
    pub fn new(side: &'static str) -> Self {
        Self {
            side,
            log: Rc::default(),
            state: Rc::default(),
        }
    }

    /// Local and remote fakes writing to the same log.
    pub fn pair() -> (Self, Self) {
        let local = Self::new("local");
        let remote = Self {
            side: "remote",
            log: Rc::clone(&local.log),
            state: Rc::default(),
        };
        (local, remote)
    }

    fn script(&self, key: &str, response: Scripted) -> &Self {
        self.state
            .borrow_mut()
            .responses
            .entry(key.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Scripts stdout for `key` (full argument line or subcommand).
    pub fn respond(&self, key: &str, stdout: &str) -> &Self {
        self.script(key, Ok(stdout.to_string()))
    }

    /// Scripts an exit code for `key`.
    pub fn fail(&self, key: &str, code: i32) -> &Self {
        self.script(key, Err(code))
    }

    /// Marks a repository-relative path as existing.
    pub fn with_path(&self, relative: &str) -> &Self {
        self.state.borrow_mut().paths.insert(relative.to_string());
        self
    }

    /// Seeds a repository-relative file (also marks it as existing).
    pub fn with_file(&self, relative: &str, contents: &str) -> &Self {
        let mut state = self.state.borrow_mut();
        state.paths.insert(relative.to_string());
        state.files.insert(relative.to_string(), contents.to_string());
        drop(state);
        self
    }

    pub fn file(&self, relative: &str) -> Option<String> {
        self.state.borrow().files.get(relative).cloned()
    }

    /// Every command issued so far, as `"<side>: hg <args>"`.
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Commands issued by this side only, without the side prefix.
    pub fn commands(&self) -> Vec<String> {
        let prefix = format!("{}: ", self.side);
        self.log
            .borrow()
            .iter()
            .filter_map(|line| line.strip_prefix(&prefix).map(String::from))
            .collect()
    }

    fn next_response(&self, line: &str, subcommand: &str) -> Scripted {
        let mut state = self.state.borrow_mut();
        let queue = if state.responses.contains_key(line) {
            state.responses.get_mut(line)
        } else {
            state.responses.get_mut(subcommand)
        };
        match queue {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(Ok(String::new())),
            Some(queue) => queue.front().cloned().unwrap_or(Ok(String::new())),
            None => Ok(String::new()),
        }
    }
}

impl HgExecutor for FakeHg {
    fn hg(&self, args: &[&str]) -> SynchgResult<String> {
        let line = args.join(" ");
        self.log.borrow_mut().push(format!("{}: hg {line}", self.side));

        let subcommand = args.first().copied().unwrap_or_default();
        match self.next_response(&line, subcommand) {
            Ok(stdout) => Ok(stdout),
            Err(code) => Err(HgError::CommandFailed {
                command: format!("hg {line}"),
                code,
                stderr: String::new(),
            }
            .into()),
        }
    }

    fn exists(&self, relative: &str) -> SynchgResult<bool> {
        Ok(self.state.borrow().paths.contains(relative))
    }

    fn read_file(&self, relative: &str) -> SynchgResult<Option<String>> {
        Ok(self.state.borrow().files.get(relative).cloned())
    }

    fn write_file(&self, relative: &str, contents: &str) -> SynchgResult<()> {
        let mut state = self.state.borrow_mut();
        state.paths.insert(relative.to_string());
        state.files.insert(relative.to_string(), contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        self.side.to_string()
    }
}
