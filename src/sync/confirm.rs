// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Yes/no prompts and user-facing progress lines.
//!
//! ```text
//!   sync_remote --say("Pushing to remote")--> Confirm
//!               --confirm("...?")-----------> Confirm --> bool
//!
//!   TerminalPrompt   reads y/n from a BufRead, default no, EOF = no
//!   AssumeYes        --yes: echoes the question, answers yes
//! ```
//!
//! A declined question that must stop the sync goes through [`require`],
//! which turns the decline into `SyncError::Aborted`.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use tracing::{debug, warn};

use crate::error::{SynchgResult, aborted};

const SUFFIX: &str = " [y/N] ";

/// Console side of a sync: progress output and confirmations.
pub trait Confirm {
    /// Asks a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn confirm(&mut self, question: &str) -> SynchgResult<bool>;

    /// Prints one progress line.
    fn say(&mut self, line: &str);
}

/// Asks `question` and aborts the sync on "no".
///
/// # Errors
///
/// Returns `SyncError::Aborted` on a decline, or the prompt's own error.
pub fn require<C: Confirm + ?Sized>(console: &mut C, question: &str) -> SynchgResult<()> {
    if console.confirm(question)? {
        Ok(())
    } else {
        debug!(question = %question, "declined");
        Err(aborted())
    }
}

fn write_line<W: Write>(output: &mut W, line: &str) {
    if let Err(e) = writeln!(output, "{line}").and_then(|()| output.flush()) {
        warn!(error = %e, "failed to write to console");
    }
}

/// Interactive prompt over a reader and writer.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    /// Prompt on the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompt, returning the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> SynchgResult<bool> {
        loop {
            write!(self.output, "{question}{SUFFIX}")?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "" | "n" | "no" => return Ok(false),
                other => {
                    debug!(answer = %other, "unrecognised answer");
                    writeln!(self.output, "Please answer 'y' or 'n'.")?;
                }
            }
        }
    }

    fn say(&mut self, line: &str) {
        write_line(&mut self.output, line);
    }
}

/// Answers every question with yes, still printing it.
pub struct AssumeYes<W> {
    output: W,
}

impl AssumeYes<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AssumeYes<W> {
    pub const fn new(output: W) -> Self {
        Self { output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write> Confirm for AssumeYes<W> {
    fn confirm(&mut self, question: &str) -> SynchgResult<bool> {
        writeln!(self.output, "{question}{SUFFIX}y")?;
        Ok(true)
    }

    fn say(&mut self, line: &str) {
        write_line(&mut self.output, line);
    }
}
