// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command implementation.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, bail};
use tracing::info;

use crate::cli::config::ConfigArgs;
use crate::config::{self, Config};
use crate::error::Result;

/// Main handler for the config command.
///
/// `path` overrides the per-user file location.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the answer is
/// empty or invalid, or the file cannot be written.
pub fn run_config_command(args: &ConfigArgs, path: Option<&Path>) -> Result<()> {
    if args.show {
        return run_show(path);
    }

    let file = match path {
        Some(p) => p.to_path_buf(),
        None => config::default_path()?,
    };
    let hgroot = match &args.hgroot {
        Some(root) => root.clone(),
        None => {
            let current = stored_config(&file)?.hgroot;
            ask_hgroot(&mut io::stdin().lock(), &mut io::stdout(), current.as_deref())?
        }
    };

    set_hgroot(&file, &hgroot)?;
    println!("Saved {}", file.display());
    Ok(())
}

/// Prints the loaded configuration files and the merged values.
fn run_show(path: Option<&Path>) -> Result<()> {
    let loader = Config::sources(path)?;
    let files = loader.describe_files();
    let config = loader.build()?;

    if files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in files {
            println!("{line}");
        }
    }
    println!();
    for line in config.format_options() {
        println!("{line}");
    }
    Ok(())
}

/// File contents only; environment overrides must not be written back.
fn stored_config(file: &Path) -> Result<Config> {
    if file.exists() {
        Config::from_file(file)
    } else {
        Ok(Config::default())
    }
}

/// Stores `hgroot` in `file`, keeping the file's other values.
///
/// # Errors
///
/// Returns an error if the file is invalid, the value is rejected, or the
/// write fails.
pub fn set_hgroot(file: &Path, hgroot: &str) -> Result<()> {
    let hgroot = hgroot.trim();
    if hgroot.is_empty() {
        bail!("hgroot must not be empty");
    }

    let mut config = stored_config(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    config.hgroot = Some(hgroot.to_string());
    config.validate()?;
    config.save(file)?;
    info!(path = %file.display(), hgroot = %hgroot, "configuration saved");
    Ok(())
}

/// Asks for the remote root; an empty answer keeps `current`.
///
/// # Errors
///
/// Returns an error on I/O failure or when nothing was entered and there is
/// no current value.
pub fn ask_hgroot<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    current: Option<&str>,
) -> Result<String> {
    writeln!(
        output,
        "Directory on remote hosts that holds your repositories."
    )?;
    writeln!(output, "Relative paths start at the remote home directory.")?;
    match current {
        Some(current) => write!(output, "hgroot [{current}]: ")?,
        None => write!(output, "hgroot: ")?,
    }
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();

    match (answer.is_empty(), current) {
        (false, _) => Ok(answer.to_string()),
        (true, Some(current)) => Ok(current.to_string()),
        (true, None) => bail!("no hgroot entered"),
    }
}
