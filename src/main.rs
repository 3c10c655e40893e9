// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Sync | Config | Version
//!
//! Ok        --> exit 0
//! Aborted   --> exit 0, nothing printed
//! other     --> "Error: ..." on stderr, exit 1
//! ```

use std::process::ExitCode;

use synchg_rs::cli::global::GlobalOptions;
use synchg_rs::cli::{self, Command};
use synchg_rs::cmd::config::run_config_command;
use synchg_rs::cmd::sync::run_sync_command;
use synchg_rs::config::Config;
use synchg_rs::error::SynchgError;
use synchg_rs::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let _log_guard = match init_logging(&cli.global.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli)
}

fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Sync(args)) => {
            load_config(&cli.global).and_then(|config| run_sync_command(args, &config))
        }
        Some(Command::Config(args)) => {
            run_config_command(args, cli.global.config_file.as_deref())
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_aborted(&e) => {
            tracing::debug!("aborted by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn is_aborted(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<SynchgError>()
        .is_some_and(SynchgError::is_aborted)
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> synchg_rs::error::Result<Config> {
    Config::load(global.config_file.as_deref())
}
