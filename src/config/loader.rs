// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from the user file and the environment.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .file(path)              stored file, must exist    (synchg config)
//!   .user_file(path)         per-user file, may be absent (synchg sync)
//!   .env("SYNCHG")           SYNCHG_HGROOT, SYNCHG_SSH_PROGRAM, ...
//!        |
//!        v
//!    build() --> Config --> validate()
//! ```
//!
//! Later sources win. List values from the environment are space separated:
//! `SYNCHG_SSH_OPTIONS="-o ConnectTimeout=10"`.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use tracing::debug;

use super::Config;
use crate::error::Result;

/// Collects configuration sources and deserializes them into a [`Config`].
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    files: Vec<PathBuf>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn file(mut self, path: &Path) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(true));
        self.files.push(path.to_path_buf());
        self
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn user_file(mut self, path: &Path) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(false));
        if path.exists() {
            self.files.push(path.to_path_buf());
        }
        self
    }

    /// Reads `<PREFIX>_*` environment variables on top of the files.
    #[must_use]
    pub fn env(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Merges the sources and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a file is not valid
    /// TOML, a value has the wrong type, or `Config::validate` rejects it.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .separator("_")
                    .list_separator(" ")
                    .with_list_parse_key("ssh.options")
                    .try_parsing(true),
            ),
            None => self.builder,
        };
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(files = self.files.len(), env = ?self.env_prefix, "configuration loaded");
        Ok(config)
    }

    /// Files that will be read, in precedence order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Numbered listing of [`files`](Self::files) for `config --show`.
    #[must_use]
    pub fn describe_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, path)| format!("{}. {}", i + 1, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
