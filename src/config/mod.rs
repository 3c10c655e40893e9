// synchg-rs: Mercurial Remote Sync Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-user configuration for synchg.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. <config dir>/synchg/synchg.toml   (or --config-file)
//! 3. SYNCHG_* env vars
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SYNCHG_HGROOT=/src        → hgroot = "/src"
//! SYNCHG_HG=/opt/hg/bin/hg  → hg = "/opt/hg/bin/hg"
//! SYNCHG_SSH_PROGRAM=plink  → ssh.program = "plink"
//! ```
//!
//! # File Layout
//!
//! ```toml
//! hgroot = "/home/me/src"
//!
//! [ssh]
//! program = "ssh"
//! options = ["-o", "ConnectTimeout=10"]
//! ```

pub mod loader;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result, SynchgResult};

use loader::ConfigLoader;

/// Directory under the platform config dir holding synchg's file.
pub const APP_DIR: &str = "synchg";

/// File name of the per-user configuration.
pub const FILE_NAME: &str = "synchg.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SYNCHG";

/// Remote-shell transport settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SshSettings {
    /// Transport program (`ssh`, `plink` or a full path). Platform default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
    /// Extra arguments placed before the host name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory on remote hosts under which repositories are kept.
    /// Relative paths start at the remote login directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hgroot: Option<String>,
    /// Local `hg` executable. Resolved via PATH when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hg: Option<PathBuf>,
    /// Remote-shell transport.
    pub ssh: SshSettings,
}

impl Config {
    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigLoader::new().file(path.as_ref()).build()
    }

    /// Returns the loader for the per-user configuration sources.
    ///
    /// `path` overrides the default location. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if `path` is `None` and no default
    /// location can be determined.
    pub fn sources(path: Option<&Path>) -> SynchgResult<ConfigLoader> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_path()?,
        };
        Ok(ConfigLoader::new().user_file(&path).env(ENV_PREFIX))
    }

    /// Loads the per-user configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is invalid, or if no default
    /// location can be determined.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::sources(path)?.build()
    }

    /// Returns the remote repository root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` when `hgroot` is unset or empty.
    pub fn hgroot(&self) -> SynchgResult<&str> {
        self.hgroot
            .as_deref()
            .map(str::trim)
            .filter(|root| !root.is_empty())
            .ok_or_else(|| {
                ConfigError::MissingKey {
                    section: "global".to_string(),
                    key: "hgroot".to_string(),
                }
                .into()
            })
    }

    /// Returns the `hg` program to run locally.
    #[must_use]
    pub fn hg_program(&self) -> PathBuf {
        self.hg.clone().unwrap_or_else(|| PathBuf::from("hg"))
    }

    /// Checks values that deserialization alone cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `hgroot` uses `\` separators.
    pub fn validate(&self) -> SynchgResult<()> {
        if let Some(root) = self.hgroot.as_deref()
            && root.contains('\\')
        {
            return Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "hgroot".to_string(),
                message: format!("'{root}' is a remote path and must use '/' separators"),
            }
            .into());
        }
        Ok(())
    }

    /// Writes the configuration as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        use anyhow::Context as _;

        let content = toml::to_string_pretty(self).context("failed to serialize configuration")?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Format configuration options for display.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        let options = [
            ("hgroot", self.hgroot.clone().unwrap_or_default()),
            ("hg", fmt(&self.hg)),
            ("ssh.program", fmt(&self.ssh.program)),
            ("ssh.options", self.ssh.options.join(" ")),
        ];
        let max_key_len = options.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

        options
            .iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Default location of the per-user configuration file.
///
/// # Errors
///
/// Returns `ConfigError::NoConfigDir` if the platform has no config directory.
pub fn default_path() -> SynchgResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::NoConfigDir.into())
}
