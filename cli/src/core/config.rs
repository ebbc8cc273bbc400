//! # gomanifest Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/gomanifest
//!
//! ## Overview
//!
//! This module loads, merges and validates gomanifest's configuration. It
//! supports a user-wide file and a per-project override, both TOML.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.gomanifest.toml` in the current directory or ancestors
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config dir
//!    (e.g. `~/.config/gomanifest/config.toml`)
//! 3. Defaults: nothing configured, `go` is looked up on PATH and output goes
//!    to stdout
//!
//! Paths are `~`-expanded after merging, then validated.
//!
//! ## Examples
//!
//! ```toml
//! [go]
//! executable = "~/sdk/go1.22.4/bin/go"
//!
//! [list]
//! output = "deps.json"
//! ```
//!
use crate::core::error::{GoManifestError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub go: GoConfig,
    #[serde(default)]
    pub list: ListConfig,
}

/// Settings for the Go toolchain.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GoConfig {
    /// Path to the `go` executable (can use ~). When unset, `go` is found on PATH.
    pub executable: Option<String>,
}

/// Settings for `gomanifest list`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    /// File to write the listing to (can use ~). Stdout when unset.
    pub output: Option<String>,
}

impl Config {
    /// Configured Go executable, if any.
    pub fn go_executable(&self) -> Option<PathBuf> {
        self.go.executable.as_ref().map(PathBuf::from)
    }

    /// Configured output file, if any.
    pub fn list_output(&self) -> Option<PathBuf> {
        self.list.output.as_ref().map(PathBuf::from)
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".gomanifest.toml";

/// Loads the merged configuration for the current directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_for(&current_dir)
}

/// Loads the merged configuration, searching for a project file from `start_dir` upwards.
pub fn load_config_for(start_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start_dir)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "gomanifest") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({}) found.", PROJECT_CONFIG_FILENAME);
        Ok(None)
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let project_config = dir.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if dir.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        go: GoConfig {
            executable: project.go.executable.or(user.go.executable),
        },
        list: ListConfig {
            output: project.list.output.or(user.list.output),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    for path in [&mut config.go.executable, &mut config.list.output]
        .into_iter()
        .flatten()
    {
        *path = shellexpand::tilde(path.as_str()).into_owned();
        debug!("Expanded configured path: {}", path);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(go) = &config.go.executable {
        if go.trim().is_empty() {
            return Err(anyhow!(GoManifestError::Config(
                "go.executable cannot be empty.".to_string()
            )));
        }
        let go_path = Path::new(go);
        if go_path.is_dir() {
            return Err(anyhow!(GoManifestError::Config(format!(
                "go.executable '{}' is a directory, expected the go binary.",
                go_path.display()
            ))));
        }
        if !go_path.exists() {
            warn!("Configured go executable '{}' does not exist.", go_path.display());
        }
    }
    if let Some(output) = &config.list.output {
        if output.trim().is_empty() {
            return Err(anyhow!(GoManifestError::Config(
                "list.output cannot be empty.".to_string()
            )));
        }
    }
    Ok(())
}
