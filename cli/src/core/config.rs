//! # shellrun Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the optional configuration that tunes
//! how shellrun runs commands: a forced output charset, and the diagnostic
//! commands used to detect the console charset when none is forced.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config <path>` (`~` is expanded). When given,
//!    no other file is read.
//! 2. Project-specific `.shellrun.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`).
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/shellrun/config.toml` on Linux).
//! 4. Default values defined in the code.
//!
//! ## Example file
//!
//! ```toml
//! [exec]
//! charset = "GBK"
//!
//! [detect]
//! windows_probe = "cmd /c chcp"
//! posix_probe = "locale"
//! locale_variables = ["LC_MESSAGES", "LC_CTYPE", "LANG"]
//! ```
//!
use crate::common::encoding::Charset;
use crate::common::system::charset::{
    DEFAULT_LOCALE_VARIABLES, DEFAULT_POSIX_PROBE, DEFAULT_WINDOWS_PROBE,
};
use crate::core::error::{Result, ShellrunError};
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
    pub exec: ExecConfig,
    #[serde(default)]
    pub detect: DetectConfig,
}

/// Execution settings.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExecConfig {
    /// Charset used to decode output. Skips detection when set.
    pub charset: Option<String>,
}

/// Charset detection settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DetectConfig {
    /// Command printing the active console code page on Windows.
    #[serde(default = "default_windows_probe")]
    pub windows_probe: String,
    /// Command printing locale settings on other platforms.
    #[serde(default = "default_posix_probe")]
    pub posix_probe: String,
    /// Locale variables consulted, highest priority first.
    #[serde(default = "default_locale_variables")]
    pub locale_variables: Vec<String>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            windows_probe: default_windows_probe(),
            posix_probe: default_posix_probe(),
            locale_variables: default_locale_variables(),
        }
    }
}

fn default_windows_probe() -> String {
    DEFAULT_WINDOWS_PROBE.to_string()
}
fn default_posix_probe() -> String {
    DEFAULT_POSIX_PROBE.to_string()
}
fn default_locale_variables() -> Vec<String> {
    DEFAULT_LOCALE_VARIABLES
        .iter()
        .map(|v| v.to_string())
        .collect()
}

const PROJECT_CONFIG_FILENAME: &str = ".shellrun.toml";

/// Loads the effective configuration.
///
/// `explicit` is the `--config` path, if the user passed one.
pub fn load_config(explicit: Option<&str>) -> Result<Config> {
    let config = match explicit {
        Some(raw) => {
            let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(&path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "shellrun", "shellrun") {
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

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.shellrun.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = DetectConfig::default();
    let mut merged = Config::default();
    merged.exec.charset = project_cfg.exec.charset.or(user.exec.charset);
    merged.detect.windows_probe = if project_cfg.detect.windows_probe != defaults.windows_probe {
        project_cfg.detect.windows_probe
    } else {
        user.detect.windows_probe
    };
    merged.detect.posix_probe = if project_cfg.detect.posix_probe != defaults.posix_probe {
        project_cfg.detect.posix_probe
    } else {
        user.detect.posix_probe
    };
    merged.detect.locale_variables =
        if project_cfg.detect.locale_variables != defaults.locale_variables {
            project_cfg.detect.locale_variables
        } else {
            user.detect.locale_variables
        };
    merged
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating configuration...");
    if let Some(label) = &config.exec.charset {
        if Charset::from_label(label).is_none() {
            return Err(anyhow!(ShellrunError::Config(format!(
                "Unknown charset '{}' in exec.charset.",
                label
            ))));
        }
    }
    for (key, probe) in [
        ("detect.windows_probe", &config.detect.windows_probe),
        ("detect.posix_probe", &config.detect.posix_probe),
    ] {
        if probe.trim().is_empty() {
            return Err(anyhow!(ShellrunError::Config(format!(
                "{} cannot be empty.",
                key
            ))));
        }
        if let Err(e) = shell_words::split(probe) {
            return Err(anyhow!(ShellrunError::Config(format!(
                "{} '{}' is not a valid command line: {}",
                key, probe, e
            ))));
        }
    }
    if config.detect.locale_variables.is_empty() {
        return Err(anyhow!(ShellrunError::Config(
            "detect.locale_variables must list at least one variable.".to_string()
        )));
    }
    for variable in &config.detect.locale_variables {
        let valid = !variable.is_empty()
            && variable
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(anyhow!(ShellrunError::Config(format!(
                "Invalid locale variable name: '{}'.",
                variable
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
