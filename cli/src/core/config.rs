//! # qabot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements configuration loading for qabot. Settings cover
//! where the training data lives, how the model is fitted, and where the web
//! server listens.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.qabot.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Default values defined in the code
//!
//! Each file is read into a `ConfigLayer` whose keys are all optional. A key
//! written in a file overrides the layers below it, even when it restates
//! the default value.
//!
//! Command-line flags are layered on top of the merged result by each command.
//! A relative `dataset.path` in a file is resolved against the directory of
//! that file, and `~` is expanded.
//!
//! ## Examples
//!
//! ```toml
//! [dataset]
//! path = "data/faq.csv"
//!
//! [model]
//! alpha = 1.0
//! test_size = 0.0
//! seed = 42
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8050
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let records = dataset::load_dataset(&cfg.dataset.path)?;
//! ```
//!
use crate::core::error::{QabotError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The effective configuration: every setting resolved from the project
/// file, the user file, or the built-in default, in that order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub model: ModelConfig,
    pub server: ServerSection,
}

/// Location of the `Question,Answer` training file.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    /// Path to the CSV file (can use ~).
    pub path: String,
}

/// Settings for fitting the classifier pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Additive smoothing for naive Bayes.
    pub alpha: f64,
    /// Fraction of rows held out before training. `0.0` trains on everything.
    pub test_size: f64,
    /// Seed for the shuffle that precedes the hold-out split.
    pub seed: u64,
}

/// Where `qabot serve` listens.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSection {
    pub host: IpAddr,
    pub port: u16,
}

/// One configuration file as written on disk. A key that is absent stays
/// `None`, so a file that restates a default still overrides a lower layer.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(default)]
    pub dataset: DatasetLayer,
    #[serde(default)]
    pub model: ModelLayer,
    #[serde(default)]
    pub server: ServerLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatasetLayer {
    pub path: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelLayer {
    pub alpha: Option<f64>,
    pub test_size: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerLayer {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
}

impl Config {
    /// The dataset to train on: `override_path` when given on the command line,
    /// otherwise the configured path with `~` expanded.
    pub fn dataset_path(&self, override_path: Option<&Path>) -> PathBuf {
        match override_path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(shellexpand::tilde(&self.dataset.path).into_owned()),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            test_size: 0.0,
            seed: default_seed(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

pub fn default_dataset_path() -> String {
    "chatbot_dataset.csv".to_string()
}
fn default_alpha() -> f64 {
    1.0
}
pub fn default_seed() -> u64 {
    42
}
pub fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
pub fn default_port() -> u16 {
    8050
}

const PROJECT_CONFIG_FILENAME: &str = ".qabot.toml";

/// Loads and merges the user and project configuration, starting the
/// project search from the current working directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(&current_dir)
}

/// Same as [`load_config`], but searches for `.qabot.toml` starting at `start_dir`.
pub fn load_config_from(start_dir: &Path) -> Result<Config> {
    // Each layer is optional; a missing file contributes nothing.
    let user_config = load_user_config()?;
    let project_config = load_project_config(start_dir)?;

    let merged_config = merge_configs(user_config, project_config);

    // Validate the merged result, not the individual layers.
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    // Platform config directory, e.g. ~/.config/qabot on Linux.
    if let Some(proj_dirs) = ProjectDirs::from("com", "qabot", "qabot") {
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

fn load_project_config(start_dir: &Path) -> Result<Option<ConfigLayer>> {
    if let Some(project_config_path) = find_project_config_path(start_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.qabot.toml) found.");
        Ok(None)
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path: &Path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        // A repository root bounds the search.
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        // Move up one level; stop at the filesystem root.
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let mut layer: ConfigLayer = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;

    // Any dataset path written in a file is relative to that file.
    if let Some(raw_path) = layer.dataset.path.take() {
        let expanded = PathBuf::from(shellexpand::tilde(&raw_path).into_owned());
        let resolved = match path.parent() {
            Some(parent) if expanded.is_relative() => parent.join(expanded),
            _ => expanded,
        };
        debug!("Resolved dataset path to: {}", resolved.display());
        layer.dataset.path = Some(resolved.to_string_lossy().into_owned());
    }
    Ok(layer)
}

/// Resolves every setting as project value, else user value, else default.
fn merge_configs(user: Option<ConfigLayer>, project: Option<ConfigLayer>) -> Config {
    let user = user.unwrap_or_default();
    let project = project.unwrap_or_default();
    let defaults = Config::default();

    Config {
        dataset: DatasetConfig {
            path: project
                .dataset
                .path
                .or(user.dataset.path)
                .unwrap_or(defaults.dataset.path),
        },
        model: ModelConfig {
            alpha: project.model.alpha.or(user.model.alpha).unwrap_or(defaults.model.alpha),
            test_size: project
                .model
                .test_size
                .or(user.model.test_size)
                .unwrap_or(defaults.model.test_size),
            seed: project.model.seed.or(user.model.seed).unwrap_or(defaults.model.seed),
        },
        server: ServerSection {
            host: project.server.host.or(user.server.host).unwrap_or(defaults.server.host),
            port: project.server.port.or(user.server.port).unwrap_or(defaults.server.port),
        },
    }
}

/// Rejects settings the model cannot be trained with.
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if !(config.model.alpha.is_finite() && config.model.alpha > 0.0) {
        return Err(anyhow!(QabotError::Config(format!(
            "model.alpha must be a positive number, got {}",
            config.model.alpha
        ))));
    }
    if !(0.0..1.0).contains(&config.model.test_size) {
        return Err(anyhow!(QabotError::InvalidSplit(config.model.test_size)));
    }
    if config.dataset.path.trim().is_empty() {
        return Err(anyhow!(QabotError::Config(
            "dataset.path cannot be empty".to_string()
        )));
    }
    Ok(())
}
