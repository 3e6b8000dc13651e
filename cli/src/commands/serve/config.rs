//! # qabot Server Configuration
//!
//! File: cli/src/commands/serve/config.rs
//!
//! ## Overview
//!
//! This module builds the effective configuration for `qabot serve` from:
//! 1. Command-line arguments (highest priority)
//! 2. The merged `.qabot.toml` / user configuration (see `core::config`)
//! 3. Default values (lowest priority)
//!
//! ## Architecture
//!
//! The configuration system follows these steps:
//! 1. Parse command-line arguments
//! 2. Load the file configuration
//! 3. Merge settings: a flag that was passed wins, even when it restates the
//!    default; an omitted flag defers to the file
//! 4. Resolve the dataset path to an absolute path and check that it is a file
//!
//! ## Examples
//!
//! ```rust
//! let args = ServeArgs::parse();
//! let config = load_and_merge_config(args).await?;
//! println!("Training on: {}", config.dataset.display());
//! println!("Listening on: {}:{}", config.host, config.port);
//! ```
//!
use crate::core::config::{self as core_config, Config, ModelConfig};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::debug;

/// # Server Command Arguments (`ServeArgs`)
///
/// Arguments accepted by `qabot serve`. Every setting can also come from a
/// configuration file; omitted flags defer to the file.
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// CSV file with `Question,Answer` columns to train on.
    /// Defaults to `dataset.path` from the configuration (`chatbot_dataset.csv`).
    #[arg(long, short)]
    pub dataset: Option<PathBuf>,

    /// Port to listen on [default: 8050]. If it is taken, the next free port
    /// is used.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Address to bind [default: 127.0.0.1]. Use `0.0.0.0` to accept
    /// connections from other machines.
    #[arg(long)]
    pub host: Option<IpAddr>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        ServeArgs::parse_from(["serve"])
    }
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// The final settings `run_server` and the training step use.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// The network port the server will try first.
    pub port: u16,

    /// The network IP address the server will bind to.
    pub host: IpAddr,

    /// Absolute path to the training CSV.
    pub dataset: PathBuf,

    /// How the model is fitted.
    pub model: ModelConfig,
}

/// # Load and Merge Server Configuration (`load_and_merge_config`)
///
/// Loads the file configuration, applies `args` on top and validates the
/// dataset path.
///
/// ## Errors
///
/// Returns an error if a configuration file cannot be read or parsed, holds
/// invalid model settings, or the dataset path does not name a readable file.
pub async fn load_and_merge_config(args: ServeArgs) -> Result<ServerConfig> {
    // User and project files, already merged and validated.
    let file_config = core_config::load_config()?;
    let mut effective_config = merge_config(&args, &file_config);

    // Fail before training if the dataset is missing.
    effective_config.resolve_dataset().await?;
    Ok(effective_config)
}

/// Applies command-line arguments over the file configuration.
fn merge_config(args: &ServeArgs, file: &Config) -> ServerConfig {
    ServerConfig {
        // A flag that was passed always wins over the file.
        port: args.port.unwrap_or(file.server.port),
        host: args.host.unwrap_or(file.server.host),
        dataset: file.dataset_path(args.dataset.as_deref()),
        model: file.model.clone(),
    }
}

impl ServerConfig {
    /// # Resolve and Validate Dataset Path (`resolve_dataset`)
    ///
    /// Makes `dataset` absolute and canonical, and checks that it is a file.
    async fn resolve_dataset(&mut self) -> Result<()> {
        // Relative paths from the command line are taken from the working directory.
        let absolute_path = if self.dataset.is_absolute() {
            self.dataset.clone()
        } else {
            env::current_dir()
                .context("Failed to get current working directory")?
                .join(&self.dataset)
        };

        let canonical_path = tokio::fs::canonicalize(&absolute_path)
            .await
            .with_context(|| {
                format!(
                    "Dataset '{}' could not be found or accessed",
                    absolute_path.display()
                )
            })?;
        let metadata = tokio::fs::metadata(&canonical_path)
            .await
            .with_context(|| format!("Failed to get metadata for '{}'", canonical_path.display()))?;
        if !metadata.is_file() {
            anyhow::bail!("Dataset path is not a file: {}", canonical_path.display());
        }

        self.dataset = canonical_path;
        debug!("Resolved dataset to: {}", self.dataset.display());
        Ok(())
    }
}
