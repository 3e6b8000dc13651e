//! # qabot Chat Server
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! This module serves the chatbot as a single web page: a title, a textarea,
//! a submit button and an output panel that shows either a placeholder prompt
//! or the latest question and its answer.
//!
//! ## Architecture
//!
//! The module is organized into three components:
//! - `config.rs`: merges command-line arguments with configuration files
//! - `handlers.rs`: the page and click handlers
//! - `server_logic.rs`: router, port selection, graceful shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve the bundled dataset on http://localhost:8050
//! qabot serve
//!
//! # Train on another file and listen on all interfaces
//! qabot serve --dataset faq.csv --host 0.0.0.0 --port 9000
//! ```
//!
//! Server startup flow:
//! 1. Load and merge configuration
//! 2. Load the dataset and train the model (before any socket is opened)
//! 3. Compile the page templates
//! 4. Bind a port and serve until interrupted
//!
use crate::core::error::Result;
use crate::core::templating::PageRenderer;
use crate::engine::bot::ChatBot;
use std::sync::Arc;
use tracing::info;

pub use config::ServeArgs;

/// Configuration loading and merging for the chat server.
pub mod config;

/// Request handlers for the chat page.
pub mod handlers;

/// The Axum-based HTTP server.
pub mod server_logic;

/// # Handle Serve Command (`handle_serve`)
///
/// Trains the bot, then serves it until shutdown.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let config = config::load_and_merge_config(args).await?;
    info!("Effective server config: {:?}", config);

    let bot = ChatBot::from_dataset(&config.dataset, &config.model)?;
    let renderer = PageRenderer::new()?;
    let state = Arc::new(handlers::AppState { bot, renderer });

    server_logic::run_server(config, state).await?;
    Ok(())
}
