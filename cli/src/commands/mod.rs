//! # qabot Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the qabot CLI. Each
//! command defines its own clap argument struct and an async handler that
//! `main.rs` dispatches to.
//!
//! ## Commands
//!
//! - `serve`: train the bot and serve the chat page (the default)
//! - `ask`: train the bot and answer one question on stdout
//! - `evaluate`: measure held-out accuracy with a seeded split
//!

/// One-shot question answering from the command line.
pub mod ask;
/// Seeded hold-out evaluation of the pipeline.
pub mod evaluate;
/// The chat web server. Includes configuration, handlers and server logic.
pub mod serve;
