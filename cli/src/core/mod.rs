//! # qabot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: configuration loading, merging, and validation
//! - `error`: error types and the crate-wide `Result` alias
//! - `templating`: rendering of the chat page
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{QabotError, Result}; // For error handling
//! use crate::core::templating::PageRenderer; // For rendering the page
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
