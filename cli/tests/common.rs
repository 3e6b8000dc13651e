//! # qabot Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and drives the compiled `qabot` binary through
//! `assert_cmd`.
//!
//! Every command runs inside a scratch directory with `HOME` and
//! `XDG_CONFIG_HOME` pointed at it, so neither a user config nor a
//! `.qabot.toml` from the developer's checkout leaks into the results.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small dataset covering greetings, a few FAQ topics and a repeated answer.
pub const SAMPLE_DATASET: &str = "\
Question,Answer
hello,hi there
hi,hi there
good morning,hi there
what is rust?,A systems programming language.
tell me about rust,A systems programming language.
how do i reset my password?,Use the Forgot password link on the sign-in page.
i forgot my password,Use the Forgot password link on the sign-in page.
what are your opening hours?,We are open 9am to 5pm on weekdays.
when are you open?,We are open 9am to 5pm on weekdays.
goodbye,See you soon!
bye,See you soon!
";

/// # Get qabot Command (`qabot_cmd`)
///
/// Builds a `Command` for the `qabot` binary of the current test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn qabot_cmd() -> Command {
    Command::cargo_bin("qabot").expect("Failed to find qabot binary for testing")
}

/// `qabot_cmd()` isolated to `dir`: working directory and config lookups.
pub fn qabot_in(dir: &Path) -> Command {
    let mut cmd = qabot_cmd();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

/// Creates a scratch directory holding `chatbot_dataset.csv` with `contents`.
pub fn workspace_with_dataset(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("chatbot_dataset.csv");
    fs::write(&path, contents).expect("Failed to write dataset");
    (dir, path)
}
