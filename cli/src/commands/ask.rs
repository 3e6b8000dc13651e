//! # qabot Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! Trains the bot exactly as `qabot serve` would and answers a single
//! question on stdout. Blank questions print the same placeholder prompt the
//! web page shows.
//!
//! ```bash
//! qabot ask "How do I reset my password?"
//! qabot ask --dataset faq.csv what are your opening hours
//! ```
//!
use crate::core::config;
use crate::core::error::Result;
use crate::core::templating::PLACEHOLDER_PROMPT;
use crate::engine::bot::ChatBot;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `qabot ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// CSV file with `Question,Answer` columns to train on.
    #[arg(long, short)]
    pub dataset: Option<PathBuf>,

    /// The question. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

/// # Handle Ask Command (`handle_ask`)
pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let dataset = cfg.dataset_path(args.dataset.as_deref());
    let question = args.question.join(" ");
    info!("Answering {:?} with dataset {}", question, dataset.display());

    let bot = ChatBot::from_dataset(&dataset, &cfg.model)?;
    println!("{}", answer_line(&bot, &question));
    Ok(())
}

/// The line printed for `question`: the bot's answer, or the placeholder for
/// blank input.
fn answer_line<'a>(bot: &'a ChatBot, question: &str) -> &'a str {
    bot.respond(question).unwrap_or(PLACEHOLDER_PROMPT)
}
