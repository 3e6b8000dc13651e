//! # qabot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for qabot, a question-answering
//! chatbot that learns from a CSV of question/answer pairs. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - `engine`: dataset loading, preprocessing, TF-IDF, naive Bayes, `ChatBot`
//! - `core`: configuration, errors, page templates
//! - `commands`: `serve`, `ask`, `evaluate`
//!
//! Running `qabot` without a subcommand is the same as `qabot serve`.
//!
//! ## Examples
//!
//! ```bash
//! # Start the chat page on http://localhost:8050
//! qabot
//!
//! # Answer one question with debug logging
//! qabot -vv ask "hello"
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (serve, ask, evaluate)
mod core; // Configuration, errors, templating
mod engine; // The question-answering model

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "qabot",
    about = "🤖 qabot: a question-answering chatbot trained on a Question,Answer CSV",
    long_about = "Trains a TF-IDF + naive-Bayes classifier on question/answer pairs and\n\
                  answers new questions with the closest stored answer, either on a\n\
                  single-page web UI or from the command line.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    #[command(alias = "e")]
    Evaluate(commands::evaluate::EvaluateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle_serve(args).await,
        Some(Commands::Ask(args)) => commands::ask::handle_ask(args).await,
        Some(Commands::Evaluate(args)) => commands::evaluate::handle_evaluate(args).await,
        None => commands::serve::handle_serve(commands::serve::ServeArgs::default()).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
