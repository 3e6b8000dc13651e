//! # qabot Page Rendering
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module renders the chat UI with the Tera templating engine. Two
//! templates are compiled into the binary:
//!
//! - `page.html`: the full single-page layout (title, textarea, submit button,
//!   output panel) plus a small script that posts the form in the background
//!   and swaps the returned fragment into the output panel.
//! - `output.html`: the output panel contents, either the two-bubble
//!   transcript or the placeholder prompt.
//!
//! Both names end in `.html`, so Tera escapes every interpolated value; user
//! input and answers from the dataset cannot inject markup.
//!
//! ## Examples
//!
//! ```rust
//! let renderer = PageRenderer::new()?;
//! let panel = OutputPanel::Transcript { user: "Hello".into(), bot: "hi there".into() };
//! let html = renderer.render_page("Hello", 1, &panel)?;
//! ```
//!
use crate::core::error::{QabotError, Result};
use anyhow::{anyhow, Context};
use serde::Serialize;
use tera::Tera;
use tracing::debug;

/// Heading and document title of the chat page.
pub const PAGE_TITLE: &str = "🤖 AI Chatbot";

/// Shown in the output panel before the first question and for blank input.
pub const PLACEHOLDER_PROMPT: &str = "✨ Ask me something! ✨";

const PAGE_TEMPLATE: &str = "page.html";
const OUTPUT_TEMPLATE: &str = "output.html";

/// What the output panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPanel {
    Placeholder,
    Transcript { user: String, bot: String },
}

#[derive(Serialize)]
struct TranscriptView<'a> {
    user: &'a str,
    bot: &'a str,
}

/// Holds the compiled page templates.
#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Compiles the embedded templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (PAGE_TEMPLATE, include_str!("../../templates/page.html")),
            (OUTPUT_TEMPLATE, include_str!("../../templates/output.html")),
        ])
        .map_err(|e| anyhow!(QabotError::Template { source: e }))
        .context("Failed to compile page templates")?;
        debug!("Compiled page templates");
        Ok(Self { tera })
    }

    /// Renders the whole page with the textarea holding `user_input` and the
    /// click counter at `n_clicks`.
    pub fn render_page(&self, user_input: &str, n_clicks: u64, panel: &OutputPanel) -> Result<String> {
        let mut context = panel_context(panel);
        context.insert("title", PAGE_TITLE);
        context.insert("user_input", user_input);
        context.insert("n_clicks", &n_clicks);
        self.render(PAGE_TEMPLATE, &context)
    }

    /// Renders just the output panel contents.
    pub fn render_output(&self, panel: &OutputPanel) -> Result<String> {
        self.render(OUTPUT_TEMPLATE, &panel_context(panel))
    }

    fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(template, context)
            .map_err(|e| anyhow!(QabotError::Template { source: e }))
            .with_context(|| format!("Tera rendering failed for template '{}'", template))
    }
}

fn panel_context(panel: &OutputPanel) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("placeholder", PLACEHOLDER_PROMPT);
    if let OutputPanel::Transcript { user, bot } = panel {
        context.insert("transcript", &TranscriptView { user, bot });
    }
    context
}
