//! # qabot Request Handlers
//!
//! File: cli/src/commands/serve/handlers.rs
//!
//! ## Overview
//!
//! The chat page has one interactive control, so there are two handlers:
//!
//! - `index` (`GET /`) renders the page in its idle state: empty textarea,
//!   click counter at 0, placeholder in the output panel.
//! - `update` (`POST /`) is the click handler. The form carries the live
//!   textarea value and the click counter; the counter is incremented and
//!   `update_output` decides what the output panel shows.
//!
//! Requests sent by the page script (`X-Requested-With: fetch`) receive only
//! the output panel fragment, with the new counter in `X-Qabot-Clicks`.
//! Plain form posts receive the full page.
//!
use crate::core::error::Result;
use crate::core::templating::{OutputPanel, PageRenderer};
use crate::engine::bot::ChatBot;
use axum::{
    extract::{Form, State},
    http::{header::HeaderName, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};

/// Header the page script sets on background submissions.
const FETCH_HEADER: &str = "x-requested-with";
/// Response header carrying the updated click counter.
pub const CLICKS_HEADER: &str = "x-qabot-clicks";

/// Everything the handlers share. Built once before the server starts and
/// never mutated.
#[derive(Debug)]
pub struct AppState {
    pub bot: ChatBot,
    pub renderer: PageRenderer,
}

/// Body of a submit-button click.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub user_input: String,
    #[serde(default)]
    pub n_clicks: u64,
}

/// # Update Output (`update_output`)
///
/// Shows the transcript once the button has been clicked with non-blank
/// input; otherwise the placeholder.
pub fn update_output(n_clicks: u64, user_input: &str, bot: &ChatBot) -> OutputPanel {
    if n_clicks == 0 {
        return OutputPanel::Placeholder;
    }
    match bot.respond(user_input) {
        Some(answer) => OutputPanel::Transcript {
            user: user_input.to_string(),
            bot: answer.to_string(),
        },
        None => OutputPanel::Placeholder,
    }
}

/// `GET /`
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let html = state
        .renderer
        .render_page("", 0, &OutputPanel::Placeholder);
    into_html(html)
}

/// `POST /`
pub async fn update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<UpdateForm>,
) -> Response {
    // This request is one more click.
    let n_clicks = form.n_clicks.saturating_add(1);
    let panel = update_output(n_clicks, &form.user_input, &state.bot);
    debug!("Click {} -> {:?}", n_clicks, panel);

    // The page script asks for the panel only; plain form posts get the page.
    let is_fetch = headers
        .get(FETCH_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("fetch"));

    if is_fetch {
        let fragment = state.renderer.render_output(&panel);
        // The script reads the new counter back from this header.
        let clicks = [(HeaderName::from_static(CLICKS_HEADER), n_clicks.to_string())];
        match fragment {
            Ok(body) => (clicks, Html(body)).into_response(),
            Err(e) => render_failure(e),
        }
    } else {
        into_html(state.renderer.render_page(&form.user_input, n_clicks, &panel))
    }
}

fn into_html(rendered: Result<String>) -> Response {
    match rendered {
        Ok(body) => Html(body).into_response(),
        Err(e) => render_failure(e),
    }
}

fn render_failure(e: anyhow::Error) -> Response {
    error!("Failed to render chat page: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
}
