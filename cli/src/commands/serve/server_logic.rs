//! # qabot HTTP Server Implementation
//!
//! File: cli/src/commands/serve/server_logic.rs
//!
//! ## Overview
//!
//! This module runs the chat page over HTTP:
//! - One route, `/`, with a `GET` handler for the page and a `POST` handler
//!   for button clicks
//! - Port availability checking with automatic fallback
//! - Request tracing
//! - Graceful shutdown on Ctrl+C / SIGTERM
//!
//! ## Architecture
//!
//! The model is trained before this module is entered; `run_server` receives
//! the finished `AppState` and only serves it:
//! 1. Bind the requested port, or the next free one if it is in use
//! 2. Build the Axum router around the shared state
//! 3. Print connection information
//! 4. Serve until a shutdown signal arrives
//!
use super::config::ServerConfig;
use super::handlers::{self, AppState};
use crate::core::error::Result;
use anyhow::Context;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{error, info, warn, Level};

/// # Run HTTP Server (`run_server`)
///
/// Binds the first free port at or after `config.port` and serves the chat
/// page on that listener until shutdown.
///
/// ## Errors
///
/// Returns an error if no port can be bound within the allowed attempts or the
/// server fails while running.
pub async fn run_server(config: ServerConfig, state: Arc<AppState>) -> Result<()> {
    // Bind once; the listener found here is the one that serves.
    let max_port_attempts = 10;
    let listener = find_available_port(config.host, config.port, max_port_attempts).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read the bound listener address")?;

    // Capture banner figures before the state moves into the router.
    let answers = state.bot.answers().len();
    let rows = state.bot.training_rows();
    let app = create_app(state);

    // Display connection information.
    println!("\n=================================================================");
    println!("🤖 Dataset:           {}", config.dataset.display());
    println!("📚 Trained on:        {} questions, {} answers", rows, answers);
    println!("🌐 Local URL:         http://localhost:{}", addr.port());
    println!("⚙️  Binding to address: {}", addr);
    println!("=================================================================\n");

    info!("Starting server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    // Serve until Ctrl+C or SIGTERM.
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves when Ctrl+C or (on Unix) SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and then each following port, up to `max_attempts`
/// ports in total, returning the listener bound to the first free one.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<TcpListener> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(listener);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                // No port above 65535 to fall back to.
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router: `GET /` renders the page, `POST /` handles a click.
/// Any other path is a 404.
pub fn create_app(state: Arc<AppState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(handlers::index).post(handlers::update))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(trace_layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::templating::{PageRenderer, PLACEHOLDER_PROMPT};
    use crate::engine::bot::ChatBot;
    use crate::engine::dataset::QaRecord;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::net::Ipv4Addr;
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let bot = ChatBot::fit(
            &[
                QaRecord::new("hello", "hi there"),
                QaRecord::new("how are you", "Doing well, thanks"),
                QaRecord::new("what is rust", "A systems programming language"),
            ],
            1.0,
        )
        .unwrap();
        Arc::new(AppState {
            bot,
            renderer: PageRenderer::new().unwrap(),
        })
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_find_available_port_start_is_free() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 50050;
        let listener = find_available_port(host, start_port, 5).await?;
        let addr = listener.local_addr()?;
        assert_eq!(addr.port(), start_port);
        assert_eq!(addr.ip(), host);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_available_port_start_occupied() -> Result<()> {
        let host = Ipv4Addr::LOCALHOST.into();
        let start_port = 51050;
        let _listener = TcpListener::bind(SocketAddr::new(host, start_port)).await?;

        let listener = find_available_port(host, start_port, 5).await?;
        let addr = listener.local_addr()?;
        assert!(addr.port() > start_port);
        assert!(addr.port() < start_port + 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_found_port_stays_reserved_and_serves() -> Result<()> {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let host = Ipv4Addr::LOCALHOST.into();
        let listener = find_available_port(host, 52050, 5).await?;
        let addr = listener.local_addr()?;

        // Nobody else can take the port between finding and serving.
        assert!(TcpListener::bind(addr).await.is_err());

        let server = tokio::spawn(async move {
            axum::serve(listener, create_app(test_state()).into_make_service()).await
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await?;
        stream
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await?;
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await?;
        let response = String::from_utf8_lossy(&response);
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains(PLACEHOLDER_PROMPT));

        server.abort();
        Ok(())
    }

    #[tokio::test]
    async fn test_get_index_shows_placeholder() {
        let app = create_app(test_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("🤖 AI Chatbot"));
        assert!(html.contains(PLACEHOLDER_PROMPT));
        assert!(!html.contains("Bot:"));
    }

    #[tokio::test]
    async fn test_post_question_renders_transcript() {
        let app = create_app(test_state());
        let response = app.oneshot(post_form("user_input=Hello&n_clicks=0")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("👤 You: Hello"));
        assert!(html.contains("🤖 Bot: hi there"));
        // Counter advanced and textarea keeps the submitted text.
        assert!(html.contains("name=\"n_clicks\" value=\"1\""));
        assert!(html.contains(">Hello</textarea>"));
    }

    #[tokio::test]
    async fn test_post_blank_renders_placeholder() {
        let app = create_app(test_state());
        for body in ["user_input=&n_clicks=0", "user_input=+++&n_clicks=4", "n_clicks=2"] {
            let response = app.clone().oneshot(post_form(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let html = body_text(response).await;
            assert!(html.contains(PLACEHOLDER_PROMPT), "body {:?}", body);
            assert!(!html.contains("Bot:"), "body {:?}", body);
        }
    }

    #[tokio::test]
    async fn test_fetch_post_returns_fragment() {
        let app = create_app(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("X-Requested-With", "fetch")
            .body(Body::from("user_input=what+is+rust%3F&n_clicks=6"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(handlers::CLICKS_HEADER).unwrap(),
            "7"
        );
        let html = body_text(response).await;
        assert!(!html.contains("<html"));
        assert!(html.contains("👤 You: what is rust?"));
        assert!(html.contains("🤖 Bot: A systems programming language"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let app = create_app(test_state());
        let response = app
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
