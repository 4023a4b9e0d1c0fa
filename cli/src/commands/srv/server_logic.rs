//! # Chat Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//!
//! ## Overview
//!
//! Serves one shared conversation over HTTP:
//!
//! | Method | Path              | Body / Response                                   |
//! |--------|-------------------|---------------------------------------------------|
//! | POST   | `/api/chat`       | `{"message": "..."}` → `{"messages": [user, bot]}` |
//! | GET    | `/api/messages`   | `{"messages": [...]}` (whole log, oldest first)    |
//! | GET    | `/api/categories` | `{"categories": [...], "defaultReplies": [...]}`   |
//!
//! A blank message gets `422 Unprocessable Entity` and leaves the log alone.
//! When a static directory is configured, every other path is served from it.
//!
//! The conversation sits behind a `tokio::sync::Mutex` that is held for a whole
//! turn, so concurrent posts are answered one after another and the log keeps
//! submission order.
//!
//! Startup tries up to 10 consecutive ports and shuts down gracefully on
//! Ctrl+C or SIGTERM.
//!
use super::config::ServerConfig;
use super::utils;
use crate::common::conversation::{Conversation, Message};
use crate::common::responder::{Category, DEFAULT_REPLIES};
use crate::core::error::Result;
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

const MAX_PORT_ATTEMPTS: u8 = 10;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    conversation: Arc<Mutex<Conversation>>,
}

impl AppState {
    pub fn new(conversation: Conversation) -> Self {
        Self {
            conversation: Arc::new(Mutex::new(conversation)),
        }
    }
}

#[derive(Deserialize, Debug)]
struct ChatRequest {
    message: String,
}

#[derive(Serialize)]
struct MessagesResponse {
    messages: Vec<Message>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoriesResponse {
    categories: Vec<Category>,
    default_replies: [&'static str; 2],
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Binds, prints the startup banner and serves until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig, conversation: Conversation, bot_name: &str) -> Result<()> {
    let listener = bind_available_port(config.host, config.port, MAX_PORT_ATTEMPTS).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read the bound server address")?;

    let app = create_app(&config, AppState::new(conversation));

    for line in utils::banner_lines(bot_name, addr, &config, utils::local_network_ip()) {
        println!("{}", line);
    }
    info!("Starting chat server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Builds the router: the API routes, the optional static fallback, tracing and CORS.
pub(crate) fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let cors_layer = if config.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(true))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let api = Router::new()
        .route("/api/chat", post(post_chat))
        .route("/api/messages", get(get_messages))
        .route("/api/categories", get(get_categories))
        .with_state(state);

    let app = match &config.static_dir {
        Some(dir) => {
            info!("Serving front end from {}", dir.display());
            api.fallback_service(ServeDir::new(dir))
        }
        None => api,
    };

    app.layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
}

async fn post_chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let mut conversation = state.conversation.lock().await;
    match conversation.submit(&request.message).await {
        Some(turn) => Json(MessagesResponse {
            messages: turn.to_vec(),
        })
        .into_response(),
        None => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                error: "message must not be blank",
            }),
        )
            .into_response(),
    }
}

async fn get_messages(State(state): State<AppState>) -> Json<MessagesResponse> {
    let conversation = state.conversation.lock().await;
    Json(MessagesResponse {
        messages: conversation.messages().to_vec(),
    })
}

async fn get_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let conversation = state.conversation.lock().await;
    Json(CategoriesResponse {
        categories: conversation.table().as_slice().to_vec(),
        default_replies: DEFAULT_REPLIES,
    })
}

/// Completes on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down..."),
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, shutting down...");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

/// Binds the first free port in `start_port..start_port + max_attempts`.
///
/// The listener is returned bound, so nothing can grab the port between the
/// check and the server start.
async fn bind_available_port(host: IpAddr, start_port: u16, max_attempts: u8) -> Result<TcpListener> {
    for attempt in 0..max_attempts {
        let Some(port) = start_port.checked_add(u16::from(attempt)) else {
            break;
        };
        let addr = SocketAddr::new(host, port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if attempt > 0 {
                    info!("Port {} was unavailable, using {} instead.", start_port, port);
                }
                return Ok(listener);
            }
            Err(e) => warn!(
                "Attempt {}: cannot bind {} ({}). Trying next port...",
                attempt + 1,
                addr,
                e
            ),
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        host,
        start_port,
        max_attempts
    )
}
