//! otel-blog server
//!
//! A small blog (list, view, create, edit, delete posts) backed by an
//! embedded SQLite file. Every handler runs in a trace span exported to an
//! OpenTelemetry collector over OTLP.

mod config;
mod error;
mod extractors;
mod flash;
mod handlers;
mod storage;
mod telemetry;
mod views;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use blog_core::PostStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::Config;
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    let telemetry_guard = match telemetry::init(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("[FATAL] Failed to initialize telemetry: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Starting otel-blog v{}", env!("CARGO_PKG_VERSION"));
    info!("Exporting traces to {}", config.otlp_endpoint);

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        drop(telemetry_guard);
        std::process::exit(1);
    }

    drop(telemetry_guard);
}

async fn run_server(config: Config) -> Result<()> {
    info!("Initializing SQLite database...");
    let db = Database::new(&config.database_path)
        .await
        .context("Failed to initialize database")?;
    info!("SQLite database initialized at: {}", config.database_path);

    let state = AppState::new(Arc::new(db));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::posts::index))
        .route("/health", get(handlers::health))
        .route(
            "/create",
            get(handlers::posts::create_form).post(handlers::posts::create),
        )
        .route("/:id", get(handlers::posts::show))
        .route(
            "/:id/edit",
            get(handlers::posts::edit_form).post(handlers::posts::edit),
        )
        .route("/:id/delete", post(handlers::posts::delete))
        .fallback(handlers::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(telemetry::request_span::<axum::body::Body>),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
