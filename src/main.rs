mod client;
mod config;
mod error;
mod extract;
mod handlers;
mod logger;
mod metrics;
mod models;
mod prompts;
mod tasks;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use axum::{routing::{get, post, Router}};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use client::{CompletionProvider, HttpProvider};
use config::Config;
use metrics::Metrics;

// shared by every handler, nothing in here is mutated after startup
// except the atomic counters
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub metrics: Arc<Metrics>,
    pub log_path: Option<String>
}

pub fn app(state: AppState) -> Router {

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/analyze", post(handlers::analyze_handler))
        .route("/api/rewrite", post(handlers::rewrite_handler))
        .route("/api/refine", post(handlers::refine_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)

}

#[tokio::main]
async fn main() -> anyhow::Result<()> {

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // refuse to start without credentials
    let config = Config::from_env()?;

    let provider = HttpProvider::new(&config)?;

    let state = AppState {
        provider: Arc::new(provider),
        metrics: Arc::new(Metrics::new()),
        log_path: Some(config.log_path.clone())
    };

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let listener = TcpListener::bind(addr).await?;
    info!(model = %config.model, "listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())

}
