//! HTTP entry point for the DLE dictionary API.

use std::env;
use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dle_extractor::DleClient;

mod handlers;
mod state;

use state::AppState;

/// Default listen port, overridable via the PORT environment variable.
const DEFAULT_PORT: u16 = 8080;

/// Build the application router.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/wotd", get(handlers::wotd))
        .route("/random", get(handlers::random))
        .route("/search", get(handlers::search))
        .route("/fetch", get(handlers::fetch))
        .route("/keys", get(handlers::keys))
        .route("/anagram", get(handlers::anagram))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = match DleClient::new() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build upstream client");
            std::process::exit(1);
        }
    };

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let app = app(AppState::new(client));

    tracing::info!("listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "failed to bind on {addr}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
