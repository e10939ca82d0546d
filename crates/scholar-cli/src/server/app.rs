//! Axum application setup.

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Objects of any kind
        .route("/objects/:id", get(handlers::get_object))
        .route("/objects/:id/citations", get(handlers::get_citations))
        // Author derivations
        .route("/authors/:id/network", get(handlers::get_network))
        .route("/authors/:id/works", get(handlers::get_works))
        // View counters
        .route("/works/hot", get(handlers::get_hot_works));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;

    tracing::info!(addr = %listener.local_addr()?, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
