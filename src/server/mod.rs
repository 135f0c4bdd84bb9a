// ABOUTME: Reference REST backend for the recipe client, built on axum and SQLite
// ABOUTME: Wires routes, CORS, body limit, and request tracing; serves until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! # Reference backend
//!
//! A small server speaking the same `/recipes` contract the client expects.
//! It is used by the `wechef-server` binary and by the integration tests,
//! which bind it to `127.0.0.1:0` with an in-memory database.

/// HTTP handlers
pub mod routes;
/// SQLite storage
pub mod store;

pub use routes::{RecipeRoutes, ServerResources};
pub use store::{IngredientInput, RecipeInput, RecipeStore};

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use http::{header, HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// CORS for the configured frontend origin
///
/// An origin that is not a valid header value allows no cross-origin
/// requests at all.
#[must_use]
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allow_origin = match HeaderValue::from_str(config.frontend_url.trim_end_matches('/')) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(e) => {
            warn!(origin = %config.frontend_url, error = %e, "Invalid FRONTEND_URL; CORS disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
}

/// Full application router with middleware
#[must_use]
pub fn app(resources: ServerResources, config: &ServerConfig) -> Router {
    RecipeRoutes::routes(resources)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_content_length))
        .layer(setup_cors(config))
        .layer(TraceLayer::new_for_http())
}

/// Open the database and serve on the configured address until ctrl-c
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the address cannot be bound
pub async fn serve(config: ServerConfig) -> AppResult<()> {
    let listener = TcpListener::bind(config.bind_address())
        .await
        .map_err(|e| AppError::config(format!("Cannot bind {}: {e}", config.bind_address())))?;
    let store = RecipeStore::connect(&config.database_url).await?;
    serve_on(listener, store, &config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections
pub async fn serve_on<F>(
    listener: TcpListener,
    store: RecipeStore,
    config: &ServerConfig,
    shutdown: F,
) -> AppResult<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    let router = app(ServerResources::new(store), config);

    info!(
        address = %address,
        environment = %config.environment,
        frontend = %config.frontend_url,
        "Recipe backend listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Recipe backend stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
