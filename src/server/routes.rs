// ABOUTME: HTTP routes of the reference backend: /health and the /recipes resource
// ABOUTME: Bodies are read as raw bytes so malformed JSON maps to a 400 with an error message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use super::store::{RecipeInput, RecipeStore};
use crate::api::HealthStatus;
use crate::constants::endpoints;
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, RecipeId, RecipeListItem};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::debug;

/// Shared state of the backend handlers
#[derive(Clone)]
pub struct ServerResources {
    /// Recipe storage
    pub store: Arc<RecipeStore>,
}

impl ServerResources {
    /// Wrap a store
    #[must_use]
    pub fn new(store: RecipeStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Recipe and health routes
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all backend routes
    pub fn routes(resources: ServerResources) -> Router {
        let item_path = format!("{}/:id", endpoints::RECIPES);
        Router::new()
            .route(endpoints::HEALTH, get(Self::handle_health))
            .route(
                endpoints::RECIPES,
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(&item_path, get(Self::handle_get).put(Self::handle_update))
            .fallback(Self::handle_not_found)
            .with_state(resources)
    }

    async fn handle_health(
        State(resources): State<ServerResources>,
    ) -> AppResult<Json<HealthStatus>> {
        resources.store.ping().await?;
        Ok(Json(HealthStatus {
            status: "ok".to_owned(),
        }))
    }

    async fn handle_list(
        State(resources): State<ServerResources>,
    ) -> AppResult<Json<Vec<RecipeListItem>>> {
        Ok(Json(resources.store.list().await?))
    }

    async fn handle_get(
        State(resources): State<ServerResources>,
        Path(id): Path<String>,
    ) -> AppResult<Json<Recipe>> {
        let id = parse_id(&id)?;
        Ok(Json(resources.store.get(id).await?))
    }

    async fn handle_create(
        State(resources): State<ServerResources>,
        body: Bytes,
    ) -> AppResult<(StatusCode, Json<Recipe>)> {
        let input = RecipeInput::from_body(&body)?;
        let recipe = resources.store.create(&input).await?;
        Ok((StatusCode::CREATED, Json(recipe)))
    }

    async fn handle_update(
        State(resources): State<ServerResources>,
        Path(id): Path<String>,
        body: Bytes,
    ) -> AppResult<Json<Recipe>> {
        let id = parse_id(&id)?;
        let input = RecipeInput::from_body(&body)?;
        Ok(Json(resources.store.update(id, &input).await?))
    }

    async fn handle_not_found() -> AppError {
        AppError::not_found("Resource")
    }
}

/// Ids that are not integers do not match the route at all
fn parse_id(raw: &str) -> AppResult<RecipeId> {
    raw.parse::<RecipeId>().map_err(|_| {
        debug!(id = raw, "Non-numeric recipe id");
        AppError::not_found("Resource")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("abc").unwrap_err().is_not_found());
        assert!(parse_id("1.5").unwrap_err().is_not_found());
    }
}
