// ABOUTME: REST client for the recipe backend and the trait the data layer depends on
// ABOUTME: Maps non-2xx responses to errors carrying the status and response body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! Recipe REST client
//!
//! [`RecipeApi`] is the seam between the data-access layer and the network.
//! [`ApiClient`] implements it with `reqwest` against the backend's
//! `/recipes` endpoints.
//!
//! ```rust,no_run
//! use wechef::api::{ApiClient, RecipeApi};
//! use wechef::config::ClientConfig;
//!
//! # async fn example() -> wechef::errors::AppResult<()> {
//! let client = ApiClient::new(&ClientConfig::default())?;
//! for recipe in client.list_recipes().await? {
//!     println!("{} {}", recipe.id, recipe.name);
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::ClientConfig;
use crate::constants::endpoints;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{Recipe, RecipeId, RecipeListItem, RecipePayload};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Operations the backend offers
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// `GET /recipes`, newest first
    async fn list_recipes(&self) -> AppResult<Vec<RecipeListItem>>;

    /// `GET /recipes/{id}`
    async fn get_recipe(&self, id: RecipeId) -> AppResult<Recipe>;

    /// `POST /recipes`
    async fn create_recipe(&self, payload: &RecipePayload) -> AppResult<Recipe>;

    /// `PUT /recipes/{id}`
    async fn update_recipe(&self, id: RecipeId, payload: &RecipePayload) -> AppResult<Recipe>;
}

#[async_trait]
impl<T: RecipeApi + ?Sized> RecipeApi for Arc<T> {
    async fn list_recipes(&self) -> AppResult<Vec<RecipeListItem>> {
        (**self).list_recipes().await
    }

    async fn get_recipe(&self, id: RecipeId) -> AppResult<Recipe> {
        (**self).get_recipe(id).await
    }

    async fn create_recipe(&self, payload: &RecipePayload) -> AppResult<Recipe> {
        (**self).create_recipe(payload).await
    }

    async fn update_recipe(&self, id: RecipeId, payload: &RecipePayload) -> AppResult<Recipe> {
        (**self).update_recipe(id, payload).await
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"ok"` when the backend is up
    pub status: String,
}

/// `reqwest`-backed client
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Build a client for `config.api_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be constructed
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy
    pub async fn health(&self) -> AppResult<HealthStatus> {
        self.request::<HealthStatus, ()>(Method::GET, endpoints::HEALTH, None)
            .await?
            .ok_or_else(|| empty_body(endpoints::HEALTH))
    }

    /// Send a JSON request and decode the JSON response
    ///
    /// `Ok(None)` means the backend answered 204.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, %url, "Sending recipe API request");

        let mut request = self
            .http_client
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let value = response.json::<T>().await?;
        Ok(Some(value))
    }
}

#[async_trait]
impl RecipeApi for ApiClient {
    async fn list_recipes(&self) -> AppResult<Vec<RecipeListItem>> {
        Ok(self
            .request::<Vec<RecipeListItem>, ()>(Method::GET, endpoints::RECIPES, None)
            .await?
            .unwrap_or_default())
    }

    async fn get_recipe(&self, id: RecipeId) -> AppResult<Recipe> {
        let path = format!("{}/{id}", endpoints::RECIPES);
        self.request::<Recipe, ()>(Method::GET, &path, None)
            .await?
            .ok_or_else(|| empty_body(&path))
    }

    async fn create_recipe(&self, payload: &RecipePayload) -> AppResult<Recipe> {
        self.request(Method::POST, endpoints::RECIPES, Some(payload))
            .await?
            .ok_or_else(|| empty_body(endpoints::RECIPES))
    }

    async fn update_recipe(&self, id: RecipeId, payload: &RecipePayload) -> AppResult<Recipe> {
        let path = format!("{}/{id}", endpoints::RECIPES);
        self.request(Method::PUT, &path, Some(payload))
            .await?
            .ok_or_else(|| empty_body(&path))
    }
}

/// Error for a non-2xx response: `HTTP {status}: {body}`, body omitted when blank
#[must_use]
pub fn status_error(status: StatusCode, body: &str) -> AppError {
    let body = body.trim();
    let message = if body.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {body}", status.as_u16())
    };
    let code = if status == StatusCode::NOT_FOUND {
        ErrorCode::ResourceNotFound
    } else {
        ErrorCode::ExternalServiceError
    };
    AppError::new(code, message)
}

fn empty_body(path: &str) -> AppError {
    AppError::external_service(format!("Empty response from {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_messages() {
        let error = status_error(StatusCode::BAD_REQUEST, "  {\"error\": \"bad\"}\n");
        assert_eq!(error.message, "HTTP 400: {\"error\": \"bad\"}");
        assert_eq!(error.code, ErrorCode::ExternalServiceError);

        let error = status_error(StatusCode::NOT_FOUND, "");
        assert_eq!(error.message, "HTTP 404");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_base_url_has_no_trailing_slash() {
        let config = ClientConfig {
            api_url: "http://localhost:5000/".to_owned(),
            ..ClientConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
