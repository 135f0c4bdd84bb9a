// ABOUTME: Recipe data-access layer combining the REST client with the query cache
// ABOUTME: Cached reads with one retry; create/update invalidate list and detail entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! # Recipe queries
//!
//! [`RecipeQueries`] is what pages talk to. Reads go through the
//! [`QueryCache`] and are retried once before failing. Mutations are never
//! retried, run one at a time, and on success drop the cached list and the
//! saved recipe's detail so the next read refetches both.

use crate::api::RecipeApi;
use crate::cache::{QueryCache, QueryKey};
use crate::config::ClientConfig;
use crate::constants::cache::{DEFAULT_QUERY_RETRY, DEFAULT_RETRY_DELAY_MS};
use crate::errors::{AppError, AppResult};
use crate::models::{Recipe, RecipeId, RecipeListItem, RecipePayload};
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Cached, retrying access to recipes
pub struct RecipeQueries<A: RecipeApi> {
    api: A,
    cache: QueryCache,
    retry: u32,
    retry_delay: Duration,
    saving: Arc<AtomicBool>,
}

/// Clears the saving flag when the mutation ends, however it ends
struct SavingGuard(Arc<AtomicBool>);

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<A: RecipeApi> RecipeQueries<A> {
    /// Queries over `api` with default cache settings
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_cache(api, QueryCache::default())
    }

    /// Queries over `api` sharing an existing cache
    #[must_use]
    pub fn with_cache(api: A, cache: QueryCache) -> Self {
        Self {
            api,
            cache,
            retry: DEFAULT_QUERY_RETRY,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            saving: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Queries configured from the environment-derived client settings
    #[must_use]
    pub fn from_config(api: A, config: &ClientConfig) -> Self {
        Self::with_cache(api, QueryCache::from_config(config)).with_retry(config.query_retry)
    }

    /// Override the number of automatic retries for reads
    #[must_use]
    pub const fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    /// Override the pause between read attempts
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Underlying client
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Shared query cache
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Recipe list, newest first
    ///
    /// # Errors
    ///
    /// Returns the last error once the retry is exhausted
    pub async fn recipes(&self) -> AppResult<Vec<RecipeListItem>> {
        self.cached_read(QueryKey::RecipeList, || self.api.list_recipes())
            .await
    }

    /// One recipe; `Ok(None)` when no id is given
    ///
    /// # Errors
    ///
    /// Returns the last error once the retry is exhausted; an unknown id is
    /// `ResourceNotFound`
    pub async fn recipe(&self, id: Option<RecipeId>) -> AppResult<Option<Recipe>> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.cached_read(QueryKey::Recipe(id), || self.api.get_recipe(id))
            .await
            .map(Some)
    }

    /// Drop the cached list and fetch it again
    ///
    /// # Errors
    ///
    /// Same as [`Self::recipes`]
    pub async fn refetch_recipes(&self) -> AppResult<Vec<RecipeListItem>> {
        self.cache.invalidate(&QueryKey::RecipeList).await;
        self.recipes().await
    }

    /// Create a recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` while another save is running, or the backend error
    pub async fn create(&self, payload: &RecipePayload) -> AppResult<Recipe> {
        let _guard = self.begin_save()?;
        let recipe = self.api.create_recipe(payload).await?;
        info!(recipe.id = recipe.id, recipe.name = %recipe.name, "Recipe created");
        self.invalidate_after_save(recipe.id).await;
        Ok(recipe)
    }

    /// Replace a recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` while another save is running, or the backend error
    pub async fn update(&self, id: RecipeId, payload: &RecipePayload) -> AppResult<Recipe> {
        let _guard = self.begin_save()?;
        let recipe = self.api.update_recipe(id, payload).await?;
        info!(recipe.id = recipe.id, recipe.name = %recipe.name, "Recipe updated");
        self.invalidate_after_save(recipe.id).await;
        Ok(recipe)
    }

    /// Whether a create or update is in flight
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    fn begin_save(&self) -> AppResult<SavingGuard> {
        self.saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AppError::locked("A recipe is already being saved"))?;
        Ok(SavingGuard(Arc::clone(&self.saving)))
    }

    async fn invalidate_after_save(&self, id: RecipeId) {
        self.cache.invalidate(&QueryKey::RecipeList).await;
        self.cache.invalidate(&QueryKey::Recipe(id)).await;
    }

    async fn cached_read<T, F, Fut>(&self, key: QueryKey, fetch: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned + Sync,
        F: Fn() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        match self.cache.get::<T>(&key).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                self.cache.invalidate(&key).await;
            }
        }

        let value = self.fetch_with_retry(&key, fetch).await?;
        self.cache.set(&key, &value).await?;
        Ok(value)
    }

    async fn fetch_with_retry<T, F, Fut>(&self, key: &QueryKey, fetch: F) -> AppResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt = 0_u32;
        loop {
            match fetch().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retry => {
                    attempt += 1;
                    warn!(key = %key, attempt, error = %e, "Query failed, retrying");
                    if !self.retry_delay.is_zero() {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(e) => {
                    debug!(key = %key, error = %e, "Query failed");
                    return Err(e);
                }
            }
        }
    }
}
