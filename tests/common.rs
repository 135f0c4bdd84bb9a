// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Quiet tracing, an in-memory backend on a random port, and a recording fake RecipeApi
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors
#![allow(
    dead_code,
    missing_docs,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `wechef`

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wechef::api::{ApiClient, RecipeApi};
use wechef::config::{ClientConfig, DatabaseUrl, ServerConfig};
use wechef::errors::{AppError, AppResult};
use wechef::models::{
    Ingredient, IngredientPayload, Recipe, RecipeId, RecipeListItem, RecipePayload,
};
use wechef::recipes::RecipeQueries;
use wechef::server::{self, RecipeStore};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Backend running on `127.0.0.1:<random>` with an in-memory database
pub struct TestBackend {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start the reference backend for one test
pub async fn spawn_backend() -> Result<TestBackend> {
    init_test_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let config = ServerConfig {
        database_url: DatabaseUrl::Memory,
        ..ServerConfig::default()
    };
    let store = RecipeStore::connect(&config.database_url).await?;
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown = async move {
            let _ = rx.await;
        };
        if let Err(e) = server::serve_on(listener, store, &config, shutdown).await {
            tracing::error!(error = %e, "Test backend failed");
        }
    });

    Ok(TestBackend {
        base_url: format!("http://{address}"),
        shutdown: Some(tx),
    })
}

/// Client settings pointing at `base_url`
pub fn client_config(base_url: &str) -> ClientConfig {
    ClientConfig::default().with_api_url(base_url).unwrap()
}

/// Real HTTP client for a running backend
pub fn api_client(backend: &TestBackend) -> ApiClient {
    ApiClient::new(&client_config(&backend.base_url)).unwrap()
}

/// Queries that retry once without sleeping
pub fn queries<A: RecipeApi>(api: A) -> RecipeQueries<A> {
    RecipeQueries::new(api).with_retry_delay(Duration::ZERO)
}

/// Valid payload with the given lines of `(name, quantity, unit_cost)`
pub fn payload(name: &str, servings: i64, lines: &[(&str, f64, f64)]) -> RecipePayload {
    RecipePayload {
        name: name.to_owned(),
        servings,
        ingredients: lines
            .iter()
            .map(|(name, quantity, unit_cost)| IngredientPayload {
                name: (*name).to_owned(),
                category: None,
                unit: None,
                quantity: *quantity,
                unit_cost: *unit_cost,
            })
            .collect(),
    }
}

/// One call received by [`RecordingApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Get(RecipeId),
    Create(RecipePayload),
    Update(RecipeId, RecipePayload),
}

/// In-memory `RecipeApi` that records every call
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<ApiCall>>,
    recipes: Mutex<BTreeMap<RecipeId, Recipe>>,
    read_failures: AtomicU32,
    fail_writes: AtomicBool,
    panic_on_get: AtomicBool,
    write_delay: Mutex<Duration>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a recipe directly, bypassing the call log
    pub fn seed(&self, payload: &RecipePayload) -> Recipe {
        let mut recipes = self.recipes.lock().unwrap();
        let id = recipes.keys().next_back().copied().unwrap_or(0) + 1;
        let recipe = to_recipe(id, payload);
        recipes.insert(id, recipe.clone());
        recipe
    }

    /// Fail the next `count` list/get calls
    pub fn fail_next_reads(&self, count: u32) {
        self.read_failures.store(count, Ordering::SeqCst);
    }

    /// Fail every create/update
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Panic inside `get_recipe`
    pub fn panic_on_get(&self, panic: bool) {
        self.panic_on_get.store(panic, Ordering::SeqCst);
    }

    /// Hold every create/update for `delay`
    pub fn delay_writes(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matcher: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matcher(c)).count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_read_failure(&self) -> bool {
        self.read_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    async fn before_write(&self) -> AppResult<()> {
        let delay = *self.write_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::external_service("HTTP 500: database is locked"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeApi for RecordingApi {
    async fn list_recipes(&self) -> AppResult<Vec<RecipeListItem>> {
        self.record(ApiCall::List);
        if self.take_read_failure() {
            return Err(AppError::unavailable("connection refused"));
        }
        let mut rows: Vec<RecipeListItem> = self
            .recipes
            .lock()
            .unwrap()
            .values()
            .map(Recipe::list_item)
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get_recipe(&self, id: RecipeId) -> AppResult<Recipe> {
        self.record(ApiCall::Get(id));
        assert!(
            !self.panic_on_get.load(Ordering::SeqCst),
            "get_recipe exploded"
        );
        if self.take_read_failure() {
            return Err(AppError::unavailable("connection refused"));
        }
        self.recipes
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("HTTP 404: Not Found"))
    }

    async fn create_recipe(&self, payload: &RecipePayload) -> AppResult<Recipe> {
        self.record(ApiCall::Create(payload.clone()));
        self.before_write().await?;
        let mut recipes = self.recipes.lock().unwrap();
        let id = recipes.keys().next_back().copied().unwrap_or(0) + 1;
        let recipe = to_recipe(id, payload);
        recipes.insert(id, recipe.clone());
        Ok(recipe)
    }

    async fn update_recipe(&self, id: RecipeId, payload: &RecipePayload) -> AppResult<Recipe> {
        self.record(ApiCall::Update(id, payload.clone()));
        self.before_write().await?;
        let mut recipes = self.recipes.lock().unwrap();
        let Some(existing) = recipes.get(&id) else {
            return Err(AppError::not_found("HTTP 404: Not Found"));
        };
        let mut recipe = to_recipe(id, payload);
        recipe.created_at = existing.created_at;
        recipes.insert(id, recipe.clone());
        Ok(recipe)
    }
}

fn to_recipe(id: RecipeId, payload: &RecipePayload) -> Recipe {
    let now = Utc::now();
    Recipe {
        id,
        name: payload.name.clone(),
        servings: payload.servings,
        ingredients: payload
            .ingredients
            .iter()
            .zip(1..)
            .map(|(line, line_id)| Ingredient {
                id: id * 1000 + line_id,
                name: line.name.clone(),
                category: line.category.clone(),
                unit: line.unit.clone(),
                quantity: line.quantity,
                unit_cost: line.unit_cost,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}
