// ABOUTME: Main library entry point for the WeChef recipe costing client
// ABOUTME: Validation, cost summaries, REST data layer, navigation, pages, and a reference backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

#![deny(unsafe_code)]

//! # WeChef
//!
//! A recipe costing client. Users list recipes, open one in the calculator,
//! edit its servings and ingredient lines, and see line, total, and
//! per-serving costs update as they type. Saving validates the form and
//! sends exactly one create or update to a REST backend.
//!
//! ## Layers
//!
//! - **validation** / **form** / **summary**: form values, schema checks, derived costs
//! - **api**: `reqwest` client for the `/recipes` REST contract
//! - **cache** / **recipes**: query cache with staleness and invalidation on writes
//! - **navigation** / **pages** / **app**: routes, page view-models, top-level state
//! - **server** (feature `server`): axum + SQLite backend speaking the same contract
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wechef::api::ApiClient;
//! use wechef::config::ClientConfig;
//! use wechef::pages::{RecipesPage, RecipesView};
//! use wechef::recipes::RecipeQueries;
//!
//! # async fn example() -> wechef::errors::AppResult<()> {
//! let config = ClientConfig::from_env();
//! let queries = RecipeQueries::from_config(ApiClient::new(&config)?, &config);
//! if let RecipesView::Loaded(rows) = RecipesPage::load(&queries).await {
//!     println!("{} recipes", rows.len());
//! }
//! # Ok(())
//! # }
//! ```

pub use wechef_core::{constants, errors, models, number};

/// REST client and the `RecipeApi` seam
pub mod api;

/// Top-level application state
pub mod app;

/// Query cache with staleness and key invalidation
pub mod cache;

/// Environment-based configuration
pub mod config;

/// Calculator form state
pub mod form;

/// Structured logging setup
pub mod logging;

/// Client-side routes and history
pub mod navigation;

/// Success and error notifications
pub mod notifications;

/// Page view-models
pub mod pages;

/// Cached reads and invalidating writes
pub mod recipes;

/// Reference REST backend
#[cfg(feature = "server")]
pub mod server;

/// Derived costs
pub mod summary;

/// Form values and schema validation
pub mod validation;
