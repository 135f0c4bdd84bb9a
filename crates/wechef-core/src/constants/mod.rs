// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Defaults, environment variable names, cache timings, and user-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! Constants grouped by domain.

/// Query cache timings and capacity
pub mod cache;
/// User-facing validation and page messages
pub mod messages;

/// Default connection and server settings
pub mod defaults {
    /// REST backend used when no base URL is configured
    pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
    /// Reference backend database
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:wechef.db";
    /// Origin allowed by the reference backend's CORS layer
    pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
    /// Reference backend bind host
    pub const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
    /// Reference backend port
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
    /// Maximum accepted request body
    pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 2 * 1024 * 1024;
    /// Per-request timeout for the REST client
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
    /// Longest ingredient name the backend stores
    pub const MAX_INGREDIENT_NAME_LEN: usize = 255;
    /// Largest servings count the form accepts
    pub const MAX_SERVINGS: i64 = 10_000;
}

/// Environment variable names
pub mod env_config {
    /// REST backend base URL
    pub const API_URL: &str = "WECHEF_API_URL";
    /// Base URL variable understood by the web build, used as a fallback
    pub const LEGACY_API_URL: &str = "VITE_API_URL";
    /// Query stale time in seconds
    pub const STALE_TIME_SECS: &str = "WECHEF_STALE_TIME_SECS";
    /// Automatic retries for read queries
    pub const QUERY_RETRY: &str = "WECHEF_QUERY_RETRY";
    /// REST client timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "WECHEF_REQUEST_TIMEOUT_SECS";
    /// Query cache capacity
    pub const CACHE_MAX_ENTRIES: &str = "CACHE_MAX_ENTRIES";
    /// Reference backend database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Reference backend CORS origin
    pub const FRONTEND_URL: &str = "FRONTEND_URL";
    /// Reference backend bind host
    pub const HTTP_HOST: &str = "HTTP_HOST";
    /// Reference backend port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Reference backend body limit in bytes
    pub const MAX_CONTENT_LENGTH: &str = "MAX_CONTENT_LENGTH";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// REST endpoint paths
pub mod endpoints {
    /// Recipe collection
    pub const RECIPES: &str = "/recipes";
    /// Health check
    pub const HEALTH: &str = "/health";
}

/// Service names used in structured logs
pub mod service_names {
    /// Client and CLI
    pub const WECHEF_CLIENT: &str = "wechef";
    /// Reference backend
    pub const WECHEF_SERVER: &str = "wechef-server";
}
