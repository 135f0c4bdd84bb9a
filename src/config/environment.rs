// ABOUTME: Environment configuration for the client, the CLI, and the reference backend
// ABOUTME: Reads environment variables with typed defaults; malformed values fall back with a warning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! Environment-based configuration

use crate::constants::cache::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_QUERY_RETRY, DEFAULT_STALE_TIME_SECS,
};
use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Read `ENVIRONMENT`
    #[must_use]
    pub fn from_env() -> Self {
        env::var(env_config::ENVIRONMENT)
            .map(|value| Self::from_str_or_default(&value))
            .unwrap_or_default()
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location for the reference backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory SQLite (tests)
    Memory,
}

impl DatabaseUrl {
    /// Parse `sqlite:<path>`, `sqlite::memory:` or a bare file path
    ///
    /// The SQLAlchemy forms are understood too: `sqlite:///app.db` is
    /// relative to the working directory, `sqlite:////var/app.db` is
    /// absolute and a bare `sqlite://` is in memory.
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s
            .strip_prefix("sqlite:///")
            .or_else(|| s.strip_prefix("sqlite://"))
            .or_else(|| s.strip_prefix("sqlite:"))
            .unwrap_or(s);
        if s == "sqlite://" || path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Connection string understood by sqlx
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DEFAULT_DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Settings for the REST client and query cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST backend, without trailing slash
    pub api_url: String,
    /// How long a cached read stays fresh
    pub stale_time: Duration,
    /// Automatic retries for a failed read
    pub query_retry: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Query cache capacity
    pub cache_max_entries: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            stale_time: Duration::from_secs(DEFAULT_STALE_TIME_SECS),
            query_retry: DEFAULT_QUERY_RETRY,
            request_timeout: Duration::from_secs(defaults::DEFAULT_REQUEST_TIMEOUT_SECS),
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl ClientConfig {
    /// Load from `WECHEF_API_URL` (or `VITE_API_URL`) and the cache variables
    #[must_use]
    pub fn from_env() -> Self {
        let api_url = env::var(env_config::API_URL)
            .or_else(|_| env::var(env_config::LEGACY_API_URL))
            .ok()
            .and_then(|raw| match parse_api_url(&raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(value = %raw, error = %e, "Ignoring invalid API base URL");
                    None
                }
            })
            .unwrap_or_else(default_api_url);

        Self {
            api_url,
            stale_time: Duration::from_secs(env_parse_or(
                env_config::STALE_TIME_SECS,
                DEFAULT_STALE_TIME_SECS,
            )),
            query_retry: env_parse_or(env_config::QUERY_RETRY, DEFAULT_QUERY_RETRY),
            request_timeout: Duration::from_secs(env_parse_or(
                env_config::REQUEST_TIMEOUT_SECS,
                defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            cache_max_entries: env_parse_or(
                env_config::CACHE_MAX_ENTRIES,
                DEFAULT_CACHE_MAX_ENTRIES,
            ),
        }
    }

    /// Replace the base URL
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when `raw` is not an absolute http(s) URL
    pub fn with_api_url(mut self, raw: &str) -> AppResult<Self> {
        self.api_url = parse_api_url(raw)?;
        Ok(self)
    }
}

/// Settings for the reference backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Database location
    pub database_url: DatabaseUrl,
    /// Origin allowed by CORS
    pub frontend_url: String,
    /// Bind host
    pub http_host: String,
    /// Bind port
    pub http_port: u16,
    /// Request body limit in bytes
    pub max_content_length: usize,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DatabaseUrl::default(),
            frontend_url: defaults::DEFAULT_FRONTEND_URL.to_owned(),
            http_host: defaults::DEFAULT_HTTP_HOST.to_owned(),
            http_port: defaults::DEFAULT_HTTP_PORT,
            max_content_length: defaults::DEFAULT_MAX_CONTENT_LENGTH,
            environment: Environment::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `DATABASE_URL`, `FRONTEND_URL`, `HTTP_HOST`, `HTTP_PORT`, `MAX_CONTENT_LENGTH`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: DatabaseUrl::parse_url(&env_var_or(
                env_config::DATABASE_URL,
                defaults::DEFAULT_DATABASE_URL,
            )),
            frontend_url: env_var_or(env_config::FRONTEND_URL, defaults::DEFAULT_FRONTEND_URL),
            http_host: env_var_or(env_config::HTTP_HOST, defaults::DEFAULT_HTTP_HOST),
            http_port: env_parse_or(env_config::HTTP_PORT, defaults::DEFAULT_HTTP_PORT),
            max_content_length: env_parse_or(
                env_config::MAX_CONTENT_LENGTH,
                defaults::DEFAULT_MAX_CONTENT_LENGTH,
            ),
            environment: Environment::from_env(),
        }
    }

    /// `host:port` to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// Validate a REST base URL and strip its trailing slash
///
/// # Errors
///
/// Returns `ConfigInvalid` when the URL is malformed or not http(s)
pub fn parse_api_url(raw: &str) -> AppResult<String> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        AppError::new(
            ErrorCode::ConfigInvalid,
            format!("Invalid API URL '{raw}': {e}"),
        )
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_owned()),
        other => Err(AppError::new(
            ErrorCode::ConfigInvalid,
            format!("Unsupported API URL scheme '{other}'"),
        )),
    }
}

fn default_api_url() -> String {
    defaults::DEFAULT_API_URL.to_owned()
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, warning and falling back on malformed input
fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e: T::Err| {
            warn!(variable = key, value = %raw, error = %e, fallback = %default, "Invalid configuration value");
            default
        }),
        Err(_) => default,
    }
}
