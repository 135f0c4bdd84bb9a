// ABOUTME: Tests for environment-driven client and server configuration
// ABOUTME: Mutates process environment, so every test runs serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use std::time::Duration;
use wechef::config::{ClientConfig, DatabaseUrl, Environment, ServerConfig};

const CLIENT_VARS: [&str; 6] = [
    "WECHEF_API_URL",
    "VITE_API_URL",
    "WECHEF_STALE_TIME_SECS",
    "WECHEF_QUERY_RETRY",
    "WECHEF_REQUEST_TIMEOUT_SECS",
    "CACHE_MAX_ENTRIES",
];

const SERVER_VARS: [&str; 6] = [
    "DATABASE_URL",
    "FRONTEND_URL",
    "HTTP_HOST",
    "HTTP_PORT",
    "MAX_CONTENT_LENGTH",
    "ENVIRONMENT",
];

fn clear(vars: &[&str]) {
    for var in vars {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_client_defaults() {
    clear(&CLIENT_VARS);
    let config = ClientConfig::from_env();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.api_url, "http://127.0.0.1:5000");
    assert_eq!(config.stale_time, Duration::from_secs(30));
    assert_eq!(config.query_retry, 1);
}

#[test]
#[serial]
fn test_client_reads_environment() {
    clear(&CLIENT_VARS);
    env::set_var("VITE_API_URL", "http://legacy.example:8000");
    assert_eq!(ClientConfig::from_env().api_url, "http://legacy.example:8000");

    env::set_var("WECHEF_API_URL", "https://api.example.com/");
    env::set_var("WECHEF_STALE_TIME_SECS", "5");
    env::set_var("WECHEF_QUERY_RETRY", "3");
    let config = ClientConfig::from_env();
    assert_eq!(config.api_url, "https://api.example.com");
    assert_eq!(config.stale_time, Duration::from_secs(5));
    assert_eq!(config.query_retry, 3);
    clear(&CLIENT_VARS);
}

#[test]
#[serial]
fn test_client_invalid_values_fall_back() {
    clear(&CLIENT_VARS);
    env::set_var("WECHEF_API_URL", "ftp://files.example");
    env::set_var("WECHEF_QUERY_RETRY", "lots");
    let config = ClientConfig::from_env();
    assert_eq!(config.api_url, ClientConfig::default().api_url);
    assert_eq!(config.query_retry, 1);
    clear(&CLIENT_VARS);
}

#[test]
#[serial]
fn test_server_reads_environment() {
    clear(&SERVER_VARS);
    assert_eq!(ServerConfig::from_env(), ServerConfig::default());

    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("FRONTEND_URL", "https://app.example.com");
    env::set_var("HTTP_PORT", "8081");
    env::set_var("ENVIRONMENT", "production");
    let config = ServerConfig::from_env();
    assert_eq!(config.database_url, DatabaseUrl::Memory);
    assert_eq!(config.frontend_url, "https://app.example.com");
    assert_eq!(config.bind_address(), "127.0.0.1:8081");
    assert_eq!(config.environment, Environment::Production);
    clear(&SERVER_VARS);
}

#[test]
#[serial]
fn test_server_invalid_port_falls_back() {
    clear(&SERVER_VARS);
    env::set_var("HTTP_PORT", "99999");
    assert_eq!(ServerConfig::from_env().http_port, 5000);
    clear(&SERVER_VARS);
}
