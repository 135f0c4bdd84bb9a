// ABOUTME: Configuration management module for client and backend settings
// ABOUTME: Environment variables only; command-line flags override on top
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! Configuration module for WeChef
//!
//! - **Environment**: client, cache, and reference backend settings read from
//!   environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{ClientConfig, DatabaseUrl, Environment, ServerConfig};
