// ABOUTME: Reference REST backend binary for the WeChef client
// ABOUTME: Serves /recipes and /health from SQLite until ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! # WeChef Server Binary
//!
//! Loads `ServerConfig` from the environment, applies command-line overrides,
//! and runs the recipe backend.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use wechef::config::{DatabaseUrl, ServerConfig};
use wechef::constants::service_names;
use wechef::logging::LoggingConfig;
use wechef::server;

/// Command-line overrides for `ServerConfig`
#[derive(Parser)]
#[command(name = "wechef-server")]
#[command(about = "WeChef reference backend - recipe storage over REST")]
pub struct Args {
    /// Override HTTP host
    #[arg(long)]
    http_host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:path` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,

    /// Override the origin allowed by CORS
    #[arg(long)]
    frontend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    LoggingConfig::from_env()
        .with_service_name(service_names::WECHEF_SERVER)
        .init()?;

    let mut config = ServerConfig::from_env();
    if let Some(http_host) = args.http_host {
        config.http_host = http_host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(database_url);
    }
    if let Some(frontend_url) = args.frontend_url {
        config.frontend_url = frontend_url;
    }

    info!(
        address = %config.bind_address(),
        database = %config.database_url,
        "Starting WeChef backend"
    );

    if let Err(e) = server::serve(config).await {
        error!(error = %e, "Backend failed");
        return Err(e.into());
    }
    Ok(())
}
