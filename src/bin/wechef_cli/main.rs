// ABOUTME: WeChef CLI - command-line front end for the recipe costing client
// ABOUTME: Lists, shows, creates, updates, and costs recipes against the REST backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors
//!
//! Usage:
//! ```bash
//! # List recipes, most recently updated first
//! wechef list
//!
//! # Show one recipe with its costs
//! wechef show 3
//!
//! # Create or replace a recipe from a JSON file
//! wechef create --file pasta.json
//! wechef update 3 --file pasta.json
//!
//! # Cost a recipe file without saving it
//! wechef cost --file pasta.json
//! ```

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wechef::api::ApiClient;
use wechef::config::ClientConfig;
use wechef::logging::{LogFormat, LoggingConfig};
use wechef::models::RecipeId;
use wechef::recipes::RecipeQueries;

#[derive(Parser)]
#[command(
    name = "wechef",
    about = "WeChef recipe costing CLI",
    long_about = "Command-line front end for listing, costing, and saving recipes through the WeChef REST backend."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL override
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List saved recipes
    List,

    /// Show a recipe with its cost summary
    Show {
        /// Recipe id
        id: RecipeId,
    },

    /// Validate a recipe file and create it
    Create {
        /// JSON file with name, servings, and ingredients
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Validate a recipe file and replace an existing recipe with it
    Update {
        /// Recipe id
        id: RecipeId,

        /// JSON file with name, servings, and ingredients
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Print line, total, and per-serving costs
    Cost {
        /// Recipe file to cost
        #[arg(long, short = 'f', conflicts_with = "id", required_unless_present = "id")]
        file: Option<PathBuf>,

        /// Saved recipe to cost
        #[arg(long)]
        id: Option<RecipeId>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    logging.format = LogFormat::Compact;
    logging.to_stderr = true;
    logging.level = if cli.verbose { "debug" } else { "warn" }.to_owned();
    logging.init()?;

    if let Command::Cost {
        file: Some(path), ..
    } = &cli.command
    {
        return commands::recipes::cost_file(path);
    }

    let mut config = ClientConfig::from_env();
    if let Some(raw) = cli.api_url.as_deref() {
        config = config
            .with_api_url(raw)
            .with_context(|| format!("Invalid --api-url {raw}"))?;
    }
    let queries = RecipeQueries::from_config(ApiClient::new(&config)?, &config);

    match cli.command {
        Command::List => commands::recipes::list(&queries).await,
        Command::Show { id } | Command::Cost { id: Some(id), .. } => {
            commands::recipes::show(&queries, id).await
        }
        Command::Create { file } => commands::recipes::save(&queries, None, &file).await,
        Command::Update { id, file } => commands::recipes::save(&queries, Some(id), &file).await,
        Command::Cost { .. } => Ok(()),
    }
}
