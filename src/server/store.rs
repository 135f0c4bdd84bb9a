// ABOUTME: SQLite storage for the reference backend: recipes and their ingredient lines
// ABOUTME: Creates the schema on connect; updates replace the whole ingredient list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use crate::config::DatabaseUrl;
use crate::constants::defaults::MAX_INGREDIENT_NAME_LEN;
use crate::errors::{AppError, AppResult};
use crate::models::{timestamp, Ingredient, Recipe, RecipeId, RecipeListItem};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, Transaction};
use std::str::FromStr;
use tracing::info;

/// Ingredient line as accepted by `POST`/`PUT /recipes`
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientInput {
    /// Required; trimmed and cut to 255 characters
    pub name: String,
    /// Optional grouping
    #[serde(default)]
    pub category: Option<String>,
    /// Optional unit label
    #[serde(default)]
    pub unit: Option<String>,
    /// Defaults to 0
    #[serde(default)]
    pub quantity: f64,
    /// Defaults to 0
    #[serde(default)]
    pub unit_cost: f64,
}

/// Body of `POST`/`PUT /recipes`
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeInput {
    /// Recipe name
    pub name: String,
    /// Defaults to 1
    #[serde(default = "default_servings")]
    pub servings: i64,
    /// Defaults to no ingredients
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
}

const fn default_servings() -> i64 {
    1
}

impl RecipeInput {
    /// Parse a request body; an empty body or `null` reads as `{}`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with the parser's or the name check's message
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        let value: serde_json::Value = if body.iter().all(u8::is_ascii_whitespace) {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(body).map_err(|e| AppError::invalid_input(e.to_string()))?
        };
        let value = if value.is_null() {
            serde_json::json!({})
        } else {
            value
        };
        let mut input: Self =
            serde_json::from_value(value).map_err(|e| AppError::invalid_input(e.to_string()))?;
        for ingredient in &mut input.ingredients {
            ingredient.name = clean_ingredient_name(&ingredient.name)?;
        }
        Ok(input)
    }
}

/// Trim, require non-empty, cut to the column width
///
/// # Errors
///
/// Returns `InvalidInput` when nothing is left after trimming
pub fn clean_ingredient_name(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("Name cannot be empty"));
    }
    Ok(trimmed.chars().take(MAX_INGREDIENT_NAME_LEN).collect())
}

/// Recipe storage
#[derive(Debug, Clone)]
pub struct RecipeStore {
    pool: SqlitePool,
}

impl RecipeStore {
    /// Open the database and create tables that are missing
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every in-memory connection is its own database; keep exactly one alive.
        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;
        info!(database = %url, "Recipe store ready");
        Ok(store)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                servings INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                name VARCHAR(255) NOT NULL,
                category VARCHAR(100),
                unit VARCHAR(50),
                quantity REAL NOT NULL DEFAULT 0,
                unit_cost REAL NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_ingredients_recipe_id ON ingredients(recipe_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All recipes, most recently updated first
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on query failure
    pub async fn list(&self) -> AppResult<Vec<RecipeListItem>> {
        let rows = sqlx::query(
            "SELECT id, name, updated_at FROM recipes ORDER BY updated_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| -> AppResult<RecipeListItem> {
                Ok(RecipeListItem {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    updated_at: parse_timestamp(row, "updated_at")?,
                })
            })
            .collect()
    }

    /// One recipe with its ingredients
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get(&self, id: RecipeId) -> AppResult<Recipe> {
        let row = sqlx::query(
            "SELECT id, name, servings, created_at, updated_at FROM recipes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe"))?;

        let ingredient_rows = sqlx::query(
            r"
            SELECT id, name, category, unit, quantity, unit_cost
            FROM ingredients WHERE recipe_id = $1 ORDER BY id
            ",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let ingredients = ingredient_rows
            .iter()
            .map(|row| -> AppResult<Ingredient> {
                Ok(Ingredient {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    category: row.try_get("category")?,
                    unit: row.try_get("unit")?,
                    quantity: row.try_get("quantity")?,
                    unit_cost: row.try_get("unit_cost")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Recipe {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            servings: row.try_get("servings")?,
            ingredients,
            created_at: parse_timestamp(&row, "created_at")?,
            updated_at: parse_timestamp(&row, "updated_at")?,
        })
    }

    /// Insert a recipe and its ingredients
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` on failure; nothing is written in that case
    pub async fn create(&self, input: &RecipeInput) -> AppResult<Recipe> {
        let now = now_string();
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            "INSERT INTO recipes (name, servings, created_at, updated_at) VALUES ($1, $2, $3, $3)",
        )
        .bind(&input.name)
        .bind(input.servings)
        .bind(&now)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        insert_ingredients(&mut tx, id, input).await?;
        tx.commit().await?;

        info!(recipe.id = id, "Recipe stored");
        self.get(id).await
    }

    /// Replace name, servings, and ingredients; bumps `updated_at`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, `DatabaseError` on failure
    pub async fn update(&self, id: RecipeId, input: &RecipeInput) -> AppResult<Recipe> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE recipes SET name = $1, servings = $2, updated_at = $3 WHERE id = $4",
        )
        .bind(&input.name)
        .bind(input.servings)
        .bind(now_string())
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if updated == 0 {
            return Err(AppError::not_found("Recipe"));
        }

        sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_ingredients(&mut tx, id, input).await?;
        tx.commit().await?;

        info!(recipe.id = id, "Recipe replaced");
        self.get(id).await
    }

    /// Cheap connectivity check
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

async fn insert_ingredients(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: RecipeId,
    input: &RecipeInput,
) -> AppResult<()> {
    for ingredient in &input.ingredients {
        sqlx::query(
            r"
            INSERT INTO ingredients (recipe_id, name, category, unit, quantity, unit_cost)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(recipe_id)
        .bind(&ingredient.name)
        .bind(&ingredient.category)
        .bind(&ingredient.unit)
        .bind(ingredient.quantity)
        .bind(ingredient.unit_cost)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Fixed-width UTC timestamps sort correctly as text
fn now_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> AppResult<DateTime<Utc>> {
    let raw: String = row.try_get(column)?;
    timestamp::parse(&raw)
        .ok_or_else(|| AppError::database(format!("Invalid timestamp in {column}: {raw}")))
}
