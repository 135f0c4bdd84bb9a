// ABOUTME: Recipe commands for the wechef CLI
// ABOUTME: Reads recipe files leniently and saves them through the calculator page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;
use wechef::api::RecipeApi;
use wechef::models::RecipeId;
use wechef::notifications::Notifications;
use wechef::pages::{CalculatorPage, CalculatorView, RecipesPage, RecipesView, SubmitOutcome};
use wechef::recipes::RecipeQueries;
use wechef::summary::CostSummary;
use wechef::validation::{check_json_shape, RecipeFormValues};

use crate::helpers::display;

/// Print the recipe list
pub async fn list<A: RecipeApi>(queries: &RecipeQueries<A>) -> Result<()> {
    match RecipesPage::load(queries).await {
        RecipesView::Loaded(rows) => display::recipe_list(&rows),
        RecipesView::Empty => display::empty_list(),
        RecipesView::Failed { message } => bail!(message),
    }
    Ok(())
}

/// Print one recipe with its costs
pub async fn show<A: RecipeApi>(queries: &RecipeQueries<A>, id: RecipeId) -> Result<()> {
    let recipe = queries
        .recipe(Some(id))
        .await?
        .with_context(|| format!("Recipe {id} not found"))?;
    display::recipe(&recipe, &CostSummary::from_recipe(&recipe));
    Ok(())
}

/// Validate a recipe file and create (`id` absent) or replace the recipe
pub async fn save<A: RecipeApi>(
    queries: &RecipeQueries<A>,
    id: Option<RecipeId>,
    path: &Path,
) -> Result<()> {
    let values = read_form_values(path)?;

    let mut page = match id {
        None => CalculatorPage::creating(),
        Some(id) => match CalculatorPage::open(queries, Some(id)).await {
            CalculatorView::Form(page) => page,
            CalculatorView::LoadFailed { message, .. } => bail!(message),
        },
    };
    page.form_mut().reset(values);
    info!(title = page.title(), file = %path.display(), "Submitting recipe");

    let mut notifications = Notifications::default();
    let outcome = page.submit(queries, &mut notifications).await;
    for notification in notifications.drain() {
        display::notification(&notification);
    }

    match outcome {
        SubmitOutcome::Saved { recipe, .. } => {
            display::recipe(&recipe, &CostSummary::from_recipe(&recipe));
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            display::validation_errors(&errors);
            bail!("{} is not a valid recipe", path.display())
        }
        SubmitOutcome::Busy => bail!("Another save is still running"),
        SubmitOutcome::Failed(e) => Err(e.into()),
    }
}

/// Print costs of a recipe file without validating or saving it
pub fn cost_file(path: &Path) -> Result<()> {
    let values = read_form_values(path)?;
    let summary = CostSummary::from_values(&values);
    let names: Vec<&str> = values
        .ingredients
        .iter()
        .map(|row| row.name.as_str())
        .collect();
    display::cost_summary(&names, &summary);
    Ok(())
}

fn read_form_values(path: &Path) -> Result<RecipeFormValues> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    if !value.is_object() {
        bail!("{} does not contain a JSON object", path.display());
    }
    let shape = check_json_shape(&value);
    if !shape.is_empty() {
        display::validation_errors(&shape);
        bail!("{} is not a valid recipe", path.display());
    }
    RecipeFormValues::deserialize(&value)
        .with_context(|| format!("{} is not a recipe", path.display()))
}
