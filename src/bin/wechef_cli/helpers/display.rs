// ABOUTME: Output formatting helpers for the wechef CLI
// ABOUTME: Recipe tables, cost summaries, notifications, and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use wechef::constants::messages;
use wechef::models::{Recipe, RecipeListItem};
use wechef::notifications::{Notification, NotificationKind};
use wechef::summary::CostSummary;
use wechef::validation::ValidationErrors;

/// One row per recipe, newest first
pub fn recipe_list(rows: &[RecipeListItem]) {
    println!("{:>6}  {:<40}  Updated", "ID", "Name");
    println!("{}", "=".repeat(72));
    for row in rows {
        println!(
            "{:>6}  {:<40}  {}",
            row.id,
            row.name,
            row.updated_at.format("%Y-%m-%d %H:%M UTC")
        );
    }
}

/// Nothing saved yet
pub fn empty_list() {
    println!("{}", messages::RECIPES_EMPTY);
    println!("Create your first recipe with: wechef create --file <recipe.json>");
}

/// Recipe header followed by its costs
pub fn recipe(recipe: &Recipe, summary: &CostSummary) {
    println!("\n{} (#{})", recipe.name, recipe.id);
    println!("{}", "=".repeat(50));
    println!(
        "   Updated: {}",
        recipe.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let names: Vec<&str> = recipe
        .ingredients
        .iter()
        .map(|ingredient| ingredient.name.as_str())
        .collect();
    cost_summary(&names, summary);
}

/// Line costs, total, and per-serving cost
pub fn cost_summary(names: &[&str], summary: &CostSummary) {
    println!("\nIngredients:");
    for (index, name) in names.iter().copied().enumerate() {
        let cost = summary.line_display(index).unwrap_or_default();
        let name = if name.trim().is_empty() { "(unnamed)" } else { name };
        println!("   {name:<30} {cost:>12}");
    }
    println!("\nTotal cost:       {}", summary.total_display());
    println!("Servings:         {}", summary.servings_display());
    println!("Cost per serving: {}", summary.per_serving_display());
}

/// A notification raised by a save
pub fn notification(notification: &Notification) {
    let marker = match notification.kind {
        NotificationKind::Success => "Success",
        NotificationKind::Error => "Error",
    };
    match &notification.description {
        Some(description) => eprintln!("{marker} {}: {description}", notification.title),
        None => eprintln!("{marker} {}", notification.title),
    }
}

/// Every failing field with its message
pub fn validation_errors(errors: &ValidationErrors) {
    eprintln!("Recipe has {} problem(s):", errors.len());
    for (path, message) in errors.iter() {
        eprintln!("   {path}: {message}");
    }
    if errors.has_ingredient_field_errors() {
        eprintln!("{}", messages::REVIEW_INGREDIENT_ERRORS);
    }
}
