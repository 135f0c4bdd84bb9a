// ABOUTME: User-facing messages for validation errors, pages, and notifications
// ABOUTME: Kept in one place so the CLI, pages, and tests agree on wording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

/// Recipe name blank after trimming
pub const RECIPE_NAME_REQUIRED: &str = "Recipe name is required";
/// Servings not a number
pub const SERVINGS_NOT_A_NUMBER: &str = "Servings must be a number";
/// Servings has a fractional part
pub const SERVINGS_NOT_WHOLE: &str = "Servings must be a whole number";
/// Servings below one
pub const SERVINGS_TOO_SMALL: &str = "Servings must be at least 1";
/// Servings above `defaults::MAX_SERVINGS`
pub const SERVINGS_TOO_LARGE: &str = "Servings must be at most 10000";
/// `ingredients` present but not a list
pub const INGREDIENTS_NOT_A_LIST: &str = "Ingredients must be a list";
/// An ingredient entry that is not an object
pub const INGREDIENT_NOT_AN_OBJECT: &str = "Ingredient must be an object";
/// No ingredient rows left after blank rows are dropped
pub const INGREDIENTS_REQUIRED: &str = "Add at least one ingredient";
/// Ingredient name blank after trimming
pub const INGREDIENT_NAME_REQUIRED: &str = "Ingredient name is required";
/// Negative quantity
pub const QUANTITY_NEGATIVE: &str = "Quantity must be greater than or equal to 0";
/// Negative unit cost
pub const UNIT_COST_NEGATIVE: &str = "Unit cost must be greater than or equal to 0";
/// Summary shown under the ingredient rows when any row has an error
pub const REVIEW_INGREDIENT_ERRORS: &str = "Please review ingredient errors above.";

/// List page failed to load
pub const RECIPES_LOAD_FAILED: &str = "Could not load recipes.";
/// List page has no rows
pub const RECIPES_EMPTY: &str = "No recipes yet.";
/// Calculator page failed to load its recipe
pub const RECIPE_LOAD_FAILED: &str = "Could not load the recipe. It may have been removed.";
/// Fallback screen after an unexpected error
pub const UNEXPECTED_ERROR: &str = "Something unexpected happened. Reload to start over.";

/// Notification after a successful create
pub const RECIPE_CREATED: &str = "Recipe created";
/// Notification after a successful update
pub const RECIPE_UPDATED: &str = "Recipe updated";
/// Notification title after a failed save
pub const SAVE_FAILED: &str = "Something went wrong";
/// Notification description when the error carries no message
pub const SAVE_FAILED_DESCRIPTION: &str = "Unable to save recipe";
