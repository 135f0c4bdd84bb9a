// ABOUTME: Recipe form state container with ingredient row editing and submit gating
// ABOUTME: Validates a field on blur, the whole form on submit, and every change after a failed submit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! # Recipe form
//!
//! [`RecipeForm`] holds what the user has typed. Setters take raw text the
//! way an input field delivers it; numeric inputs that are blank or not a
//! number are stored as `NaN`. The list always has at least one row.
//!
//! ```rust
//! use wechef::form::RecipeForm;
//! use wechef::validation::IngredientField;
//!
//! let mut form = RecipeForm::new();
//! form.set_name("Toast");
//! form.set_ingredient(0, IngredientField::Name, "Bread").unwrap();
//! form.set_ingredient(0, IngredientField::Quantity, "2").unwrap();
//! form.set_ingredient(0, IngredientField::UnitCost, "0.40").unwrap();
//! assert_eq!(form.summary().total_display(), "$0.80");
//! assert!(form.submit(false).is_ok());
//! ```

use crate::errors::{AppError, AppResult};
use crate::models::RecipePayload;
use crate::summary::{line_cost, CostSummary};
use crate::validation::{
    default_recipe_values, validate_recipe, FieldPath, IngredientField, IngredientFormValues,
    RecipeFormValues, ValidationErrors,
};
use thiserror::Error;

/// Why a submit did not produce a payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    /// The form has validation errors
    #[error("recipe is invalid: {0}")]
    Invalid(ValidationErrors),
    /// A previous save has not finished
    #[error("a save is already in progress")]
    Saving,
}

/// Read a number input; blank or unparsable text is `NaN`
#[must_use]
pub fn parse_number_input(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Editable recipe form
#[derive(Debug, Clone)]
pub struct RecipeForm {
    values: RecipeFormValues,
    errors: ValidationErrors,
    submitted: bool,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeForm {
    /// Blank form for a new recipe
    #[must_use]
    pub fn new() -> Self {
        Self::with_values(default_recipe_values())
    }

    /// Form pre-filled with `values`
    #[must_use]
    pub fn with_values(values: RecipeFormValues) -> Self {
        let mut form = Self {
            values,
            errors: ValidationErrors::default(),
            submitted: false,
        };
        form.ensure_row();
        form
    }

    /// Replace everything and forget errors
    pub fn reset(&mut self, values: RecipeFormValues) {
        self.values = values;
        self.errors.clear();
        self.submitted = false;
        self.ensure_row();
    }

    /// Current values
    #[must_use]
    pub const fn values(&self) -> &RecipeFormValues {
        &self.values
    }

    /// Current errors
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Message shown under a field
    #[must_use]
    pub fn error(&self, path: FieldPath) -> Option<&str> {
        self.errors.get(path)
    }

    /// Number of ingredient rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.values.ingredients.len()
    }

    /// Add an empty ingredient row at the end
    pub fn append_ingredient(&mut self) {
        self.values.ingredients.push(IngredientFormValues::empty());
        self.after_change();
    }

    /// Remove a row; an empty row takes its place if it was the last one
    ///
    /// Returns `false` when `index` is out of range.
    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        if index >= self.values.ingredients.len() {
            return false;
        }
        self.values.ingredients.remove(index);
        self.errors.remove_row(index);
        self.ensure_row();
        self.after_change();
        true
    }

    /// Whether the remove action is offered
    #[must_use]
    pub fn can_remove(&self) -> bool {
        self.values.ingredients.len() > 1
    }

    /// Recipe name input
    pub fn set_name(&mut self, text: &str) {
        text.clone_into(&mut self.values.name);
        self.after_change();
    }

    /// Servings input
    pub fn set_servings(&mut self, text: &str) {
        self.values.servings = parse_number_input(text);
        self.after_change();
    }

    /// One field of one ingredient row
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `row` does not exist
    pub fn set_ingredient(&mut self, row: usize, field: IngredientField, text: &str) -> AppResult<()> {
        let ingredient = self
            .values
            .ingredients
            .get_mut(row)
            .ok_or_else(|| AppError::invalid_input(format!("No ingredient row {row}")))?;
        match field {
            IngredientField::Name => text.clone_into(&mut ingredient.name),
            IngredientField::Category => text.clone_into(&mut ingredient.category),
            IngredientField::Unit => text.clone_into(&mut ingredient.unit),
            IngredientField::Quantity => ingredient.quantity = parse_number_input(text),
            IngredientField::UnitCost => ingredient.unit_cost = parse_number_input(text),
        }
        self.after_change();
        Ok(())
    }

    /// A field lost focus: refresh its message
    ///
    /// Leaving an ingredient field also refreshes the list-level message.
    pub fn blur(&mut self, path: FieldPath) {
        let fresh = match validate_recipe(&self.values) {
            Ok(_) => ValidationErrors::default(),
            Err(errors) => errors,
        };
        self.errors.refresh_path(path, &fresh);
        if path.row().is_some() {
            self.errors.refresh_path(FieldPath::Ingredients, &fresh);
        }
    }

    /// Validate everything and hand back the payload to save
    ///
    /// # Errors
    ///
    /// [`SubmitBlocked::Saving`] while `saving` is set, otherwise
    /// [`SubmitBlocked::Invalid`] with every failing field
    pub fn submit(&mut self, saving: bool) -> Result<RecipePayload, SubmitBlocked> {
        if saving {
            return Err(SubmitBlocked::Saving);
        }
        self.submitted = true;
        match validate_recipe(&self.values) {
            Ok(payload) => {
                self.errors.clear();
                Ok(payload)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(SubmitBlocked::Invalid(errors))
            }
        }
    }

    /// Costs for what is currently typed
    #[must_use]
    pub fn summary(&self) -> CostSummary {
        CostSummary::from_values(&self.values)
    }

    /// Cost of one row; `0` for a row that does not exist
    #[must_use]
    pub fn line_cost(&self, index: usize) -> f64 {
        self.values
            .ingredients
            .get(index)
            .map_or(0.0, |row| line_cost(row.quantity, row.unit_cost))
    }

    /// List-level message such as "Add at least one ingredient"
    #[must_use]
    pub fn root_ingredient_error(&self) -> Option<&str> {
        self.errors.ingredients_root()
    }

    /// Whether any row shows a field error
    #[must_use]
    pub fn has_ingredient_field_errors(&self) -> bool {
        self.errors.has_ingredient_field_errors()
    }

    fn ensure_row(&mut self) {
        if self.values.ingredients.is_empty() {
            self.values.ingredients.push(IngredientFormValues::empty());
        }
    }

    /// After a failed submit, every change revalidates the whole form
    fn after_change(&mut self) {
        if !self.submitted {
            return;
        }
        self.errors = match validate_recipe(&self.values) {
            Ok(_) => ValidationErrors::default(),
            Err(errors) => errors,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::messages;

    #[test]
    fn test_parse_number_input() {
        assert!(parse_number_input("").is_nan());
        assert!(parse_number_input("abc").is_nan());
        assert!((parse_number_input(" 2.5 ") - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_removing_last_row_leaves_an_empty_one() {
        let mut form = RecipeForm::new();
        assert!(!form.can_remove());
        assert!(form.remove_ingredient(0));
        assert_eq!(form.row_count(), 1);
        assert!(!form.remove_ingredient(5));

        form.append_ingredient();
        assert!(form.can_remove());
        assert_eq!(form.row_count(), 2);
    }

    #[test]
    fn test_reset_with_no_rows_adds_one() {
        let mut form = RecipeForm::new();
        form.reset(RecipeFormValues {
            name: "Stock".to_owned(),
            servings: 2.0,
            ingredients: Vec::new(),
        });
        assert_eq!(form.row_count(), 1);
        assert_eq!(form.values().name, "Stock");
    }

    #[test]
    fn test_blur_only_touches_its_field() {
        let mut form = RecipeForm::new();
        form.set_servings("0");
        form.blur(FieldPath::Name);
        assert_eq!(form.error(FieldPath::Name), Some(messages::RECIPE_NAME_REQUIRED));
        assert_eq!(form.error(FieldPath::Servings), None);

        form.set_name("Soup");
        form.blur(FieldPath::Name);
        assert_eq!(form.error(FieldPath::Name), None);
    }

    #[test]
    fn test_submit_gating() {
        let mut form = RecipeForm::new();
        form.set_name("Soup");
        assert_eq!(form.submit(true), Err(SubmitBlocked::Saving));

        let Err(SubmitBlocked::Invalid(errors)) = form.submit(false) else {
            panic!("empty ingredient list must block submit");
        };
        assert_eq!(errors.ingredients_root(), Some(messages::INGREDIENTS_REQUIRED));
        assert_eq!(form.root_ingredient_error(), Some(messages::INGREDIENTS_REQUIRED));

        form.set_ingredient(0, IngredientField::Name, "Water").unwrap();
        assert_eq!(form.root_ingredient_error(), None);
        assert!(form.submit(false).is_ok());
    }

    #[test]
    fn test_row_errors_follow_removal() {
        let mut form = RecipeForm::new();
        form.set_name("Salad");
        form.append_ingredient();
        form.set_ingredient(0, IngredientField::Name, "Lettuce").unwrap();
        form.set_ingredient(1, IngredientField::Quantity, "-1").unwrap();
        form.set_ingredient(1, IngredientField::Name, "Tomato").unwrap();
        assert!(form.submit(false).is_err());
        assert!(form.has_ingredient_field_errors());
        assert!(form
            .error(FieldPath::ingredient(1, IngredientField::Quantity))
            .is_some());

        form.remove_ingredient(0);
        assert!(form
            .error(FieldPath::ingredient(0, IngredientField::Quantity))
            .is_some());

        form.set_ingredient(0, IngredientField::Quantity, "1").unwrap();
        assert!(!form.has_ingredient_field_errors());
    }

    #[test]
    fn test_line_cost_of_missing_row_is_zero() {
        let mut form = RecipeForm::new();
        form.set_ingredient(0, IngredientField::Quantity, "3").unwrap();
        form.set_ingredient(0, IngredientField::UnitCost, "1.5").unwrap();
        assert!((form.line_cost(0) - 4.5).abs() < 1e-9);
        assert!(form.line_cost(9).abs() < f64::EPSILON);
    }
}
