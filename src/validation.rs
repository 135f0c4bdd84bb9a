// ABOUTME: Recipe form values and their validation into a normalized create/update payload
// ABOUTME: Drops blank ingredient rows, then checks names, servings, and non-negative amounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! # Recipe validation
//!
//! [`validate_recipe`] turns raw [`RecipeFormValues`] into a [`RecipePayload`]
//! or a [`ValidationErrors`] map keyed by [`FieldPath`].
//!
//! Ingredient rows go through two passes. Each row is first normalized
//! (strings trimmed, numbers coerced with non-finite values read as `0`); a
//! row with nothing left in it is dropped without an error. The remaining
//! rows are then checked. Error paths always use the row's position in the
//! form, so a message lands on the row the user is looking at even when blank
//! rows above it were dropped.

use crate::constants::defaults::MAX_SERVINGS;
use crate::constants::messages;
use crate::errors::{AppError, ErrorCode};
use crate::models::{IngredientPayload, Recipe, RecipePayload};
use crate::number::{to_num, ToNum};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One editable ingredient row
///
/// Numeric fields hold `NaN` when the input is blank or unparsable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientFormValues {
    /// Ingredient name as typed
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Category as typed
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    /// Unit as typed
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: String,
    /// Quantity
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: f64,
    /// Cost per unit
    #[serde(default, deserialize_with = "lenient_number")]
    pub unit_cost: f64,
}

impl IngredientFormValues {
    /// Empty row appended by "Add Ingredient"
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            unit: String::new(),
            quantity: 0.0,
            unit_cost: 0.0,
        }
    }
}

impl Default for IngredientFormValues {
    fn default() -> Self {
        Self::empty()
    }
}

/// Raw contents of the recipe form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeFormValues {
    /// Recipe name as typed
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Servings; `NaN` when blank
    #[serde(default = "missing_number", deserialize_with = "lenient_number")]
    pub servings: f64,
    /// Ingredient rows in display order
    #[serde(default, deserialize_with = "lenient_rows")]
    pub ingredients: Vec<IngredientFormValues>,
}

impl Default for RecipeFormValues {
    fn default() -> Self {
        default_recipe_values()
    }
}

impl From<&Recipe> for RecipeFormValues {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            servings: recipe.servings as f64,
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| IngredientFormValues {
                    name: ingredient.name.clone(),
                    category: ingredient.category.clone().unwrap_or_default(),
                    unit: ingredient.unit.clone().unwrap_or_default(),
                    quantity: ingredient.quantity,
                    unit_cost: ingredient.unit_cost,
                })
                .collect(),
        }
    }
}

/// Initial values of a new recipe: blank name, one serving, one empty row
#[must_use]
pub fn default_recipe_values() -> RecipeFormValues {
    RecipeFormValues {
        name: String::new(),
        servings: 1.0,
        ingredients: vec![IngredientFormValues::empty()],
    }
}

/// Field of an ingredient row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IngredientField {
    /// `name`
    Name,
    /// `category`
    Category,
    /// `unit`
    Unit,
    /// `quantity`
    Quantity,
    /// `unit_cost`
    UnitCost,
}

impl IngredientField {
    /// Key used in paths
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::Unit => "unit",
            Self::Quantity => "quantity",
            Self::UnitCost => "unit_cost",
        }
    }
}

impl FromStr for IngredientField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "unit" => Ok(Self::Unit),
            "quantity" => Ok(Self::Quantity),
            "unit_cost" => Ok(Self::UnitCost),
            other => Err(AppError::invalid_input(format!(
                "Unknown ingredient field '{other}'"
            ))),
        }
    }
}

/// Location of a form field, rendered as `name`, `servings`, `ingredients`
/// or `ingredients.{row}.{field}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    /// Recipe name
    Name,
    /// Servings
    Servings,
    /// The ingredient list as a whole
    Ingredients,
    /// One field of one row
    Ingredient {
        /// Row index in the form
        row: usize,
        /// Field within the row
        field: IngredientField,
    },
}

impl FieldPath {
    /// Shorthand for an ingredient field path
    #[must_use]
    pub const fn ingredient(row: usize, field: IngredientField) -> Self {
        Self::Ingredient { row, field }
    }

    /// Row index for ingredient field paths
    #[must_use]
    pub const fn row(&self) -> Option<usize> {
        match self {
            Self::Ingredient { row, .. } => Some(*row),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Servings => f.write_str("servings"),
            Self::Ingredients => f.write_str("ingredients"),
            Self::Ingredient { row, field } => write!(f, "ingredients.{row}.{}", field.as_str()),
        }
    }
}

impl FromStr for FieldPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => return Ok(Self::Name),
            "servings" => return Ok(Self::Servings),
            "ingredients" => return Ok(Self::Ingredients),
            _ => {}
        }
        let mut parts = s.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("ingredients"), Some(row), Some(field)) => {
                let row = row
                    .parse()
                    .map_err(|_| AppError::invalid_input(format!("Invalid row in path '{s}'")))?;
                Ok(Self::Ingredient {
                    row,
                    field: field.parse()?,
                })
            }
            _ => Err(AppError::invalid_input(format!("Unknown field path '{s}'"))),
        }
    }
}

/// Field-scoped validation messages; the first message per path wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", describe(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<FieldPath, String>,
}

impl ValidationErrors {
    /// Record a message unless the path already has one
    pub fn add(&mut self, path: FieldPath, message: impl Into<String>) {
        self.errors.entry(path).or_insert_with(|| message.into());
    }

    /// Message for a path
    #[must_use]
    pub fn get(&self, path: FieldPath) -> Option<&str> {
        self.errors.get(&path).map(String::as_str)
    }

    /// Whether no errors were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate in path order
    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> {
        self.errors.iter().map(|(path, message)| (*path, message.as_str()))
    }

    /// Aggregate message on the ingredient list, e.g. "Add at least one ingredient"
    #[must_use]
    pub fn ingredients_root(&self) -> Option<&str> {
        self.get(FieldPath::Ingredients)
    }

    /// Whether any individual ingredient field failed
    #[must_use]
    pub fn has_ingredient_field_errors(&self) -> bool {
        self.errors.keys().any(|path| path.row().is_some())
    }

    /// Forget a removed row and move the errors of later rows up by one
    pub fn remove_row(&mut self, removed: usize) {
        let errors = std::mem::take(&mut self.errors);
        self.errors = errors
            .into_iter()
            .filter_map(|(path, message)| match path {
                FieldPath::Ingredient { row, .. } if row == removed => None,
                FieldPath::Ingredient { row, field } if row > removed => {
                    Some((FieldPath::ingredient(row - 1, field), message))
                }
                other => Some((other, message)),
            })
            .collect();
    }

    /// Take over `other`'s messages for paths that have none yet
    pub fn merge(&mut self, other: Self) {
        for (path, message) in other.errors {
            self.add(path, message);
        }
    }

    /// Drop every message
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Copy `path`'s entry from `fresh`, leaving the others untouched
    pub fn refresh_path(&mut self, path: FieldPath, fresh: &Self) {
        match fresh.errors.get(&path) {
            Some(message) => {
                self.errors.insert(path, message.clone());
            }
            None => {
                self.errors.remove(&path);
            }
        }
    }
}

fn describe(errors: &BTreeMap<FieldPath, String>) -> String {
    errors
        .iter()
        .map(|(path, message)| format!("{path}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::new(ErrorCode::InvalidInput, errors.to_string())
    }
}

/// Validate form values into a payload
///
/// # Errors
///
/// Returns every failing field, keyed by its path in the form
pub fn validate_recipe(values: &RecipeFormValues) -> Result<RecipePayload, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = values.name.trim();
    if name.is_empty() {
        errors.add(FieldPath::Name, messages::RECIPE_NAME_REQUIRED);
    }

    let servings = check_servings(values.servings, &mut errors);

    let mut ingredients = Vec::with_capacity(values.ingredients.len());
    let mut kept_rows = 0_usize;
    for (row, raw) in values.ingredients.iter().enumerate() {
        let Some(normalized) = normalize_row(raw) else {
            continue;
        };
        kept_rows += 1;
        if let Some(ingredient) = check_row(row, normalized, &mut errors) {
            ingredients.push(ingredient);
        }
    }

    if kept_rows == 0 {
        errors.add(FieldPath::Ingredients, messages::INGREDIENTS_REQUIRED);
    }

    match servings {
        Some(servings) if errors.is_empty() => Ok(RecipePayload {
            name: name.to_owned(),
            servings,
            ingredients,
        }),
        _ => Err(errors),
    }
}

/// Validate an arbitrary JSON document as recipe form values
///
/// Anything that is not an object is read as an empty form. Shape errors
/// from [`check_json_shape`] come first and win over later messages on the
/// same path.
///
/// # Errors
///
/// Same as [`validate_recipe`], plus the shape errors
pub fn validate_json(value: &Value) -> Result<RecipePayload, ValidationErrors> {
    let values = RecipeFormValues::deserialize(value).unwrap_or_else(|_| RecipeFormValues {
        name: String::new(),
        servings: f64::NAN,
        ingredients: Vec::new(),
    });
    let mut errors = check_json_shape(value);
    match validate_recipe(&values) {
        Ok(payload) if errors.is_empty() => Ok(payload),
        Ok(_) => Err(errors),
        Err(found) => {
            errors.merge(found);
            Err(errors)
        }
    }
}

/// Structural errors that lenient reading of a JSON document would hide
///
/// An `ingredients` value that is present but not a list fails on
/// `ingredients`. A list entry that is not an object fails on that row's
/// `name`; only object rows can be blank rows.
#[must_use]
pub fn check_json_shape(value: &Value) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    match value.get("ingredients") {
        None => {}
        Some(Value::Array(rows)) => {
            for (row, entry) in rows.iter().enumerate() {
                if !entry.is_object() {
                    errors.add(
                        FieldPath::ingredient(row, IngredientField::Name),
                        messages::INGREDIENT_NOT_AN_OBJECT,
                    );
                }
            }
        }
        Some(_) => errors.add(FieldPath::Ingredients, messages::INGREDIENTS_NOT_A_LIST),
    }
    errors
}

fn check_servings(raw: f64, errors: &mut ValidationErrors) -> Option<i64> {
    if !raw.is_finite() {
        errors.add(FieldPath::Servings, messages::SERVINGS_NOT_A_NUMBER);
        return None;
    }
    if raw.fract() != 0.0 {
        errors.add(FieldPath::Servings, messages::SERVINGS_NOT_WHOLE);
        return None;
    }
    if raw < 1.0 {
        errors.add(FieldPath::Servings, messages::SERVINGS_TOO_SMALL);
        return None;
    }
    if raw > MAX_SERVINGS as f64 {
        errors.add(FieldPath::Servings, messages::SERVINGS_TOO_LARGE);
        return None;
    }
    Some(raw as i64)
}

/// Ingredient row after trimming and coercion
struct NormalizedRow<'a> {
    name: &'a str,
    category: &'a str,
    unit: &'a str,
    quantity: f64,
    unit_cost: f64,
}

fn normalize_row(raw: &IngredientFormValues) -> Option<NormalizedRow<'_>> {
    let row = NormalizedRow {
        name: raw.name.trim(),
        category: raw.category.trim(),
        unit: raw.unit.trim(),
        quantity: to_num(raw.quantity),
        unit_cost: to_num(raw.unit_cost),
    };
    let has_values = !row.name.is_empty()
        || !row.category.is_empty()
        || !row.unit.is_empty()
        || row.quantity != 0.0
        || row.unit_cost != 0.0;
    has_values.then_some(row)
}

fn check_row(
    row: usize,
    normalized: NormalizedRow<'_>,
    errors: &mut ValidationErrors,
) -> Option<IngredientPayload> {
    let before = errors.len();
    if normalized.name.is_empty() {
        errors.add(
            FieldPath::ingredient(row, IngredientField::Name),
            messages::INGREDIENT_NAME_REQUIRED,
        );
    }
    if normalized.quantity < 0.0 {
        errors.add(
            FieldPath::ingredient(row, IngredientField::Quantity),
            messages::QUANTITY_NEGATIVE,
        );
    }
    if normalized.unit_cost < 0.0 {
        errors.add(
            FieldPath::ingredient(row, IngredientField::UnitCost),
            messages::UNIT_COST_NEGATIVE,
        );
    }
    if errors.len() > before {
        return None;
    }
    Some(IngredientPayload {
        name: normalized.name.to_owned(),
        category: non_blank(normalized.category),
        unit: non_blank(normalized.unit),
        quantity: normalized.quantity,
        unit_cost: normalized.unit_cost,
    })
}

fn non_blank(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

const fn missing_number() -> f64 {
    f64::NAN
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_string(&Value::deserialize(deserializer)?))
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(deserializer)?.raw_num())
}

fn lenient_rows<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<IngredientFormValues>, D::Error> {
    let Value::Array(rows) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(rows
        .iter()
        .map(|row| match row {
            Value::Object(fields) => IngredientFormValues {
                name: fields.get("name").map(value_to_string).unwrap_or_default(),
                category: fields.get("category").map(value_to_string).unwrap_or_default(),
                unit: fields.get("unit").map(value_to_string).unwrap_or_default(),
                quantity: fields.get("quantity").map_or(0.0, ToNum::raw_num),
                unit_cost: fields.get("unit_cost").map_or(0.0, ToNum::raw_num),
            },
            _ => IngredientFormValues::empty(),
        })
        .collect())
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
