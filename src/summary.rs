// ABOUTME: Derived recipe costs: per-line cost, total, and cost per serving
// ABOUTME: Computed from raw form values, so blank or invalid inputs count as zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use crate::models::Recipe;
use crate::number::{format_currency, safe_div, safe_mul, to_num, truncate, ToNum, DEFAULT_DECIMALS};
use crate::validation::RecipeFormValues;
use serde::Serialize;

/// Quantity times unit cost
#[must_use]
pub fn line_cost(quantity: impl ToNum, unit_cost: impl ToNum) -> f64 {
    safe_mul(quantity, unit_cost)
}

/// Costs derived from a recipe's ingredient lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    /// Cost of each line, in row order
    pub line_costs: Vec<f64>,
    /// Sum of line costs
    pub total_cost: f64,
    /// Total divided by servings; `0` when servings is zero or blank
    pub cost_per_serving: f64,
    /// Servings used for the division
    pub servings: f64,
}

impl CostSummary {
    fn from_lines(lines: impl IntoIterator<Item = f64>, servings: impl ToNum) -> Self {
        let line_costs: Vec<f64> = lines.into_iter().collect();
        let total_cost: f64 = line_costs.iter().sum();
        let servings = to_num(servings);
        Self {
            cost_per_serving: safe_div(total_cost, servings),
            line_costs,
            total_cost,
            servings,
        }
    }

    /// Summary of what is currently typed into the form
    #[must_use]
    pub fn from_values(values: &RecipeFormValues) -> Self {
        Self::from_lines(
            values
                .ingredients
                .iter()
                .map(|row| line_cost(row.quantity, row.unit_cost)),
            values.servings,
        )
    }

    /// Summary of a stored recipe
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self::from_lines(
            recipe
                .ingredients
                .iter()
                .map(|row| line_cost(row.quantity, row.unit_cost)),
            recipe.servings,
        )
    }

    /// Total cost, truncated to cents and formatted
    #[must_use]
    pub fn total_display(&self) -> String {
        format_currency(truncate(self.total_cost, DEFAULT_DECIMALS))
    }

    /// Cost per serving, truncated to cents and formatted
    #[must_use]
    pub fn per_serving_display(&self) -> String {
        format_currency(truncate(self.cost_per_serving, DEFAULT_DECIMALS))
    }

    /// Servings as shown next to the totals
    #[must_use]
    pub fn servings_display(&self) -> String {
        self.servings.to_string()
    }

    /// Formatted cost of one line
    #[must_use]
    pub fn line_display(&self, index: usize) -> Option<String> {
        self.line_costs.get(index).map(|cost| format_currency(*cost))
    }
}
