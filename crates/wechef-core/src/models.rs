// ABOUTME: Recipe and ingredient types exchanged with the REST backend
// ABOUTME: Includes list items, full detail records, and the create/update payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend-assigned recipe identifier
pub type RecipeId = i64;

/// Single ingredient line as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Backend-assigned identifier
    pub id: i64,
    /// Ingredient name
    pub name: String,
    /// Optional grouping, e.g. "Meat"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional unit label, e.g. "kg"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Amount used, in `unit`
    #[serde(default)]
    pub quantity: f64,
    /// Cost of one `unit`
    #[serde(default)]
    pub unit_cost: f64,
}

/// Complete recipe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Backend-assigned identifier
    pub id: RecipeId,
    /// Recipe name
    pub name: String,
    /// Number of servings the recipe yields
    pub servings: i64,
    /// Ordered ingredient lines
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Creation timestamp
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Summary row for the list view
    #[must_use]
    pub fn list_item(&self) -> RecipeListItem {
        RecipeListItem {
            id: self.id,
            name: self.name.clone(),
            updated_at: self.updated_at,
        }
    }
}

/// Row of the recipe list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeListItem {
    /// Backend-assigned identifier
    pub id: RecipeId,
    /// Recipe name
    pub name: String,
    /// Last update timestamp
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Validated ingredient sent on create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientPayload {
    /// Trimmed, non-empty name
    pub name: String,
    /// Trimmed category; absent when blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Trimmed unit; absent when blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Finite, non-negative quantity
    #[serde(default)]
    pub quantity: f64,
    /// Finite, non-negative unit cost
    #[serde(default)]
    pub unit_cost: f64,
}

impl IngredientPayload {
    /// Quantity times unit cost
    #[must_use]
    pub fn line_cost(&self) -> f64 {
        crate::number::safe_mul(self.quantity, self.unit_cost)
    }
}

/// Validated body of `POST /recipes` and `PUT /recipes/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePayload {
    /// Trimmed, non-empty name
    pub name: String,
    /// Whole number of servings, at least 1
    pub servings: i64,
    /// At least one ingredient
    pub ingredients: Vec<IngredientPayload>,
}

impl RecipePayload {
    /// Sum of all line costs
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.ingredients
            .iter()
            .map(IngredientPayload::line_cost)
            .sum()
    }
}

/// Timestamp (de)serialization
///
/// Writes RFC 3339. Reads RFC 3339 as well as the naive ISO-8601 form some
/// backends emit (`2025-01-01T12:00:00.123456`), which is taken as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    /// Serialize as RFC 3339
    ///
    /// # Errors
    ///
    /// Returns the serializer's error
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    /// Deserialize RFC 3339 or naive ISO-8601
    ///
    /// # Errors
    ///
    /// Returns an error when the string matches neither form
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }

    /// Parse either accepted form
    #[must_use]
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_accepts_naive_timestamps() {
        let raw = r#"{
            "id": 3,
            "name": "Beef Pho",
            "servings": 4,
            "ingredients": [
                {"id": 1, "name": "Brisket", "category": "Meat", "unit": "kg", "quantity": 0.5, "unit_cost": 18.0}
            ],
            "created_at": "2025-03-01T10:00:00.123456",
            "updated_at": "2025-03-02T08:30:00+00:00"
        }"#;
        let recipe: Recipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.created_at.to_rfc3339(), "2025-03-01T10:00:00.123456+00:00");
        assert_eq!(recipe.list_item().name, "Beef Pho");
    }

    #[test]
    fn test_payload_omits_absent_optionals() {
        let payload = RecipePayload {
            name: "Toast".to_owned(),
            servings: 1,
            ingredients: vec![IngredientPayload {
                name: "Bread".to_owned(),
                category: None,
                unit: None,
                quantity: 2.0,
                unit_cost: 0.25,
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["ingredients"][0].get("category").is_none());
        assert!((payload.total_cost() - 0.5).abs() < 1e-9);
    }
}
