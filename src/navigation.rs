// ABOUTME: Client-side routes and a navigator holding URL history
// ABOUTME: Parses "/" and "/calculator?id=N"; subscribers are notified on every change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use crate::models::RecipeId;
use std::fmt;
use tokio::sync::watch;
use tracing::debug;
use url::Url;

const CALCULATOR_PATH: &str = "/calculator";
const RECIPES_PATH: &str = "/";

/// Screen selected by the current URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Recipe list
    Recipes,
    /// Create form (`recipe_id` absent) or edit form
    Calculator {
        /// Recipe being edited
        recipe_id: Option<RecipeId>,
    },
}

impl Route {
    /// Route for a URL path with optional query string
    ///
    /// Only `/calculator` is special; an `id` that is not a non-zero integer
    /// opens the create form. Every other path is the recipe list.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let Ok(base) = Url::parse("http://localhost/") else {
            return Self::Recipes;
        };
        let Ok(url) = base.join(location.trim()) else {
            return Self::Recipes;
        };
        if url.path() != CALCULATOR_PATH {
            return Self::Recipes;
        }
        let recipe_id = url
            .query_pairs()
            .find(|(key, _)| key == "id")
            .and_then(|(_, value)| value.trim().parse::<RecipeId>().ok())
            .filter(|id| *id != 0);
        Self::Calculator { recipe_id }
    }

    /// Calculator route for an optional recipe
    #[must_use]
    pub const fn calculator(recipe_id: Option<RecipeId>) -> Self {
        Self::Calculator { recipe_id }
    }

    /// URL that selects this route
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Recipes => RECIPES_PATH.to_owned(),
            Self::Calculator { recipe_id: None } => CALCULATOR_PATH.to_owned(),
            Self::Calculator {
                recipe_id: Some(id),
            } => format!("{CALCULATOR_PATH}?id={id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// URL history plus change notification
#[derive(Debug)]
pub struct Navigator {
    history: Vec<String>,
    tx: watch::Sender<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(RECIPES_PATH)
    }
}

impl Navigator {
    /// Navigator starting at `initial`
    #[must_use]
    pub fn new(initial: &str) -> Self {
        let (tx, _rx) = watch::channel(Route::parse(initial));
        Self {
            history: vec![initial.to_owned()],
            tx,
        }
    }

    /// Push `location` and notify subscribers
    pub fn navigate(&mut self, location: &str) -> Route {
        self.history.push(location.to_owned());
        let route = Route::parse(location);
        debug!(location, ?route, "Navigated");
        self.tx.send_replace(route);
        route
    }

    /// Navigate to the create or edit form
    pub fn to_calculator(&mut self, recipe_id: Option<RecipeId>) -> Route {
        self.navigate(&Route::calculator(recipe_id).path())
    }

    /// Pop the current entry; `None` when already at the first one
    pub fn back(&mut self) -> Option<Route> {
        if self.history.len() <= 1 {
            return None;
        }
        self.history.pop();
        let route = Route::parse(self.current_location());
        self.tx.send_replace(route);
        Some(route)
    }

    /// Route of the current URL
    #[must_use]
    pub fn current(&self) -> Route {
        *self.tx.borrow()
    }

    /// Current URL as pushed
    #[must_use]
    pub fn current_location(&self) -> &str {
        self.history.last().map_or(RECIPES_PATH, String::as_str)
    }

    /// Number of history entries
    #[must_use]
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Receiver that sees every route change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::parse("/"), Route::Recipes);
        assert_eq!(Route::parse("/anything/else"), Route::Recipes);
        assert_eq!(Route::parse("/calculator"), Route::calculator(None));
        assert_eq!(Route::parse("/calculator?id=7"), Route::calculator(Some(7)));
        assert_eq!(Route::parse("/calculator?x=1&id=12"), Route::calculator(Some(12)));
        assert_eq!(Route::parse("/calculator?id=abc"), Route::calculator(None));
        assert_eq!(Route::parse("/calculator?id=0"), Route::calculator(None));
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Recipes.path(), "/");
        assert_eq!(Route::calculator(None).path(), "/calculator");
        assert_eq!(Route::calculator(Some(3)).to_string(), "/calculator?id=3");
    }

    #[test]
    fn test_history_and_subscribers() {
        let mut navigator = Navigator::default();
        let mut rx = navigator.subscribe();
        assert!(navigator.back().is_none());

        navigator.to_calculator(Some(5));
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(*rx.borrow_and_update(), Route::calculator(Some(5)));
        assert_eq!(navigator.current_location(), "/calculator?id=5");

        assert_eq!(navigator.back(), Some(Route::Recipes));
        assert_eq!(*rx.borrow_and_update(), Route::Recipes);
        assert_eq!(navigator.depth(), 1);
    }
}
