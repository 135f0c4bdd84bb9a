// ABOUTME: Top-level application state tying navigation, queries, and notifications together
// ABOUTME: Builds the screen for the current route and falls back to a reload screen on panics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

use crate::api::RecipeApi;
use crate::constants::messages;
use crate::navigation::{Navigator, Route};
use crate::notifications::Notifications;
use crate::pages::{CalculatorPage, CalculatorView, RecipesPage, RecipesView, SubmitOutcome};
use crate::recipes::RecipeQueries;
use std::sync::Arc;
use tracing::error;

/// Everything the front end renders
#[derive(Debug)]
pub enum Screen {
    /// Recipe list
    Recipes(RecipesView),
    /// Create/edit form or its load error
    Calculator(CalculatorView),
    /// Building the screen crashed; offers a full reload
    Fallback {
        /// Message shown with the reload action
        message: String,
    },
}

/// Application state
pub struct App<A: RecipeApi + 'static> {
    navigator: Navigator,
    queries: Arc<RecipeQueries<A>>,
    notifications: Notifications,
    screen: Screen,
}

impl<A: RecipeApi + 'static> App<A> {
    /// Open the app at `location` and build its first screen
    pub async fn start(queries: RecipeQueries<A>, location: &str) -> Self {
        let navigator = Navigator::new(location);
        let queries = Arc::new(queries);
        let screen = build_screen(Arc::clone(&queries), navigator.current()).await;
        Self {
            navigator,
            queries,
            notifications: Notifications::default(),
            screen,
        }
    }

    /// Screen for the current route
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Current route
    #[must_use]
    pub fn route(&self) -> Route {
        self.navigator.current()
    }

    /// Navigation history
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Data-access layer
    #[must_use]
    pub fn queries(&self) -> &RecipeQueries<A> {
        &self.queries
    }

    /// Pending notifications
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Push a URL and show its screen
    pub async fn navigate(&mut self, location: &str) -> &Screen {
        self.navigator.navigate(location);
        self.refresh().await
    }

    /// Show `route`
    pub async fn go(&mut self, route: Route) -> &Screen {
        self.navigate(&route.path()).await
    }

    /// Return to the previous URL, if any
    pub async fn back(&mut self) -> &Screen {
        if self.navigator.back().is_some() {
            return self.refresh().await;
        }
        &self.screen
    }

    /// Rebuild the current screen (cached reads stay cached)
    pub async fn refresh(&mut self) -> &Screen {
        self.screen = build_screen(Arc::clone(&self.queries), self.navigator.current()).await;
        &self.screen
    }

    /// "Try Again" on the recipe list
    pub async fn retry_recipes(&mut self) -> &Screen {
        if matches!(self.navigator.current(), Route::Recipes) {
            self.screen = Screen::Recipes(RecipesPage::retry(&self.queries).await);
        }
        &self.screen
    }

    /// Full reload: drop cached data and notifications, then rebuild
    pub async fn reload(&mut self) -> &Screen {
        self.queries.cache().clear_all().await;
        self.notifications.clear();
        self.refresh().await
    }

    /// The calculator page when it is showing its form
    pub fn calculator_mut(&mut self) -> Option<&mut CalculatorPage> {
        match &mut self.screen {
            Screen::Calculator(CalculatorView::Form(page)) => Some(page),
            _ => None,
        }
    }

    /// Press "Save Recipe"; after a save the app moves to the next route
    ///
    /// Returns `None` when no form is showing.
    pub async fn submit(&mut self) -> Option<SubmitOutcome> {
        let Screen::Calculator(CalculatorView::Form(page)) = &mut self.screen else {
            return None;
        };
        let outcome = page.submit(&self.queries, &mut self.notifications).await;
        if let SubmitOutcome::Saved { next, .. } = &outcome {
            let next = *next;
            self.go(next).await;
        }
        Some(outcome)
    }
}

/// Build a screen on its own task so a panic becomes the fallback screen
async fn build_screen<A: RecipeApi + 'static>(queries: Arc<RecipeQueries<A>>, route: Route) -> Screen {
    let task = tokio::spawn(async move {
        match route {
            Route::Recipes => Screen::Recipes(RecipesPage::load(&queries).await),
            Route::Calculator { recipe_id } => {
                Screen::Calculator(CalculatorPage::open(&queries, recipe_id).await)
            }
        }
    });
    match task.await {
        Ok(screen) => screen,
        Err(e) => {
            error!(route = %route, error = %e, "Screen failed to build");
            Screen::Fallback {
                message: messages::UNEXPECTED_ERROR.to_owned(),
            }
        }
    }
}
