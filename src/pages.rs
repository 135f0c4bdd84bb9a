// ABOUTME: View-models for the recipe list and the calculator (create/edit) screens
// ABOUTME: Load failures become error views; saves raise notifications and pick the next route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 WeChef Contributors

//! # Pages
//!
//! Each page turns data-layer results into a value a front end can render.
//! Neither page propagates backend errors: a failed load is a view of its
//! own, and a failed save is a notification.

use crate::api::RecipeApi;
use crate::constants::messages;
use crate::errors::{AppError, ErrorCode};
use crate::form::{RecipeForm, SubmitBlocked};
use crate::models::{Recipe, RecipeId, RecipeListItem};
use crate::navigation::Route;
use crate::notifications::{Notification, Notifications};
use crate::recipes::RecipeQueries;
use crate::validation::{RecipeFormValues, ValidationErrors};
use tracing::warn;

/// What the recipe list shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipesView {
    /// Rows, newest first
    Loaded(Vec<RecipeListItem>),
    /// Nothing saved yet; offers "Create your first recipe"
    Empty,
    /// The list could not be fetched; offers "Try Again"
    Failed {
        /// Message for the error panel
        message: String,
    },
}

/// Recipe list screen
pub struct RecipesPage;

impl RecipesPage {
    /// Page heading
    pub const TITLE: &'static str = "Recipes";

    /// Fetch the list (cached)
    pub async fn load<A: RecipeApi>(queries: &RecipeQueries<A>) -> RecipesView {
        Self::view(queries.recipes().await)
    }

    /// "Try Again": bypass the cache
    pub async fn retry<A: RecipeApi>(queries: &RecipeQueries<A>) -> RecipesView {
        Self::view(queries.refetch_recipes().await)
    }

    /// Route opened by a row's "Open" action
    #[must_use]
    pub const fn open_route(id: RecipeId) -> Route {
        Route::calculator(Some(id))
    }

    /// Route opened by "New Recipe"
    #[must_use]
    pub const fn create_route() -> Route {
        Route::calculator(None)
    }

    fn view(result: Result<Vec<RecipeListItem>, AppError>) -> RecipesView {
        match result {
            Ok(rows) if rows.is_empty() => RecipesView::Empty,
            Ok(rows) => RecipesView::Loaded(rows),
            Err(e) => {
                warn!(error = %e, "Failed to load recipes");
                RecipesView::Failed {
                    message: messages::RECIPES_LOAD_FAILED.to_owned(),
                }
            }
        }
    }
}

/// What the calculator route shows
#[derive(Debug)]
pub enum CalculatorView {
    /// The editable form
    Form(CalculatorPage),
    /// The recipe could not be loaded
    LoadFailed {
        /// Message for the error panel
        message: String,
        /// "Back to Recipes"
        back: Route,
    },
}

/// Result of pressing "Save Recipe"
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Saved; the caller should navigate to `next`
    Saved {
        /// Stored recipe as returned by the backend
        recipe: Recipe,
        /// Route to show next
        next: Route,
    },
    /// Blocked by validation; nothing was sent
    Invalid(ValidationErrors),
    /// Blocked because a save is already running; nothing was sent
    Busy,
    /// The backend rejected the save; form values are kept for resubmission
    Failed(AppError),
}

/// Create/edit screen
#[derive(Debug)]
pub struct CalculatorPage {
    recipe_id: Option<RecipeId>,
    form: RecipeForm,
}

impl CalculatorPage {
    /// Open the form, loading the recipe when editing
    pub async fn open<A: RecipeApi>(
        queries: &RecipeQueries<A>,
        recipe_id: Option<RecipeId>,
    ) -> CalculatorView {
        match queries.recipe(recipe_id).await {
            Ok(Some(recipe)) => CalculatorView::Form(Self::editing(&recipe)),
            Ok(None) => CalculatorView::Form(Self::creating()),
            Err(e) => {
                warn!(recipe.id = ?recipe_id, error = %e, "Failed to load recipe");
                CalculatorView::LoadFailed {
                    message: messages::RECIPE_LOAD_FAILED.to_owned(),
                    back: Route::Recipes,
                }
            }
        }
    }

    /// Blank form for a new recipe
    #[must_use]
    pub fn creating() -> Self {
        Self {
            recipe_id: None,
            form: RecipeForm::new(),
        }
    }

    /// Form pre-filled from a stored recipe
    #[must_use]
    pub fn editing(recipe: &Recipe) -> Self {
        Self {
            recipe_id: Some(recipe.id),
            form: RecipeForm::with_values(RecipeFormValues::from(recipe)),
        }
    }

    /// "New Recipe" or "Edit Recipe"
    #[must_use]
    pub const fn title(&self) -> &'static str {
        if self.recipe_id.is_some() {
            "Edit Recipe"
        } else {
            "New Recipe"
        }
    }

    /// Recipe being edited
    #[must_use]
    pub const fn recipe_id(&self) -> Option<RecipeId> {
        self.recipe_id
    }

    /// The form
    #[must_use]
    pub const fn form(&self) -> &RecipeForm {
        &self.form
    }

    /// The form, for editing
    pub fn form_mut(&mut self) -> &mut RecipeForm {
        &mut self.form
    }

    /// Route of the "Back" action
    #[must_use]
    pub const fn back_route() -> Route {
        Route::Recipes
    }

    /// Validate and save with exactly one create or update
    pub async fn submit<A: RecipeApi>(
        &mut self,
        queries: &RecipeQueries<A>,
        notifications: &mut Notifications,
    ) -> SubmitOutcome {
        let payload = match self.form.submit(queries.is_saving()) {
            Ok(payload) => payload,
            Err(SubmitBlocked::Invalid(errors)) => return SubmitOutcome::Invalid(errors),
            Err(SubmitBlocked::Saving) => return SubmitOutcome::Busy,
        };

        let (result, success_title) = match self.recipe_id {
            Some(id) => (queries.update(id, &payload).await, messages::RECIPE_UPDATED),
            None => (queries.create(&payload).await, messages::RECIPE_CREATED),
        };

        match result {
            Ok(recipe) => {
                notifications.push(Notification::success(success_title));
                SubmitOutcome::Saved {
                    recipe,
                    next: Route::Recipes,
                }
            }
            Err(e) if e.code == ErrorCode::ResourceLocked => SubmitOutcome::Busy,
            Err(e) => {
                warn!(recipe.id = ?self.recipe_id, error = %e, "Failed to save recipe");
                let description = if e.message.trim().is_empty() {
                    messages::SAVE_FAILED_DESCRIPTION.to_owned()
                } else {
                    e.message.clone()
                };
                notifications.push(Notification::error(messages::SAVE_FAILED, description));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
