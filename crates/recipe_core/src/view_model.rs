use std::collections::BTreeSet;

use crate::{Recipe, RecipeId, SearchCriteria, StoreError};

/// Read-only snapshot handed to presentation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    /// Base list filtered by the current criteria, in base-list order.
    pub filtered: Vec<Recipe>,
    /// Size of the base list before local filtering.
    pub recipe_count: usize,
    pub loading: bool,
    pub searching: bool,
    pub error: Option<StoreError>,
    pub criteria: SearchCriteria,
    pub favorites: BTreeSet<RecipeId>,
    pub selected_recipe_id: Option<RecipeId>,
    /// The selected recipe, only while it is part of `filtered`.
    pub detail: Option<Recipe>,
    pub available_tags: Vec<String>,
    pub available_cuisines: Vec<String>,
    pub favorite_in_flight: bool,
}

impl AppViewModel {
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        !self.loading && self.filtered.is_empty()
    }
}
