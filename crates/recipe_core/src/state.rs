use std::collections::{BTreeSet, VecDeque};

use crate::filter::{distinct_sorted, filter_recipes};
use crate::view_model::AppViewModel;
use crate::{
    sanitize_recipes, Catalog, Recipe, RecipeId, SearchCriteria, SourceFailure, StoreError,
    StoreErrorKind,
};

/// Monotonic counter identifying base-list requests (loads and searches).
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    recipes: Vec<Recipe>,
    criteria: SearchCriteria,
    favorites: BTreeSet<RecipeId>,
    selected_recipe_id: Option<RecipeId>,
    loading: bool,
    error: Option<StoreError>,
    /// Trimmed query the base list was last requested for.
    last_searched_query: String,
    /// Trimmed query the current `recipes` were fetched for; empty after a full load.
    recipes_query: String,
    base_generation: Generation,
    pending_load: Option<Generation>,
    pending_search: Option<Generation>,
    /// Bumped whenever a toggle result lands, so an older load snapshot cannot overwrite it.
    favorites_revision: u64,
    load_favorites_revision: u64,
    favorite_in_flight: bool,
    queued_toggles: VecDeque<RecipeId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let filtered = self.filtered();
        let detail = self
            .selected_recipe_id
            .as_deref()
            .and_then(|id| filtered.iter().find(|r| r.id == id).cloned());
        AppViewModel {
            recipe_count: self.recipes.len(),
            loading: self.loading,
            searching: self.pending_search.is_some(),
            error: self.error.clone(),
            criteria: self.criteria.clone(),
            favorites: self.favorites.clone(),
            selected_recipe_id: self.selected_recipe_id.clone(),
            detail,
            available_tags: distinct_sorted(
                self.recipes.iter().flat_map(|r| r.tags.iter().map(String::as_str)),
            ),
            available_cuisines: distinct_sorted(self.recipes.iter().map(|r| r.cuisine.as_str())),
            favorite_in_flight: self.favorite_in_flight,
            filtered,
        }
    }

    /// Derived on every call from the base list and the criteria; never stored.
    pub fn filtered(&self) -> Vec<Recipe> {
        filter_recipes(&self.recipes, &self.criteria)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn favorites(&self) -> &BTreeSet<RecipeId> {
        &self.favorites
    }

    pub fn selected_recipe_id(&self) -> Option<&str> {
        self.selected_recipe_id.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    pub fn queued_toggle_count(&self) -> usize {
        self.queued_toggles.len()
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // --- load cycle ---

    pub(crate) fn start_load(&mut self) -> Generation {
        let generation = self.next_generation();
        self.loading = true;
        self.error = None;
        self.pending_load = Some(generation);
        self.pending_search = None;
        // A full load yields the same base list as an empty search.
        self.last_searched_query.clear();
        self.load_favorites_revision = self.favorites_revision;
        self.mark_dirty();
        generation
    }

    /// Applies a load result. Returns false when the result belongs to a superseded load.
    pub(crate) fn apply_load(
        &mut self,
        generation: Generation,
        result: Result<Catalog, SourceFailure>,
    ) -> bool {
        if self.pending_load != Some(generation) {
            return false;
        }
        self.pending_load = None;
        self.loading = false;
        match result {
            Ok(catalog) => {
                if generation == self.base_generation {
                    self.recipes = sanitize_recipes(catalog.recipes);
                    self.recipes_query.clear();
                }
                let toggled_meanwhile = self.favorite_in_flight
                    || self.favorites_revision != self.load_favorites_revision;
                if !toggled_meanwhile {
                    self.favorites = catalog.favorites;
                }
            }
            Err(failure) => {
                if generation == self.base_generation {
                    self.restore_last_searched();
                }
                self.error = Some(StoreError::from_failure(StoreErrorKind::LoadFailure, &failure));
            }
        }
        self.mark_dirty();
        true
    }

    // --- search ---

    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if self.criteria.query == query {
            return false;
        }
        self.criteria.query = query;
        self.mark_dirty();
        true
    }

    pub(crate) fn last_searched_query(&self) -> &str {
        &self.last_searched_query
    }

    /// An empty start-up state with nothing in flight and no error, where a plain load
    /// is the right way to fill the base list.
    pub(crate) fn needs_initial_load(&self) -> bool {
        self.recipes.is_empty() && !self.loading && self.error.is_none()
    }

    pub(crate) fn start_search(&mut self, query: &str) -> Generation {
        let generation = self.next_generation();
        self.last_searched_query = query.to_string();
        self.pending_search = Some(generation);
        self.mark_dirty();
        generation
    }

    /// Applies a search result only if no newer base-list request has started since.
    pub(crate) fn apply_search(
        &mut self,
        generation: Generation,
        result: Result<Vec<Recipe>, SourceFailure>,
    ) -> bool {
        if generation != self.base_generation || self.pending_search != Some(generation) {
            return false;
        }
        self.pending_search = None;
        match result {
            Ok(recipes) => {
                self.recipes = sanitize_recipes(recipes);
                self.recipes_query = self.last_searched_query.clone();
            }
            Err(failure) => {
                // The base list still belongs to the previous query, so re-entering the failed
                // one must search again.
                self.restore_last_searched();
                self.error = Some(StoreError::from_failure(
                    StoreErrorKind::SearchFailure,
                    &failure,
                ));
            }
        }
        self.mark_dirty();
        true
    }

    // --- tags / cuisines ---

    pub(crate) fn set_tags(&mut self, tags: BTreeSet<String>) {
        if self.criteria.tags != tags {
            self.criteria.tags = tags;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_cuisines(&mut self, cuisines: BTreeSet<String>) {
        if self.criteria.cuisines != cuisines {
            self.criteria.cuisines = cuisines;
            self.mark_dirty();
        }
    }

    // --- selection ---

    pub(crate) fn select(&mut self, id: Option<RecipeId>) {
        if self.selected_recipe_id != id {
            self.selected_recipe_id = id;
            self.mark_dirty();
        }
    }

    // --- favorites ---

    /// Returns the id to toggle now, or queues it behind the toggle already in flight.
    pub(crate) fn request_toggle(&mut self, id: RecipeId) -> Option<RecipeId> {
        if self.favorite_in_flight {
            self.queued_toggles.push_back(id);
            return None;
        }
        self.favorite_in_flight = true;
        self.mark_dirty();
        Some(id)
    }

    /// Applies a toggle result and returns the next queued id to toggle, if any.
    pub(crate) fn apply_toggle(
        &mut self,
        result: Result<BTreeSet<RecipeId>, SourceFailure>,
    ) -> Option<RecipeId> {
        self.favorite_in_flight = false;
        match result {
            Ok(favorites) => {
                self.favorites = favorites;
                self.favorites_revision += 1;
            }
            Err(failure) => {
                self.error = Some(StoreError::from_failure(
                    StoreErrorKind::FavoriteToggleFailure,
                    &failure,
                ));
            }
        }
        self.mark_dirty();
        let next = self.queued_toggles.pop_front()?;
        self.favorite_in_flight = true;
        Some(next)
    }

    pub(crate) fn clear_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    fn restore_last_searched(&mut self) {
        self.last_searched_query = self.recipes_query.clone();
    }

    fn next_generation(&mut self) -> Generation {
        self.base_generation += 1;
        self.base_generation
    }
}
