use std::collections::BTreeSet;

use crate::{Generation, Recipe, RecipeId, SourceFailure};

/// Result of a full catalog load: the recipe list plus the persisted favorites.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub recipes: Vec<Recipe>,
    pub favorites: BTreeSet<RecipeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Session hydration: restored last search and the selection read from the location.
    SessionStarted {
        last_search: String,
        selected: Option<RecipeId>,
    },
    /// User asked for a (re)load of the full catalog.
    LoadRequested,
    CatalogLoaded {
        generation: Generation,
        result: Result<Catalog, SourceFailure>,
    },
    /// User edited the search box.
    SearchChanged(String),
    SearchCompleted {
        generation: Generation,
        result: Result<Vec<Recipe>, SourceFailure>,
    },
    TagsChanged(BTreeSet<String>),
    CuisinesChanged(BTreeSet<String>),
    RecipeOpened(RecipeId),
    RecipeClosed,
    /// Back/forward navigation changed the selection in the location.
    LocationChanged(Option<RecipeId>),
    FavoriteToggled(RecipeId),
    /// The persistence layer finished a toggle; `Ok` carries the persisted set.
    FavoritesUpdated(Result<BTreeSet<RecipeId>, SourceFailure>),
    ErrorDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
