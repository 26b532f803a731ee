#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Once;

use recipe_core::{update, AppState, Catalog, Effect, Generation, Msg, Recipe};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(recipe_logging::initialize_for_tests);
}

pub fn recipe(id: &str, title: &str, cuisine: &str, tags: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        ingredients: Vec::new(),
        instructions: Vec::new(),
        prep_time: 0,
        cook_time: 0,
        servings: 1,
        cuisine: cuisine.to_string(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        image: String::new(),
        rating: None,
    }
}

pub fn bolognese() -> Recipe {
    recipe("spaghetti-bolognese", "Spaghetti Bolognese", "Italian", &["Italian"])
}

pub fn ramen() -> Recipe {
    recipe("miso-ramen", "Simple Miso Ramen", "Japanese", &["Japanese"])
}

pub fn ids<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Vec<&'a str> {
    recipes.into_iter().map(|r| r.id.as_str()).collect()
}

pub fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn load_generation(effects: &[Effect]) -> Generation {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::LoadCatalog { generation } => Some(*generation),
            _ => None,
        })
        .expect("load effect")
}

pub fn search_generation(effects: &[Effect]) -> Generation {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Search { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("search effect")
}

/// Starts a session with an empty last search and completes the initial load.
pub fn loaded_state(recipes: Vec<Recipe>, favorites: &[&str]) -> AppState {
    let (state, effects) = update(
        AppState::new(),
        Msg::SessionStarted {
            last_search: String::new(),
            selected: None,
        },
    );
    let generation = load_generation(&effects);
    let (mut state, _) = update(
        state,
        Msg::CatalogLoaded {
            generation,
            result: Ok(Catalog {
                recipes,
                favorites: set(favorites),
            }),
        },
    );
    state.consume_dirty();
    state
}
