use crate::{AppState, Effect, Msg, RecipeId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted {
            last_search,
            selected,
        } => {
            state.set_query(last_search.clone());
            state.select(non_blank(selected));
            // Favorites only arrive with the catalog, so the load runs even when a restored
            // query immediately replaces the base list.
            let mut effects = vec![Effect::LoadCatalog {
                generation: state.start_load(),
            }];
            let query = last_search.trim();
            if !query.is_empty() {
                effects.push(Effect::Search {
                    generation: state.start_search(query),
                    query: query.to_string(),
                });
            }
            effects
        }
        Msg::LoadRequested => vec![Effect::LoadCatalog {
            generation: state.start_load(),
        }],
        Msg::CatalogLoaded { generation, result } => {
            state.apply_load(generation, result);
            Vec::new()
        }
        Msg::SearchChanged(text) => {
            if !state.set_query(text.clone()) {
                // Re-entering the same text retries a search that failed.
                let retry = retry_search(&mut state, text.trim());
                return (state, retry.into_iter().collect());
            }
            let mut effects = vec![Effect::PersistLastSearch {
                query: text.clone(),
            }];
            effects.extend(query_fetch(&mut state, text.trim()));
            effects
        }
        Msg::SearchCompleted { generation, result } => {
            state.apply_search(generation, result);
            Vec::new()
        }
        Msg::TagsChanged(tags) => {
            state.set_tags(tags);
            Vec::new()
        }
        Msg::CuisinesChanged(cuisines) => {
            state.set_cuisines(cuisines);
            Vec::new()
        }
        Msg::RecipeOpened(id) => {
            let selected = non_blank(Some(id));
            state.select(selected.clone());
            vec![Effect::PushLocation { selected }]
        }
        Msg::RecipeClosed => {
            state.select(None);
            vec![Effect::PushLocation { selected: None }]
        }
        Msg::LocationChanged(selected) => {
            state.select(non_blank(selected));
            Vec::new()
        }
        Msg::FavoriteToggled(id) => match non_blank(Some(id)) {
            Some(id) => state
                .request_toggle(id)
                .map(|id| Effect::ToggleFavorite { id })
                .into_iter()
                .collect(),
            None => Vec::new(),
        },
        Msg::FavoritesUpdated(result) => state
            .apply_toggle(result)
            .map(|id| Effect::ToggleFavorite { id })
            .into_iter()
            .collect(),
        Msg::ErrorDismissed => {
            state.clear_error();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Decides which base-list request, if any, a changed query needs.
fn query_fetch(state: &mut AppState, query: &str) -> Option<Effect> {
    if query.is_empty() && state.needs_initial_load() {
        return Some(Effect::LoadCatalog {
            generation: state.start_load(),
        });
    }
    if query == state.last_searched_query() {
        return None;
    }
    Some(Effect::Search {
        generation: state.start_search(query),
        query: query.to_string(),
    })
}

/// A search for an unchanged query, issued only when the base list does not already come from
/// it and no request for it is in flight.
fn retry_search(state: &mut AppState, query: &str) -> Option<Effect> {
    if query == state.last_searched_query() {
        return None;
    }
    Some(Effect::Search {
        generation: state.start_search(query),
        query: query.to_string(),
    })
}

fn non_blank(id: Option<RecipeId>) -> Option<RecipeId> {
    id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty())
}
