mod common;

use common::*;
use recipe_core::{update, AppState, Catalog, Effect, Msg, SourceFailure, StoreErrorKind};

#[test]
fn session_start_loads_catalog_and_favorites() {
    init_logging();
    let (mut state, effects) = update(
        AppState::new(),
        Msg::SessionStarted {
            last_search: String::new(),
            selected: None,
        },
    );
    assert_eq!(effects, vec![Effect::LoadCatalog { generation: 1 }]);
    assert!(state.view().loading);
    assert!(state.consume_dirty());

    let (state, effects) = update(
        state,
        Msg::CatalogLoaded {
            generation: 1,
            result: Ok(Catalog {
                recipes: vec![bolognese(), ramen()],
                favorites: set(&["miso-ramen"]),
            }),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert_eq!(ids(&view.filtered), vec!["spaghetti-bolognese", "miso-ramen"]);
    assert!(view.is_favorite("miso-ramen"));
}

#[test]
fn restored_last_search_loads_and_searches() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::SessionStarted {
            last_search: " ramen ".to_string(),
            selected: Some("miso-ramen".to_string()),
        },
    );
    assert_eq!(
        effects,
        vec![
            Effect::LoadCatalog { generation: 1 },
            Effect::Search {
                generation: 2,
                query: "ramen".to_string(),
            },
        ]
    );
    assert_eq!(state.criteria().query, " ramen ");
    assert_eq!(state.selected_recipe_id(), Some("miso-ramen"));

    // The search answers first; the later load must not clobber its base list,
    // but still delivers favorites.
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            generation: 2,
            result: Ok(vec![ramen()]),
        },
    );
    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            generation: 1,
            result: Ok(Catalog {
                recipes: vec![bolognese(), ramen()],
                favorites: set(&["spaghetti-bolognese"]),
            }),
        },
    );
    let view = state.view();
    assert_eq!(ids(state.recipes()), vec!["miso-ramen"]);
    assert!(view.is_favorite("spaghetti-bolognese"));
    assert_eq!(view.detail.map(|r| r.id), Some("miso-ramen".to_string()));
}

#[test]
fn load_failure_keeps_previous_values() {
    init_logging();
    let state = loaded_state(vec![bolognese()], &["spaghetti-bolognese"]);
    let (state, effects) = update(state, Msg::LoadRequested);
    let generation = load_generation(&effects);
    assert!(state.loading());
    assert_eq!(state.error(), None);

    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            generation,
            result: Err(SourceFailure {
                status: Some(503),
                timed_out: false,
                detail: "HTTP 503".to_string(),
            }),
        },
    );
    assert!(!state.loading());
    let error = state.error().expect("error set");
    assert_eq!(error.kind, StoreErrorKind::LoadFailure);
    assert_eq!(error.message, "failed to load recipes");
    assert_eq!(error.status, Some(503));
    assert_eq!(ids(state.recipes()), vec!["spaghetti-bolognese"]);
    assert!(state.favorites().contains("spaghetti-bolognese"));
}

#[test]
fn timeout_is_distinguishable() {
    init_logging();
    let state = loaded_state(vec![bolognese()], &[]);
    let (state, effects) = update(state, Msg::LoadRequested);
    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            generation: load_generation(&effects),
            result: Err(SourceFailure {
                status: None,
                timed_out: true,
                detail: "timeout".to_string(),
            }),
        },
    );
    let error = state.error().unwrap();
    assert!(error.timed_out);
    assert_eq!(error.to_string(), "failed to load recipes (timed out)");
}

#[test]
fn superseded_load_result_is_discarded() {
    init_logging();
    let state = loaded_state(vec![bolognese()], &[]);
    let (state, first) = update(state, Msg::LoadRequested);
    let (state, second) = update(state, Msg::LoadRequested);
    let first = load_generation(&first);
    let second = load_generation(&second);

    let (mut state, _) = update(
        state,
        Msg::CatalogLoaded {
            generation: first,
            result: Ok(Catalog {
                recipes: vec![ramen()],
                favorites: Default::default(),
            }),
        },
    );
    state.consume_dirty();
    assert!(state.loading());
    assert_eq!(ids(state.recipes()), vec!["spaghetti-bolognese"]);

    let (state, _) = update(
        state,
        Msg::CatalogLoaded {
            generation: second,
            result: Ok(Catalog {
                recipes: vec![bolognese(), ramen()],
                favorites: Default::default(),
            }),
        },
    );
    assert!(!state.loading());
    assert_eq!(state.recipes().len(), 2);
}

#[test]
fn load_clears_previous_error_and_error_can_be_dismissed() {
    init_logging();
    let state = loaded_state(vec![bolognese()], &[]);
    let (state, effects) = update(state, Msg::SearchChanged("x".to_string()));
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            generation: search_generation(&effects),
            result: Err(SourceFailure::new("boom")),
        },
    );
    assert_eq!(state.error().unwrap().kind, StoreErrorKind::SearchFailure);

    let (state, _) = update(state, Msg::ErrorDismissed);
    assert_eq!(state.error(), None);

    let (state, effects) = update(state, Msg::SearchChanged("y".to_string()));
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            generation: search_generation(&effects),
            result: Err(SourceFailure::new("boom")),
        },
    );
    let (state, _) = update(state, Msg::LoadRequested);
    assert_eq!(state.error(), None);
}
