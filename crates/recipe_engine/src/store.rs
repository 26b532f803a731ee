use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use recipe_core::location::selection_from_url;
use recipe_core::{update, AppState, AppViewModel, Catalog, Effect, Msg, SourceFailure};
use recipe_logging::{recipe_debug, recipe_info, recipe_trace, recipe_warn};
use tokio::sync::watch;
use tokio_util::task::TaskTracker;
use url::Url;

use crate::{Debouncer, Navigator, Preferences, RecipeSource};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

struct StoreInner {
    state: Mutex<AppState>,
    source: Arc<dyn RecipeSource>,
    preferences: Preferences,
    navigator: Option<Arc<dyn Navigator>>,
    debouncer: Debouncer,
    tasks: TaskTracker,
    view_tx: watch::Sender<AppViewModel>,
}

pub struct StoreBuilder {
    source: Arc<dyn RecipeSource>,
    preferences: Preferences,
    navigator: Option<Arc<dyn Navigator>>,
    search_debounce: Duration,
}

impl StoreBuilder {
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn search_debounce(mut self, window: Duration) -> Self {
        self.search_debounce = window;
        self
    }

    pub fn build(self) -> RecipeStore {
        let state = AppState::new();
        let (view_tx, _) = watch::channel(state.view());
        let tasks = TaskTracker::new();
        RecipeStore {
            inner: Arc::new(StoreInner {
                state: Mutex::new(state),
                source: self.source,
                preferences: self.preferences,
                navigator: self.navigator,
                debouncer: Debouncer::new(self.search_debounce, tasks.clone()),
                tasks,
                view_tx,
            }),
        }
    }
}

/// Session-wide recipe state. Construct once at application entry and hand clones to the
/// presentation layer; all clones share the same state.
///
/// Actions apply their synchronous part immediately and run I/O as background tasks whose
/// results are fed back through the same state machine. Actions must be called from within
/// a Tokio runtime.
#[derive(Clone)]
pub struct RecipeStore {
    inner: Arc<StoreInner>,
}

impl RecipeStore {
    pub fn builder(source: Arc<dyn RecipeSource>, preferences: Preferences) -> StoreBuilder {
        StoreBuilder {
            source,
            preferences,
            navigator: None,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }

    /// Hydrates the session from the persisted last search and the current location, then
    /// loads the catalog.
    pub fn start(&self) {
        let last_search = self.inner.preferences.read_last_search();
        let selected = self
            .inner
            .navigator
            .as_ref()
            .and_then(|navigator| navigator.current_selection());
        recipe_info!(
            "Starting session (last search {:?}, selected {:?})",
            last_search,
            selected
        );
        self.dispatch(Msg::SessionStarted {
            last_search,
            selected,
        });
    }

    pub fn load_recipes(&self) {
        self.dispatch(Msg::LoadRequested);
    }

    pub fn set_search(&self, text: impl Into<String>) {
        self.dispatch(Msg::SearchChanged(text.into()));
    }

    pub fn set_tags<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(Msg::TagsChanged(collect_set(tags)));
    }

    pub fn set_cuisines<I, S>(&self, cuisines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(Msg::CuisinesChanged(collect_set(cuisines)));
    }

    pub fn open_recipe(&self, id: impl Into<String>) {
        self.dispatch(Msg::RecipeOpened(id.into()));
    }

    pub fn close_recipe(&self) {
        self.dispatch(Msg::RecipeClosed);
    }

    /// Back/forward navigation landed on `url`.
    pub fn location_changed(&self, url: &Url) {
        self.dispatch(Msg::LocationChanged(selection_from_url(url)));
    }

    pub fn toggle_favorite(&self, id: impl Into<String>) {
        self.dispatch(Msg::FavoriteToggled(id.into()));
    }

    pub fn dismiss_error(&self) {
        self.dispatch(Msg::ErrorDismissed);
    }

    pub fn view(&self) -> AppViewModel {
        self.lock_state().view()
    }

    /// Receives a fresh view model after every visible change.
    pub fn subscribe(&self) -> watch::Receiver<AppViewModel> {
        self.inner.view_tx.subscribe()
    }

    pub fn source(&self) -> &Arc<dyn RecipeSource> {
        &self.inner.source
    }

    /// Waits until no load, search, toggle or pending debounced write is in flight.
    pub async fn settled(&self) {
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        self.inner.tasks.reopen();
    }

    fn dispatch(&self, msg: Msg) {
        let mut guard = self.lock_state();
        let state = std::mem::take(&mut *guard);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.inner.view_tx.send_replace(state.view());
        }
        *guard = state;

        // Views and effects leave under the state lock, in the order the updates happened.
        // Effects only spawn or schedule, so nothing here waits on the lock again.
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&self, effect: Effect) {
        match effect {
            Effect::LoadCatalog { generation } => {
                recipe_debug!("LoadCatalog generation={}", generation);
                let store = self.clone();
                self.inner.tasks.spawn(async move {
                    let result = store.fetch_catalog().await;
                    store.dispatch(Msg::CatalogLoaded { generation, result });
                });
            }
            Effect::Search { generation, query } => {
                recipe_debug!("Search generation={} query={:?}", generation, query);
                let store = self.clone();
                self.inner.tasks.spawn(async move {
                    let result = store.inner.source.search(&query).await.map_err(|err| {
                        recipe_warn!("Search for {:?} failed: {}", query, err);
                        err.to_failure()
                    });
                    store.dispatch(Msg::SearchCompleted { generation, result });
                });
            }
            Effect::PersistLastSearch { query } => {
                recipe_trace!(
                    "Persisting last search in {:?} unless superseded",
                    self.inner.debouncer.window()
                );
                let preferences = self.inner.preferences.clone();
                self.inner.debouncer.schedule(async move {
                    preferences.write_last_search(&query);
                });
            }
            Effect::ToggleFavorite { id } => {
                let store = self.clone();
                self.inner.tasks.spawn(async move {
                    let result = store
                        .inner
                        .preferences
                        .toggle_favorite(&id)
                        .await
                        .map_err(|err| {
                            recipe_warn!("Toggling favorite {} failed: {}", id, err);
                            SourceFailure::new(err.to_string())
                        });
                    store.dispatch(Msg::FavoritesUpdated(result));
                });
            }
            Effect::PushLocation { selected } => {
                if let Some(navigator) = &self.inner.navigator {
                    navigator.push_selection(selected.as_deref());
                }
            }
        }
    }

    /// Catalog and favorites are requested together; either failing fails the load.
    async fn fetch_catalog(&self) -> Result<Catalog, SourceFailure> {
        let preferences = self.inner.preferences.clone();
        let (recipes, favorites) = tokio::join!(self.inner.source.list_all(), async move {
            preferences.read_favorites()
        });
        match recipes {
            Ok(recipes) => {
                recipe_info!(
                    "Loaded {} recipes, {} favorites",
                    recipes.len(),
                    favorites.len()
                );
                Ok(Catalog { recipes, favorites })
            }
            Err(err) => {
                recipe_warn!("Loading recipes failed: {}", err);
                Err(err.to_failure())
            }
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AppState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn collect_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}
