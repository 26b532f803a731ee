use std::sync::{Mutex, PoisonError};

use recipe_core::location::{selection_from_url, url_with_selection};
use recipe_core::RecipeId;
use url::Url;

/// Navigable location state that mirrors the selected recipe.
pub trait Navigator: Send + Sync {
    /// Selection encoded in the current location, read once at start-up.
    fn current_selection(&self) -> Option<RecipeId>;

    /// Records a new history entry for `selected` (`None` clears it).
    fn push_selection(&self, selected: Option<&str>);
}

#[derive(Debug)]
struct HistoryInner {
    entries: Vec<Url>,
    index: usize,
}

/// In-memory model of browser history: pushes truncate forward entries,
/// back/forward move through them.
#[derive(Debug)]
pub struct UrlHistory {
    inner: Mutex<HistoryInner>,
}

impl UrlHistory {
    pub fn new(start: Url) -> Self {
        Self {
            inner: Mutex::new(HistoryInner {
                entries: vec![start],
                index: 0,
            }),
        }
    }

    pub fn current(&self) -> Url {
        let inner = self.lock();
        inner.entries[inner.index].clone()
    }

    pub fn entry_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Moves one entry back; `None` at the start of history.
    pub fn back(&self) -> Option<Url> {
        let mut inner = self.lock();
        if inner.index == 0 {
            return None;
        }
        inner.index -= 1;
        Some(inner.entries[inner.index].clone())
    }

    /// Moves one entry forward; `None` at the end of history.
    pub fn forward(&self) -> Option<Url> {
        let mut inner = self.lock();
        if inner.index + 1 >= inner.entries.len() {
            return None;
        }
        inner.index += 1;
        Some(inner.entries[inner.index].clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HistoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for UrlHistory {
    fn current_selection(&self) -> Option<RecipeId> {
        selection_from_url(&self.current())
    }

    fn push_selection(&self, selected: Option<&str>) {
        let mut inner = self.lock();
        let next = url_with_selection(&inner.entries[inner.index], selected);
        let keep = inner.index + 1;
        inner.entries.truncate(keep);
        inner.entries.push(next);
        inner.index = keep;
    }
}
