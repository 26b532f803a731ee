use crate::{Generation, RecipeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the full catalog and the persisted favorites together.
    LoadCatalog { generation: Generation },
    /// Fetch the base list for `query`; an empty query means the full catalog.
    Search { generation: Generation, query: String },
    /// Persist the search text once typing settles.
    PersistLastSearch { query: String },
    ToggleFavorite { id: RecipeId },
    /// Reflect the selection into navigable location state.
    PushLocation { selected: Option<RecipeId> },
}
