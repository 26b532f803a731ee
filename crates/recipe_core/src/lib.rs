//! Recipe core: data model, filtering, and the pure state machine behind the recipe browser.
mod effect;
mod error;
pub mod filter;
pub mod location;
mod msg;
mod recipe;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{SourceFailure, StoreError, StoreErrorKind};
pub use filter::{filter_recipes, matches_tags, matches_text, SearchCriteria};
pub use msg::{Catalog, Msg};
pub use recipe::{sanitize_recipes, Instruction, Recipe, RecipeId};
pub use state::{AppState, Generation};
pub use update::update;
pub use view_model::AppViewModel;
