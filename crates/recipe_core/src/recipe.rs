use serde::{Deserialize, Serialize};

pub type RecipeId = String;

/// One ordered cooking step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub step: u32,
    pub text: String,
}

/// Immutable catalog entry. Identity is `id`; updates replace the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub cuisine: String,
    /// Display order is preserved; matching ignores order and case.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time + self.cook_time
    }

    /// Recipes with an empty id cannot be selected or favorited.
    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = crate::filter::normalize(tag);
        self.tags.iter().any(|t| crate::filter::normalize(t) == wanted)
    }
}

/// Drops entries that violate the non-empty id invariant and clamps ratings into `[0, 5]`.
pub fn sanitize_recipes(recipes: Vec<Recipe>) -> Vec<Recipe> {
    recipes
        .into_iter()
        .filter(Recipe::has_valid_id)
        .map(|mut recipe| {
            recipe.rating = recipe.rating.map(|r| r.clamp(0.0, 5.0));
            recipe
        })
        .collect()
}
