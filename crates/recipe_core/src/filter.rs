//! Pure filtering of recipes by free text, tags and cuisines.
use std::collections::BTreeSet;

use crate::Recipe;

/// Text and tag/cuisine constraints. The default matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    pub query: String,
    pub tags: BTreeSet<String>,
    pub cuisines: BTreeSet<String>,
}

impl SearchCriteria {
    /// True when the criteria cannot exclude any recipe.
    pub fn is_unconstrained(&self) -> bool {
        self.query.trim().is_empty() && self.tags.is_empty() && self.cuisines.is_empty()
    }
}

pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// True when `query` is blank, or is a case-insensitive substring of the title,
/// the description, or any ingredient line.
pub fn matches_text(recipe: &Recipe, query: &str) -> bool {
    let needle = normalize(query);
    if needle.is_empty() {
        return true;
    }
    recipe.title.to_lowercase().contains(&needle)
        || recipe.description.to_lowercase().contains(&needle)
        || recipe
            .ingredients
            .iter()
            .any(|line| line.to_lowercase().contains(&needle))
}

/// Tags are ANDed, cuisines are ORed, and the two constraints are ANDed together.
/// Blank entries in either set are ignored.
pub fn matches_tags(recipe: &Recipe, tags: &BTreeSet<String>, cuisines: &BTreeSet<String>) -> bool {
    let has_tags = tags
        .iter()
        .filter(|t| !t.trim().is_empty())
        .all(|t| recipe.has_tag(t));
    if !has_tags {
        return false;
    }

    let mut wanted_cuisines = cuisines
        .iter()
        .map(|c| normalize(c))
        .filter(|c| !c.is_empty())
        .peekable();
    if wanted_cuisines.peek().is_none() {
        return true;
    }
    let cuisine = normalize(&recipe.cuisine);
    wanted_cuisines.any(|c| c == cuisine)
}

pub fn matches(recipe: &Recipe, criteria: &SearchCriteria) -> bool {
    matches_text(recipe, &criteria.query)
        && matches_tags(recipe, &criteria.tags, &criteria.cuisines)
}

/// Returns the matching recipes in their original relative order. The input is not modified.
pub fn filter_recipes(recipes: &[Recipe], criteria: &SearchCriteria) -> Vec<Recipe> {
    if criteria.is_unconstrained() {
        return recipes.to_vec();
    }
    recipes
        .iter()
        .filter(|recipe| matches(recipe, criteria))
        .cloned()
        .collect()
}

/// Distinct values across `values`, deduplicated case-insensitively and sorted for display.
/// The first spelling seen wins.
pub(crate) fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(normalize(trimmed)) {
            out.push(trimmed.to_string());
        }
    }
    out.sort_by_key(|v| normalize(v));
    out
}
