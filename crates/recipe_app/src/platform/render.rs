use std::fmt::Write;

use recipe_core::{AppViewModel, Recipe};

/// Renders the view model as plain text: status line, list, then the open recipe.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    render_status(&mut out, view);
    render_list(&mut out, view);
    if let Some(recipe) = &view.detail {
        render_detail(&mut out, recipe, view.is_favorite(&recipe.id));
    } else if let Some(id) = &view.selected_recipe_id {
        let _ = writeln!(out, "\n{id} is hidden by the current filters.");
    }
    out
}

fn render_status(out: &mut String, view: &AppViewModel) {
    let mut flags = Vec::new();
    if view.loading {
        flags.push("loading");
    }
    if view.searching {
        flags.push("searching");
    }
    if view.favorite_in_flight {
        flags.push("saving favorite");
    }
    let _ = write!(
        out,
        "{} of {} recipes",
        view.filtered.len(),
        view.recipe_count
    );
    if !flags.is_empty() {
        let _ = write!(out, " [{}]", flags.join(", "));
    }
    out.push('\n');

    let criteria = &view.criteria;
    if !criteria.query.trim().is_empty() {
        let _ = writeln!(out, "search: {}", criteria.query.trim());
    }
    if !criteria.tags.is_empty() {
        let tags: Vec<&str> = criteria.tags.iter().map(String::as_str).collect();
        let _ = writeln!(out, "tags: {}", tags.join(" + "));
    }
    if !criteria.cuisines.is_empty() {
        let cuisines: Vec<&str> = criteria.cuisines.iter().map(String::as_str).collect();
        let _ = writeln!(out, "cuisines: {}", cuisines.join(" | "));
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }
}

fn render_list(out: &mut String, view: &AppViewModel) {
    if view.filtered.is_empty() && !view.loading {
        out.push_str("No recipes match.\n");
        return;
    }
    for recipe in &view.filtered {
        let selected = view.selected_recipe_id.as_deref() == Some(recipe.id.as_str());
        let _ = writeln!(
            out,
            "{}{} {} ({}, {} min){}",
            if selected { '>' } else { ' ' },
            if view.is_favorite(&recipe.id) { '*' } else { ' ' },
            recipe.title,
            recipe.cuisine,
            recipe.total_time(),
            rating_suffix(recipe),
        );
    }
}

fn render_detail(out: &mut String, recipe: &Recipe, favorite: bool) {
    let _ = writeln!(out, "\n== {} ==", recipe.title);
    if favorite {
        out.push_str("(favorite)\n");
    }
    if !recipe.description.is_empty() {
        let _ = writeln!(out, "{}", recipe.description);
    }
    let _ = writeln!(
        out,
        "prep {} min, cook {} min, serves {}",
        recipe.prep_time, recipe.cook_time, recipe.servings
    );
    if !recipe.tags.is_empty() {
        let _ = writeln!(out, "tags: {}", recipe.tags.join(", "));
    }
    if !recipe.ingredients.is_empty() {
        out.push_str("ingredients:\n");
        for ingredient in &recipe.ingredients {
            let _ = writeln!(out, "  - {ingredient}");
        }
    }
    if !recipe.instructions.is_empty() {
        out.push_str("steps:\n");
        for instruction in &recipe.instructions {
            let _ = writeln!(out, "  {}. {}", instruction.step, instruction.text);
        }
    }
}

fn rating_suffix(recipe: &Recipe) -> String {
    match recipe.rating {
        Some(rating) => format!(" {rating:.1}/5"),
        None => String::new(),
    }
}
