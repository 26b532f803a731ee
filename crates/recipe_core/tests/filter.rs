use std::collections::BTreeSet;

use recipe_core::{filter_recipes, matches_tags, matches_text, Recipe, SearchCriteria};

fn recipe(id: &str, title: &str, cuisine: &str, tags: &[&str], ingredients: &[&str]) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("A plate of {}", title.to_lowercase()),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        instructions: Vec::new(),
        prep_time: 10,
        cook_time: 20,
        servings: 2,
        cuisine: cuisine.to_string(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        image: String::new(),
        rating: None,
    }
}

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn catalog() -> Vec<Recipe> {
    vec![
        recipe(
            "spaghetti-bolognese",
            "Spaghetti Bolognese",
            "Italian",
            &["Italian", "pasta"],
            &["400g spaghetti", "500g beef mince"],
        ),
        recipe(
            "miso-ramen",
            "Simple Miso Ramen",
            "Japanese",
            &["Japanese", "quick"],
            &["2 portions ramen noodles", "3 tbsp miso paste"],
        ),
        recipe(
            "veggie-tacos",
            "Veggie Tacos",
            "Mexican",
            &["vegan", "quick"],
            &["8 corn tortillas", "1 can black beans"],
        ),
        recipe(
            "chana-masala",
            "Chana Masala",
            "Indian",
            &["vegan"],
            &["2 cans chickpeas", "1 tsp garam masala"],
        ),
    ]
}

fn ids(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn blank_query_matches_everything() {
    let r = &catalog()[0];
    assert!(matches_text(r, ""));
    assert!(matches_text(r, "   \t "));
}

#[test]
fn text_matches_title_description_and_ingredients_case_insensitively() {
    let r = &catalog()[1];
    assert!(matches_text(r, "RAMEN"));
    assert!(matches_text(r, "  plate of simple "));
    assert!(matches_text(r, "Miso Paste"));
    assert!(!matches_text(r, "tortilla"));
}

#[test]
fn text_match_is_plain_substring_without_tokenizing() {
    let r = &catalog()[0];
    assert!(matches_text(r, "ghetti bolo"));
    assert!(!matches_text(r, "bolognese spaghetti"));
}

#[test]
fn tags_are_anded() {
    let tacos = &catalog()[2];
    let masala = &catalog()[3];
    let wanted = set(&["vegan", "QUICK"]);
    assert!(matches_tags(tacos, &wanted, &BTreeSet::new()));
    assert!(!matches_tags(masala, &wanted, &BTreeSet::new()));
}

#[test]
fn cuisines_are_ored_and_anded_with_tags() {
    let all = catalog();
    let cuisines = set(&["italian", "Mexican"]);
    let matching: Vec<_> = all
        .iter()
        .filter(|r| matches_tags(r, &BTreeSet::new(), &cuisines))
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(matching, vec!["spaghetti-bolognese", "veggie-tacos"]);

    let quick_only = set(&["quick"]);
    assert!(matches_tags(&all[2], &quick_only, &cuisines));
    assert!(!matches_tags(&all[1], &quick_only, &cuisines));
}

#[test]
fn empty_constraints_are_vacuously_true() {
    for r in catalog() {
        assert!(matches_tags(&r, &BTreeSet::new(), &BTreeSet::new()));
        assert!(matches_tags(&r, &set(&["  "]), &set(&[""])));
    }
}

#[test]
fn unconstrained_criteria_keep_every_recipe() {
    let criteria = SearchCriteria {
        query: "   ".to_string(),
        ..SearchCriteria::default()
    };
    assert!(criteria.is_unconstrained());
    assert_eq!(filter_recipes(&catalog(), &criteria), catalog());

    let tagged = SearchCriteria {
        tags: set(&["Quick"]),
        ..SearchCriteria::default()
    };
    assert!(!tagged.is_unconstrained());
}

#[test]
fn filter_preserves_relative_order_and_leaves_input_untouched() {
    let all = catalog();
    let before = all.clone();
    let criteria = SearchCriteria {
        tags: set(&["quick"]),
        ..SearchCriteria::default()
    };

    let filtered = filter_recipes(&all, &criteria);
    assert_eq!(ids(&filtered), vec!["miso-ramen", "veggie-tacos"]);
    assert_eq!(all, before);

    let reversed: Vec<Recipe> = all.iter().rev().cloned().collect();
    assert_eq!(
        ids(&filter_recipes(&reversed, &criteria)),
        vec!["veggie-tacos", "miso-ramen"]
    );
}

#[test]
fn filter_combines_text_and_tag_constraints() {
    let criteria = SearchCriteria {
        query: "can".to_string(),
        tags: set(&["vegan"]),
        cuisines: set(&["indian"]),
    };
    assert_eq!(ids(&filter_recipes(&catalog(), &criteria)), vec!["chana-masala"]);
}

#[test]
fn empty_input_gives_empty_output() {
    let criteria = SearchCriteria {
        query: "anything".to_string(),
        ..SearchCriteria::default()
    };
    assert!(filter_recipes(&[], &criteria).is_empty());
    assert!(filter_recipes(&[], &SearchCriteria::default()).is_empty());
}
