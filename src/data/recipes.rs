use crate::shared::*;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Populate the RecipeBook with 12 house cocktails and 3 secret recipes.
///
/// Drink naming takes the first recipe that matches, so list order breaks ties.
///
/// `garnishes: None` = any garnish accepted, `serving: None` = any method.
pub fn populate_recipes(book: &mut RecipeBook) {
    let recipes: Vec<Recipe> = vec![
        // ═══════════════════════════════════════════════════════════════
        // HOUSE COCKTAILS
        // ═══════════════════════════════════════════════════════════════

        // ── Two-pour classics ────────────────────────────────────────

        Recipe {
            name: "Hero's Toast".into(),
            ingredients: names(&["Firewater", "Honey"]),
            garnishes: None,
            serving: Some(PrepMethod::Shaken),
            tags: names(&["Strong", "Sweet", "Classic"]),
            description: "Raised after every returned quest. Burns, then soothes.".into(),
        },

        Recipe {
            name: "Smith's Quench".into(),
            ingredients: names(&["Firewater", "Herbal"]),
            garnishes: None,
            serving: None,
            tags: names(&["Strong", "Herbal"]),
            description: "What the forge crew drinks. Nobody checks how it's made.".into(),
        },

        Recipe {
            name: "Bramble Kiss".into(),
            ingredients: names(&["Berry", "Honey"]),
            garnishes: Some(names(&["Sugar Rim", "Lemon Twist"])),
            serving: Some(PrepMethod::Shaken),
            tags: names(&["Sour", "Sweet"]),
            description: "Tart berries rounded off with honey.".into(),
        },

        Recipe {
            name: "Ranger's Flask".into(),
            ingredients: names(&["Firewater", "Berry"]),
            garnishes: None,
            serving: Some(PrepMethod::Poured),
            tags: names(&["Strong", "Sour"]),
            description: "Poured straight into a hip flask for the long road.".into(),
        },

        Recipe {
            name: "Plain Honeywater".into(),
            ingredients: names(&["Honey"]),
            garnishes: None,
            serving: Some(PrepMethod::Poured),
            tags: names(&["Sweet"]),
            description: "For children, invalids and wizards on duty.".into(),
        },

        // ── Three-pour house specials ────────────────────────────────

        Recipe {
            name: "Dragon's Breath".into(),
            ingredients: names(&["Firewater", "Firewater", "Herbal"]),
            garnishes: Some(names(&["Chili Flake"])),
            serving: Some(PrepMethod::Stirred),
            tags: names(&["Strong", "Herbal"]),
            description: "Double firewater and a bitter chaser. Stand back.".into(),
        },

        Recipe {
            name: "Meadow Mead".into(),
            ingredients: names(&["Honey", "Honey", "Herbal"]),
            garnishes: Some(names(&["Mint Leaf"])),
            serving: Some(PrepMethod::Poured),
            tags: names(&["Sweet", "Herbal"]),
            description: "Summer in a mug.".into(),
        },

        Recipe {
            name: "Witch's Brew".into(),
            ingredients: names(&["Herbal", "Herbal", "Berry"]),
            garnishes: None,
            serving: Some(PrepMethod::Stirred),
            tags: names(&["Herbal", "Sour"]),
            description: "Stirred widdershins, if you know what's good for you.".into(),
        },

        Recipe {
            name: "Bard's Ballad".into(),
            ingredients: names(&["Berry", "Berry", "Honey"]),
            garnishes: Some(names(&["Lemon Twist"])),
            serving: Some(PrepMethod::Shaken),
            tags: names(&["Sour", "Sweet"]),
            description: "Loosens the voice. Tighten your purse strings.".into(),
        },

        Recipe {
            name: "Sour Sergeant".into(),
            ingredients: names(&["Berry", "Berry", "Firewater"]),
            garnishes: None,
            serving: Some(PrepMethod::Stirred),
            tags: names(&["Sour", "Strong"]),
            description: "Barks at you on the way down.".into(),
        },

        Recipe {
            name: "Moonwell Tonic".into(),
            ingredients: names(&["Herbal", "Honey", "Berry"]),
            garnishes: Some(names(&["Mint Leaf"])),
            serving: Some(PrepMethod::Stirred),
            tags: names(&["Herbal", "Classic"]),
            description: "Brewed by the light of a full moon, allegedly.".into(),
        },

        // ── Four-pour ────────────────────────────────────────────────

        Recipe {
            name: "Golden Goblet".into(),
            ingredients: names(&["Honey", "Honey", "Firewater", "Berry"]),
            garnishes: Some(names(&["Sugar Rim"])),
            serving: Some(PrepMethod::Shaken),
            tags: names(&["Sweet", "Classic"]),
            description: "Served to nobles in the good cups.".into(),
        },

        // ═══════════════════════════════════════════════════════════════
        // SECRET RECIPES (never listed or ordered; found by accident)
        // ═══════════════════════════════════════════════════════════════

        Recipe {
            name: "Phoenix Tears".into(),
            ingredients: names(&["Firewater", "Firewater", "Firewater", "Firewater"]),
            garnishes: Some(names(&["Chili Flake"])),
            serving: Some(PrepMethod::Shaken),
            tags: names(&[SECRET_TAG, "Strong"]),
            description: "Four measures of fire. Legend says the drinker is reborn.".into(),
        },

        Recipe {
            name: "Elixir of the Old King".into(),
            ingredients: names(&["Firewater", "Berry", "Herbal", "Honey"]),
            garnishes: Some(names(&["Mint Leaf"])),
            serving: Some(PrepMethod::Stirred),
            tags: names(&[SECRET_TAG, "Classic"]),
            description: "One of every bottle, the way the old king took it.".into(),
        },

        Recipe {
            name: "Goblin Gut-Punch".into(),
            ingredients: names(&["Herbal", "Herbal", "Herbal"]),
            garnishes: None,
            serving: Some(PrepMethod::Poured),
            tags: names(&[SECRET_TAG, "Herbal"]),
            description: "Goblins swear by it. Everyone else swears at it.".into(),
        },
    ];

    book.recipes = recipes;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::populate_vocabulary;
    use std::collections::HashSet;

    fn book() -> RecipeBook {
        let mut book = RecipeBook::default();
        populate_recipes(&mut book);
        book
    }

    #[test]
    fn test_recipe_names_are_unique() {
        let book = book();
        let unique: HashSet<&str> = book.recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(unique.len(), book.recipes.len());
    }

    #[test]
    fn test_recipes_only_use_shelf_items() {
        let mut vocab = Vocabulary::default();
        populate_vocabulary(&mut vocab);
        for recipe in &book().recipes {
            assert!(
                !recipe.ingredients.is_empty() && recipe.ingredients.len() <= MAX_DRINK_INGREDIENTS,
                "{} has {} ingredients",
                recipe.name,
                recipe.ingredients.len()
            );
            for name in &recipe.ingredients {
                assert!(vocab.ingredient(name).is_some(), "{}: unknown ingredient {}", recipe.name, name);
            }
            for name in recipe.garnishes.iter().flatten() {
                assert!(vocab.garnish(name).is_some(), "{}: unknown garnish {}", recipe.name, name);
            }
        }
    }

    #[test]
    fn test_secret_recipes_excluded_from_mission_pool() {
        let book = book();
        let pool = book.mission_pool();
        assert_eq!(pool.len(), 12);
        assert!(pool.iter().all(|r| !r.is_secret()));
        assert_eq!(book.recipes.iter().filter(|r| r.is_secret()).count(), 3);
    }

    #[test]
    fn test_visible_listing_reveals_discovered_secrets() {
        let book = book();
        let mut discovered = DiscoveredSecrets::default();
        let listing = book.visible(&discovered);
        assert_eq!(listing.len(), 12);
        assert_eq!(listing[0].name, "Bard's Ballad");

        discovered.record("Phoenix Tears");
        let listing = book.visible(&discovered);
        assert_eq!(listing.len(), 13);
        assert!(listing.iter().any(|r| r.name == "Phoenix Tears"));
        assert!(!listing.iter().any(|r| r.name == "Goblin Gut-Punch"));
    }

    #[test]
    fn test_filter_by_tags() {
        let book = book();
        let listing = book.visible(&DiscoveredSecrets::default());
        let herbal = book.filter_by_tags(listing.clone(), &["herbal"]);
        assert!(herbal.iter().all(|r| r.has_tag("Herbal")));
        assert_eq!(herbal.len(), 5);
        assert_eq!(book.filter_by_tags(listing.clone(), &[]).len(), listing.len());
    }
}
