//! Drink evaluation: naming a drink against the recipe book and scoring it
//! against the active mission.
//!
//! Everything here is a pure function of its inputs so the front-end (and the
//! tests) can call it without an ECS world. The serving system in
//! `serving.rs` layers tip policy and secret discovery on top.

use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Scoring table
// ─────────────────────────────────────────────────────────────────────────────

pub const COCKTAIL_POINTS: u32 = 30;
pub const SIMILAR_COCKTAIL_POINTS: u32 = 35;
pub const COCKTAIL_VARIATION_POINTS: u32 = 40;
pub const FLAVOR_POINTS: u32 = 20;
pub const INGREDIENT_POINTS: u32 = 20;
pub const PREPARATION_POINTS: u32 = 25;
pub const GARNISH_POINTS: u32 = 15;
pub const NO_TYPE_POINTS: u32 = 25;
pub const EXACT_COUNT_POINTS: u32 = 20;
pub const MIXED_TYPES_POINTS_PER_TYPE: u32 = 10;
/// Primary-flavor components a mixed-types order needs.
pub const MIXED_TYPES_PRIMARY_MIN: usize = 2;

/// Multipliers and bonuses that come from `TavernConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    pub secret_bonus: u32,
    pub medium_multiplier_pct: u32,
    pub hard_multiplier_pct: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            secret_bonus: SECRET_BONUS,
            medium_multiplier_pct: MEDIUM_MULTIPLIER_PCT,
            hard_multiplier_pct: HARD_MULTIPLIER_PCT,
        }
    }
}

fn scaled(points: u32, pct: u32) -> u32 {
    points.saturating_mul(pct) / 100
}

// ─────────────────────────────────────────────────────────────────────────────
// Recipe matching
// ─────────────────────────────────────────────────────────────────────────────

fn sorted_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_unstable();
    names
}

/// Order-independent, count-exact comparison of the glass against a list of
/// ingredient names.
fn same_pours(drink: &Drink, expected: &[String]) -> bool {
    drink.ingredients().len() == expected.len()
        && sorted_names(drink.ingredients().iter().map(|i| i.name.as_str()))
            == sorted_names(expected.iter().map(String::as_str))
}

/// A recipe's garnish list only rules out garnishes it does not name; an
/// ungarnished drink always passes.
fn garnish_allowed(drink: &Drink, recipe: &Recipe) -> bool {
    match (&recipe.garnishes, &drink.garnish) {
        (None, _) | (_, None) => true,
        (Some(allowed), Some(garnish)) => allowed.iter().any(|g| *g == garnish.name),
    }
}

fn serving_allowed(drink: &Drink, recipe: &Recipe) -> bool {
    recipe.serving.is_none() || recipe.serving == drink.prep
}

/// True if the drink is exactly this recipe: same ingredient multiset, an
/// accepted garnish and the required preparation.
pub fn matches_recipe(drink: &Drink, recipe: &Recipe) -> bool {
    same_pours(drink, &recipe.ingredients)
        && garnish_allowed(drink, recipe)
        && serving_allowed(drink, recipe)
}

/// Like `matches_recipe`, but with one `original` pour swapped for `substitution`.
pub fn matches_variation(drink: &Drink, recipe: &Recipe, original: &str, substitution: &str) -> bool {
    let mut expected = recipe.ingredients.clone();
    let Some(slot) = expected.iter().position(|name| name == original) else {
        return false;
    };
    expected[slot] = substitution.to_string();
    same_pours(drink, &expected) && garnish_allowed(drink, recipe) && serving_allowed(drink, recipe)
}

/// First recipe in the book that the drink matches.
pub fn find_recipe<'a>(drink: &Drink, book: &'a RecipeBook) -> Option<&'a Recipe> {
    book.recipes.iter().find(|r| matches_recipe(drink, r))
}

// ─────────────────────────────────────────────────────────────────────────────
// Naming
// ─────────────────────────────────────────────────────────────────────────────

/// "Sweet", "Strong-Sour" or "Mixed" from the distinct ingredient flavors,
/// in pour order. `None` for an empty glass.
fn flavor_label(drink: &Drink) -> Option<String> {
    let mut flavors: Vec<FlavorType> = Vec::new();
    for ingredient in drink.ingredients() {
        if !flavors.contains(&ingredient.flavor) {
            flavors.push(ingredient.flavor);
        }
    }
    match flavors.as_slice() {
        [] => None,
        [one] => Some(one.name().to_string()),
        [a, b] => Some(format!("{}-{}", a.name(), b.name())),
        _ => Some("Mixed".to_string()),
    }
}

/// Descriptive name for a drink that is not in the book, e.g.
/// `"Shaken Strong-Sweet Firewater & Honey with Mint Leaf (Bitter)"`.
pub fn describe_drink(drink: &Drink) -> String {
    let mut pours: Vec<&str> = Vec::new();
    for ingredient in drink.ingredients() {
        if !pours.contains(&ingredient.name.as_str()) {
            pours.push(&ingredient.name);
        }
    }

    let mut parts: Vec<String> = Vec::new();
    if let Some(prep) = drink.prep {
        parts.push(prep.name().to_string());
    }
    match flavor_label(drink) {
        Some(label) => {
            parts.push(label);
            parts.push(pours.join(" & "));
        }
        None => parts.push("Empty Glass".to_string()),
    }

    let mut name = parts.join(" ");
    if let Some(garnish) = &drink.garnish {
        name.push_str(&format!(" with {} ({})", garnish.name, garnish.flavor.name()));
    }
    name
}

/// Name of the drink plus the recipe it matched, if any.
pub fn name_drink<'a>(drink: &Drink, book: &'a RecipeBook) -> (String, Option<&'a Recipe>) {
    match find_recipe(drink, book) {
        Some(recipe) => (recipe.name.clone(), Some(recipe)),
        None => (describe_drink(drink), None),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scoring
// ─────────────────────────────────────────────────────────────────────────────

/// Raw points the mission awards for this drink. Each mission kind is pass/fail.
pub fn mission_points(drink: &Drink, mission: &Mission, rules: &ScoringRules) -> u32 {
    let pass = |ok: bool, points: u32| if ok { points } else { 0 };

    match &mission.kind {
        MissionKind::Cocktail { target } => pass(matches_recipe(drink, target), COCKTAIL_POINTS),
        MissionKind::SimilarCocktail { target, similar } => pass(
            matches_recipe(drink, target) || matches_recipe(drink, similar),
            scaled(SIMILAR_COCKTAIL_POINTS, rules.medium_multiplier_pct),
        ),
        MissionKind::CocktailVariation {
            target,
            original,
            substitution,
        } => pass(
            matches_variation(drink, target, original, substitution),
            scaled(COCKTAIL_VARIATION_POINTS, rules.hard_multiplier_pct),
        ),
        MissionKind::Flavor { flavor, required } => pass(
            drink.flavor_count(*flavor) >= usize::from(*required),
            FLAVOR_POINTS,
        ),
        MissionKind::Ingredient { ingredient } => pass(
            drink.ingredients().iter().any(|i| i.name == ingredient.name),
            INGREDIENT_POINTS,
        ),
        MissionKind::Preparation { method } => pass(drink.prep == Some(*method), PREPARATION_POINTS),
        MissionKind::GarnishOnly { garnish } => pass(
            drink.garnish.as_ref().is_some_and(|g| g.name == *garnish),
            GARNISH_POINTS,
        ),
        MissionKind::NoType { forbidden } => {
            let pours_ok = drink.ingredients().iter().all(|i| !forbidden.contains(&i.flavor));
            let garnish_ok = drink.garnish.as_ref().map_or(true, |g| !forbidden.contains(&g.flavor));
            pass(pours_ok && garnish_ok, NO_TYPE_POINTS)
        }
        MissionKind::ExactCount { count } => {
            pass(drink.component_count() == usize::from(*count), EXACT_COUNT_POINTS)
        }
        MissionKind::MixedTypes { flavors } => {
            let primary_ok = flavors
                .first()
                .is_some_and(|primary| drink.flavor_count(*primary) >= MIXED_TYPES_PRIMARY_MIN);
            let per_type = u32::try_from(flavors.len()).unwrap_or(u32::MAX);
            pass(primary_ok, MIXED_TYPES_POINTS_PER_TYPE.saturating_mul(per_type))
        }
    }
}

/// Names the drink, scores it against the mission (if any) and adds the
/// secret bonus when a secret recipe was served.
///
/// A missing mission scores 0 but the drink is still named. The consolation
/// tip for a known recipe that missed the order is caller policy; see
/// `serving::tip_for`.
pub fn evaluate(
    drink: &Drink,
    mission: Option<&Mission>,
    book: &RecipeBook,
    rules: &ScoringRules,
) -> Evaluation {
    let (drink_name, recipe) = name_drink(drink, book);
    let is_known_recipe = recipe.is_some();
    let is_secret = recipe.is_some_and(Recipe::is_secret);

    let mut points = mission.map_or(0, |m| mission_points(drink, m, rules));
    if is_secret {
        points = points.saturating_add(rules.secret_bonus);
    }

    Evaluation {
        points,
        drink_name,
        is_known_recipe,
        is_secret,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{standard_recipe_book, standard_vocabulary};

    fn pour(names: &[&str]) -> Drink {
        let vocab = standard_vocabulary();
        let ingredients = names
            .iter()
            .map(|n| vocab.ingredient(n).cloned().unwrap())
            .collect();
        Drink::from_parts(ingredients, None, None).unwrap()
    }

    fn garnish(name: &str) -> Garnish {
        standard_vocabulary().garnish(name).cloned().unwrap()
    }

    fn mission(kind: MissionKind) -> Mission {
        Mission {
            kind,
            text: String::new(),
            tags: Vec::new(),
        }
    }

    fn plain_recipe(name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            name: name.into(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            garnishes: None,
            serving: None,
            tags: Vec::new(),
            description: String::new(),
        }
    }

    fn rules() -> ScoringRules {
        ScoringRules::default()
    }

    // ── Naming ──────────────────────────────────────────────────────────────

    #[test]
    fn test_naming_is_order_independent() {
        let book = RecipeBook {
            recipes: vec![plain_recipe("Twin Flame", &["Firewater", "Berry"])],
        };
        for drink in [pour(&["Firewater", "Berry"]), pour(&["Berry", "Firewater"])] {
            let eval = evaluate(&drink, None, &book, &rules());
            assert_eq!(eval.drink_name, "Twin Flame");
            assert!(eval.is_known_recipe);
            assert!(!eval.is_secret);
        }
    }

    #[test]
    fn test_naming_requires_exact_counts() {
        let book = RecipeBook {
            recipes: vec![plain_recipe("Twin Flame", &["Firewater", "Berry"])],
        };
        let eval = evaluate(&pour(&["Firewater", "Firewater", "Berry"]), None, &book, &rules());
        assert!(!eval.is_known_recipe);
        assert_ne!(eval.drink_name, "Twin Flame");
    }

    #[test]
    fn test_garnish_constraint() {
        let book = standard_recipe_book();
        let bramble = book.get("Bramble Kiss").unwrap();
        let base = pour(&["Berry", "Honey"]).with_prep(PrepMethod::Shaken);

        assert!(matches_recipe(&base, bramble), "no garnish always passes");
        assert!(matches_recipe(&base.clone().with_garnish(garnish("Sugar Rim")), bramble));
        assert!(!matches_recipe(&base.with_garnish(garnish("Chili Flake")), bramble));
    }

    #[test]
    fn test_unknown_ingredient_falls_through_to_description() {
        let book = standard_recipe_book();
        let drink = Drink::from_parts(
            vec![
                Ingredient::new("Goblin Spit", FlavorType::Bitter),
                Ingredient::new("Honey", FlavorType::Sweet),
            ],
            None,
            Some(PrepMethod::Shaken),
        )
        .unwrap();
        let eval = evaluate(&drink, None, &book, &rules());
        assert!(!eval.is_known_recipe);
        assert_eq!(eval.drink_name, "Shaken Bitter-Sweet Goblin Spit & Honey");
    }

    #[test]
    fn test_describe_drink_variants() {
        assert_eq!(describe_drink(&pour(&["Honey", "Honey"])), "Sweet Honey");
        assert_eq!(
            describe_drink(&pour(&["Berry", "Herbal", "Honey"]).with_prep(PrepMethod::Poured)),
            "Poured Mixed Berry & Herbal & Honey"
        );
        assert_eq!(
            describe_drink(&pour(&["Firewater"]).with_garnish(garnish("Mint Leaf"))),
            "Strong Firewater with Mint Leaf (Bitter)"
        );
        assert_eq!(describe_drink(&Drink::new()), "Empty Glass");
    }

    // ── Mission scoring ─────────────────────────────────────────────────────

    #[test]
    fn test_cocktail_mission_scoring() {
        let book = standard_recipe_book();
        let target = book.get("Witch's Brew").cloned().unwrap();
        let order = mission(MissionKind::Cocktail { target });

        let right = pour(&["Herbal", "Berry", "Herbal"]).with_prep(PrepMethod::Stirred);
        assert_eq!(evaluate(&right, Some(&order), &book, &rules()).points, COCKTAIL_POINTS);

        let wrong = pour(&["Herbal", "Berry", "Honey"]).with_prep(PrepMethod::Stirred);
        assert_eq!(evaluate(&wrong, Some(&order), &book, &rules()).points, 0);
    }

    #[test]
    fn test_similar_cocktail_accepts_either_recipe() {
        let book = standard_recipe_book();
        let order = mission(MissionKind::SimilarCocktail {
            target: book.get("Hero's Toast").cloned().unwrap(),
            similar: book.get("Smith's Quench").cloned().unwrap(),
        });
        let expected = SIMILAR_COCKTAIL_POINTS * MEDIUM_MULTIPLIER_PCT / 100;

        let toast = pour(&["Firewater", "Honey"]).with_prep(PrepMethod::Shaken);
        let quench = pour(&["Herbal", "Firewater"]).with_prep(PrepMethod::Poured);
        let neither = pour(&["Berry", "Firewater"]).with_prep(PrepMethod::Poured);
        assert_eq!(mission_points(&toast, &order, &rules()), expected);
        assert_eq!(mission_points(&quench, &order, &rules()), expected);
        assert_eq!(mission_points(&neither, &order, &rules()), 0);
    }

    #[test]
    fn test_cocktail_variation_swaps_one_pour() {
        let book = standard_recipe_book();
        let order = mission(MissionKind::CocktailVariation {
            target: book.get("Dragon's Breath").cloned().unwrap(),
            original: "Firewater".into(),
            substitution: "Honey".into(),
        });
        let expected = COCKTAIL_VARIATION_POINTS * HARD_MULTIPLIER_PCT / 100;

        let swapped = pour(&["Honey", "Firewater", "Herbal"]).with_prep(PrepMethod::Stirred);
        assert_eq!(mission_points(&swapped, &order, &rules()), expected);

        let both_swapped = pour(&["Honey", "Honey", "Herbal"]).with_prep(PrepMethod::Stirred);
        assert_eq!(mission_points(&both_swapped, &order, &rules()), 0);

        let unswapped = pour(&["Firewater", "Firewater", "Herbal"]).with_prep(PrepMethod::Stirred);
        assert_eq!(mission_points(&unswapped, &order, &rules()), 0);

        let wrong_serving = pour(&["Honey", "Firewater", "Herbal"]).with_prep(PrepMethod::Shaken);
        assert_eq!(mission_points(&wrong_serving, &order, &rules()), 0);
    }

    #[test]
    fn test_flavor_mission_boundary() {
        let order = mission(MissionKind::Flavor {
            flavor: FlavorType::Sour,
            required: 2,
        });
        assert_eq!(mission_points(&pour(&["Berry", "Berry"]), &order, &rules()), FLAVOR_POINTS);
        assert_eq!(mission_points(&pour(&["Berry", "Honey"]), &order, &rules()), 0);
        let with_twist = pour(&["Berry", "Honey"]).with_garnish(garnish("Lemon Twist"));
        assert_eq!(mission_points(&with_twist, &order, &rules()), FLAVOR_POINTS);
    }

    #[test]
    fn test_ingredient_preparation_and_garnish_missions() {
        let vocab = standard_vocabulary();
        let wants_honey = mission(MissionKind::Ingredient {
            ingredient: vocab.ingredient("Honey").cloned().unwrap(),
        });
        assert_eq!(mission_points(&pour(&["Berry", "Honey"]), &wants_honey, &rules()), INGREDIENT_POINTS);
        assert_eq!(mission_points(&pour(&["Berry"]), &wants_honey, &rules()), 0);

        let shaken = mission(MissionKind::Preparation {
            method: PrepMethod::Shaken,
        });
        assert_eq!(
            mission_points(&pour(&["Berry"]).with_prep(PrepMethod::Shaken), &shaken, &rules()),
            PREPARATION_POINTS
        );
        assert_eq!(mission_points(&pour(&["Berry"]), &shaken, &rules()), 0);

        let minty = mission(MissionKind::GarnishOnly {
            garnish: "Mint Leaf".into(),
        });
        assert_eq!(
            mission_points(&pour(&["Berry"]).with_garnish(garnish("Mint Leaf")), &minty, &rules()),
            GARNISH_POINTS
        );
        assert_eq!(
            mission_points(&pour(&["Berry"]).with_garnish(garnish("Sugar Rim")), &minty, &rules()),
            0
        );
    }

    #[test]
    fn test_no_type_checks_garnish_too() {
        let order = mission(MissionKind::NoType {
            forbidden: vec![FlavorType::Sweet],
        });
        assert_eq!(mission_points(&pour(&["Berry", "Herbal"]), &order, &rules()), NO_TYPE_POINTS);
        assert_eq!(mission_points(&pour(&["Berry", "Honey"]), &order, &rules()), 0);
        let sugared = pour(&["Berry"]).with_garnish(garnish("Sugar Rim"));
        assert_eq!(mission_points(&sugared, &order, &rules()), 0);
    }

    #[test]
    fn test_exact_count_includes_garnish() {
        let order = mission(MissionKind::ExactCount { count: 3 });
        let two_and_garnish = pour(&["Berry", "Honey"]).with_garnish(garnish("Mint Leaf"));
        assert_eq!(mission_points(&two_and_garnish, &order, &rules()), EXACT_COUNT_POINTS);
        let three_and_garnish = pour(&["Berry", "Honey", "Honey"]).with_garnish(garnish("Mint Leaf"));
        assert_eq!(mission_points(&three_and_garnish, &order, &rules()), 0);
    }

    #[test]
    fn test_mixed_types_scales_with_type_count() {
        let order = mission(MissionKind::MixedTypes {
            flavors: vec![FlavorType::Strong, FlavorType::Sour, FlavorType::Sweet],
        });
        let strong = pour(&["Firewater", "Firewater", "Berry"]);
        assert_eq!(mission_points(&strong, &order, &rules()), 30);
        let chili = pour(&["Firewater", "Berry"]).with_garnish(garnish("Chili Flake"));
        assert_eq!(mission_points(&chili, &order, &rules()), 30);
        assert_eq!(mission_points(&pour(&["Firewater", "Berry"]), &order, &rules()), 0);
    }

    // ── Secrets and edge cases ──────────────────────────────────────────────

    #[test]
    fn test_secret_bonus_with_and_without_mission() {
        let book = standard_recipe_book();
        let phoenix = pour(&["Firewater", "Firewater", "Firewater", "Firewater"])
            .with_prep(PrepMethod::Shaken);

        let eval = evaluate(&phoenix, None, &book, &rules());
        assert!(eval.is_secret);
        assert!(eval.is_known_recipe);
        assert_eq!(eval.drink_name, "Phoenix Tears");
        assert_eq!(eval.points, SECRET_BONUS);

        let strong_order = mission(MissionKind::Flavor {
            flavor: FlavorType::Strong,
            required: 3,
        });
        let eval = evaluate(&phoenix, Some(&strong_order), &book, &rules());
        assert_eq!(eval.points, FLAVOR_POINTS + SECRET_BONUS);
    }

    #[test]
    fn test_empty_glass_is_legal() {
        let book = standard_recipe_book();
        let order = mission(MissionKind::ExactCount { count: 1 });
        let eval = evaluate(&Drink::new(), Some(&order), &book, &rules());
        assert_eq!(eval.points, 0);
        assert!(!eval.is_known_recipe);
        assert_eq!(eval.drink_name, "Empty Glass");
    }

    #[test]
    fn test_heros_toast_end_to_end() {
        let book = standard_recipe_book();
        let order = mission(MissionKind::Cocktail {
            target: book.get("Hero's Toast").cloned().unwrap(),
        });

        let shaken = pour(&["Firewater", "Honey"]).with_prep(PrepMethod::Shaken);
        let eval = evaluate(&shaken, Some(&order), &book, &rules());
        assert_eq!(
            eval,
            Evaluation {
                points: 30,
                drink_name: "Hero's Toast".into(),
                is_known_recipe: true,
                is_secret: false,
            }
        );

        let stirred = pour(&["Firewater", "Honey"]).with_prep(PrepMethod::Stirred);
        let eval = evaluate(&stirred, Some(&order), &book, &rules());
        assert_eq!(eval.points, 0);
        assert!(!eval.is_known_recipe);
        assert_eq!(eval.drink_name, "Stirred Strong-Sweet Firewater & Honey");
    }
}
