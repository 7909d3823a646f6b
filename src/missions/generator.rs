//! Mission generator.
//!
//! Draws a mission type from the weighted table, fills in its targets from the
//! vocabulary and recipe book, and phrases it. A draw whose text repeats the
//! previous order is thrown away; after `retry_budget` draws the generator gives
//! up on variety and posts a plain cocktail order.

use std::collections::BTreeSet;

use bevy::prelude::*;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::*;
use super::phrases;

/// Distinct-ingredient difference allowed between the two recipes of a
/// similar-cocktail order.
pub const SIMILAR_MAX_DIFFERENCE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MissionError {
    #[error("no mission type can be drawn from the current recipe book and weights")]
    NoMissionAvailable,

    #[error("invalid mission weights: {0}")]
    InvalidWeights(String),
}

/// A generated mission plus how it came about.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMission {
    pub mission: Mission,
    /// Draws made, including the successful one.
    pub attempts: u32,
    /// True if the retry budget ran out and the plain cocktail order was used.
    pub fallback: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn cocktail_tags(recipe: &Recipe, extra: &[&str]) -> Vec<String> {
    let mut tags: Vec<String> = std::iter::once("cocktail")
        .chain(extra.iter().copied())
        .map(str::to_string)
        .collect();
    tags.extend(recipe.tags.iter().map(|t| t.to_lowercase()));
    tags
}

/// Number of distinct ingredient names found in one recipe but not the other.
pub fn ingredient_difference(a: &Recipe, b: &Recipe) -> usize {
    let a: BTreeSet<&str> = a.ingredients.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = b.ingredients.iter().map(String::as_str).collect();
    a.symmetric_difference(&b).count()
}

/// Random subset of `min..=max` distinct flavors.
fn pick_flavors(rng: &mut impl Rng, min: usize, max: usize) -> Vec<FlavorType> {
    let mut flavors = FlavorType::ALL.to_vec();
    flavors.shuffle(rng);
    flavors.truncate(rng.gen_range(min..=max));
    flavors
}

fn cocktail_mission(rng: &mut impl Rng, recipe: &Recipe) -> Mission {
    Mission {
        text: phrases::cocktail_text(rng, &recipe.name),
        tags: cocktail_tags(recipe, &[]),
        kind: MissionKind::Cocktail {
            target: recipe.clone(),
        },
    }
}

/// Builds one candidate of the given type. `None` means this draw found no
/// usable target and counts as a failed attempt.
fn draw_candidate(
    rng: &mut impl Rng,
    mission_type: MissionType,
    vocab: &Vocabulary,
    pool: &[&Recipe],
) -> Option<Mission> {
    let mission = match mission_type {
        MissionType::Cocktail => {
            let recipe = pool.choose(rng)?;
            cocktail_mission(rng, recipe)
        }

        MissionType::SimilarCocktail => {
            let base = *pool.choose(rng)?;
            let partners: Vec<&Recipe> = pool
                .iter()
                .copied()
                .filter(|r| r.name != base.name)
                .filter(|r| ingredient_difference(base, r) <= SIMILAR_MAX_DIFFERENCE)
                .collect();
            let similar = *partners.choose(rng)?;
            let mut tags = cocktail_tags(base, &["similar"]);
            tags.extend(similar.tags.iter().map(|t| t.to_lowercase()));
            tags.sort();
            tags.dedup();
            Mission {
                text: phrases::similar_text(rng, &base.name, &similar.name),
                tags,
                kind: MissionKind::SimilarCocktail {
                    target: base.clone(),
                    similar: similar.clone(),
                },
            }
        }

        MissionType::CocktailVariation => {
            let recipe = *pool.choose(rng)?;
            let original = recipe.ingredients.choose(rng)?.clone();
            let substitutes: Vec<&Ingredient> = vocab
                .ingredients
                .iter()
                .filter(|i| i.name != original)
                .collect();
            let substitution = substitutes.choose(rng)?.name.clone();
            Mission {
                text: phrases::variation_text(rng, &recipe.name, &original, &substitution),
                tags: cocktail_tags(recipe, &["variation"]),
                kind: MissionKind::CocktailVariation {
                    target: recipe.clone(),
                    original,
                    substitution,
                },
            }
        }

        MissionType::Flavor => {
            let flavor = *FlavorType::ALL.choose(rng)?;
            let required = rng.gen_range(1..=3u8);
            Mission {
                text: phrases::flavor_text(rng, flavor, required),
                tags: vec!["flavor".into(), flavor.name().to_lowercase()],
                kind: MissionKind::Flavor { flavor, required },
            }
        }

        MissionType::Ingredient => {
            let ingredient = vocab.ingredients.choose(rng)?.clone();
            Mission {
                text: phrases::ingredient_text(rng, &ingredient.name),
                tags: vec!["ingredient".into(), ingredient.name.to_lowercase()],
                kind: MissionKind::Ingredient { ingredient },
            }
        }

        MissionType::Preparation => {
            let method = *PrepMethod::ALL.choose(rng)?;
            Mission {
                text: phrases::preparation_text(rng, method),
                tags: vec!["preparation".into()],
                kind: MissionKind::Preparation { method },
            }
        }

        MissionType::GarnishOnly => {
            let garnish = vocab.garnishes.choose(rng)?.name.clone();
            Mission {
                text: phrases::garnish_text(rng, &garnish),
                tags: vec!["garnish".into()],
                kind: MissionKind::GarnishOnly { garnish },
            }
        }

        MissionType::NoType => {
            let forbidden = pick_flavors(rng, 1, 2);
            Mission {
                text: phrases::no_type_text(rng, &forbidden),
                tags: vec!["restriction".into()],
                kind: MissionKind::NoType { forbidden },
            }
        }

        MissionType::ExactCount => {
            let count = rng.gen_range(1..=MAX_DRINK_INGREDIENTS as u8);
            Mission {
                text: phrases::exact_count_text(rng, count),
                tags: vec!["count".into()],
                kind: MissionKind::ExactCount { count },
            }
        }

        MissionType::MixedTypes => {
            let flavors = pick_flavors(rng, 2, FlavorType::ALL.len() - 1);
            let mut tags = vec!["mixedTypes".to_string()];
            tags.extend(flavors.iter().map(|f| f.name().to_lowercase()));
            Mission {
                text: phrases::mixed_types_text(rng, &flavors),
                tags,
                kind: MissionKind::MixedTypes { flavors },
            }
        }
    };
    Some(mission)
}

/// Mission types that can produce a candidate with the current data.
fn reachable_types(weights: &MissionWeights, vocab: &Vocabulary, pool: &[&Recipe]) -> Vec<(MissionType, u32)> {
    MissionType::ALL
        .iter()
        .copied()
        .filter(|t| !t.targets_recipe() || !pool.is_empty())
        .filter(|t| match t {
            MissionType::Ingredient | MissionType::CocktailVariation => !vocab.ingredients.is_empty(),
            MissionType::GarnishOnly => !vocab.garnishes.is_empty(),
            _ => true,
        })
        .map(|t| (t, weights.weight(t)))
        .filter(|(_, w)| *w > 0)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────────────────────────────────────

enum Draws {
    Fresh { mission: Mission, attempts: u32 },
    Exhausted { attempts: u32, last_candidate: Option<Mission> },
}

/// Calls `draw` until it yields a mission whose text differs from `previous`,
/// at most `budget` times. Draws that find no target still use up an attempt.
fn draw_until_fresh(
    budget: u32,
    previous: Option<&str>,
    mut draw: impl FnMut() -> Option<Mission>,
) -> Draws {
    let mut attempts = 0;
    let mut last_candidate = None;
    while attempts < budget {
        attempts += 1;
        let Some(candidate) = draw() else {
            continue;
        };
        if previous != Some(candidate.text.as_str()) {
            return Draws::Fresh {
                mission: candidate,
                attempts,
            };
        }
        last_candidate = Some(candidate);
    }
    Draws::Exhausted {
        attempts,
        last_candidate,
    }
}

/// Generates one mission whose text differs from `previous`.
///
/// Secret recipes are never advertised. If every draw in the retry budget
/// collides with `previous` (or finds no target), a cocktail order for a
/// freshly drawn recipe is returned even if it repeats.
pub fn generate_mission<R: Rng>(
    rng: &mut R,
    vocab: &Vocabulary,
    book: &RecipeBook,
    weights: &MissionWeights,
    retry_budget: u32,
    previous: Option<&str>,
) -> Result<GeneratedMission, MissionError> {
    let pool = book.mission_pool();
    let reachable = reachable_types(weights, vocab, &pool);
    if reachable.is_empty() {
        return Err(MissionError::NoMissionAvailable);
    }
    let table = WeightedIndex::new(reachable.iter().map(|(_, w)| *w))
        .map_err(|e| MissionError::InvalidWeights(e.to_string()))?;

    let budget = retry_budget.max(1);
    let draws = draw_until_fresh(budget, previous, || {
        let (mission_type, _) = reachable[table.sample(rng)];
        draw_candidate(rng, mission_type, vocab, &pool)
    });
    let (attempts, last_candidate) = match draws {
        Draws::Fresh { mission, attempts } => {
            return Ok(GeneratedMission {
                mission,
                attempts,
                fallback: false,
            });
        }
        Draws::Exhausted {
            attempts,
            last_candidate,
        } => (attempts, last_candidate),
    };

    warn!(
        "[Missions] No fresh order after {} draws; falling back to a plain cocktail order",
        attempts
    );
    let mission = match pool.choose(rng) {
        Some(recipe) => cocktail_mission(rng, recipe),
        None => last_candidate.ok_or(MissionError::NoMissionAvailable)?,
    };
    Ok(GeneratedMission {
        mission,
        attempts,
        fallback: true,
    })
}

/// Mission generator with its one-slot memory of the last posted order.
#[derive(Resource, Debug, Clone)]
pub struct MissionGenerator {
    pub weights: MissionWeights,
    pub retry_budget: u32,
    last_text: Option<String>,
    pub last_attempts: u32,
    pub last_was_fallback: bool,
}

impl Default for MissionGenerator {
    fn default() -> Self {
        Self::new(MissionWeights::default(), MISSION_RETRY_BUDGET)
    }
}

impl MissionGenerator {
    pub fn new(weights: MissionWeights, retry_budget: u32) -> Self {
        Self {
            weights,
            retry_budget,
            last_text: None,
            last_attempts: 0,
            last_was_fallback: false,
        }
    }

    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// Drops the memory of the previous order (new session).
    pub fn forget(&mut self) {
        self.last_text = None;
        self.last_attempts = 0;
        self.last_was_fallback = false;
    }

    pub fn generate<R: Rng>(
        &mut self,
        rng: &mut R,
        vocab: &Vocabulary,
        book: &RecipeBook,
    ) -> Result<Mission, MissionError> {
        let generated = generate_mission(
            rng,
            vocab,
            book,
            &self.weights,
            self.retry_budget,
            self.last_text.as_deref(),
        )?;
        self.last_text = Some(generated.mission.text.clone());
        self.last_attempts = generated.attempts;
        self.last_was_fallback = generated.fallback;
        Ok(generated.mission)
    }
}

/// Missions carrying `tag` (case-insensitive). An empty tag keeps everything.
pub fn filter_missions_by_tag<'a>(missions: &'a [Mission], tag: &str) -> Vec<&'a Mission> {
    if tag.is_empty() {
        return missions.iter().collect();
    }
    missions
        .iter()
        .filter(|m| m.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{standard_recipe_book, standard_vocabulary};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn only(mission_type: MissionType) -> MissionWeights {
        let mut weights = MissionWeights {
            cocktail: 0,
            similar_cocktail: 0,
            cocktail_variation: 0,
            flavor: 0,
            ingredient: 0,
            preparation: 0,
            garnish_only: 0,
            no_type: 0,
            exact_count: 0,
            mixed_types: 0,
        };
        match mission_type {
            MissionType::Cocktail => weights.cocktail = 1,
            MissionType::SimilarCocktail => weights.similar_cocktail = 1,
            MissionType::CocktailVariation => weights.cocktail_variation = 1,
            MissionType::Flavor => weights.flavor = 1,
            MissionType::Ingredient => weights.ingredient = 1,
            MissionType::Preparation => weights.preparation = 1,
            MissionType::GarnishOnly => weights.garnish_only = 1,
            MissionType::NoType => weights.no_type = 1,
            MissionType::ExactCount => weights.exact_count = 1,
            MissionType::MixedTypes => weights.mixed_types = 1,
        }
        weights
    }

    #[test]
    fn test_forced_collision_falls_back_after_retry_budget() {
        let vocab = standard_vocabulary();
        let book = standard_recipe_book();
        let mut rng = StepRng::new(0, 0);

        let first = generate_mission(&mut rng, &vocab, &book, &MissionWeights::default(), 10, None).unwrap();
        assert_eq!(first.attempts, 1);
        assert!(!first.fallback);

        let second = generate_mission(
            &mut rng,
            &vocab,
            &book,
            &MissionWeights::default(),
            10,
            Some(&first.mission.text),
        )
        .unwrap();
        assert!(second.fallback);
        assert_eq!(second.attempts, 10);
        assert_eq!(second.mission.mission_type(), MissionType::Cocktail);
        // The fallback ignores repetition.
        assert_eq!(second.mission.text, first.mission.text);
    }

    #[test]
    fn test_retry_loop_stops_at_budget() {
        let order = |text: &str| Mission {
            kind: MissionKind::ExactCount { count: 2 },
            text: text.into(),
            tags: Vec::new(),
        };

        let mut calls = 0;
        let draws = draw_until_fresh(3, Some("Same again"), || {
            calls += 1;
            Some(order("Same again"))
        });
        assert_eq!(calls, 3);
        match draws {
            Draws::Exhausted {
                attempts,
                last_candidate,
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_candidate.map(|m| m.text), Some("Same again".to_string()));
            }
            Draws::Fresh { .. } => panic!("every draw repeated the previous order"),
        }

        // Empty draws use up attempts too.
        let mut calls = 0;
        let draws = draw_until_fresh(3, None, || {
            calls += 1;
            (calls == 3).then(|| order("Fresh"))
        });
        assert_eq!(calls, 3);
        assert!(matches!(draws, Draws::Fresh { attempts: 3, .. }));

        let mut calls = 0;
        let draws = draw_until_fresh(3, None, || {
            calls += 1;
            None
        });
        assert_eq!(calls, 3);
        assert!(matches!(
            draws,
            Draws::Exhausted {
                attempts: 3,
                last_candidate: None
            }
        ));
    }

    #[test]
    fn test_no_immediate_repeat_over_many_draws() {
        let vocab = standard_vocabulary();
        let book = standard_recipe_book();
        let mut rng = StdRng::seed_from_u64(7);
        let mut generator = MissionGenerator::default();

        let mut previous = generator.generate(&mut rng, &vocab, &book).unwrap().text;
        for _ in 0..500 {
            let next = generator.generate(&mut rng, &vocab, &book).unwrap();
            if !generator.last_was_fallback {
                assert_ne!(next.text, previous);
            }
            assert_eq!(generator.last_text(), Some(next.text.as_str()));
            previous = next.text;
        }
    }

    #[test]
    fn test_secret_recipes_are_never_targets() {
        let vocab = standard_vocabulary();
        let book = standard_recipe_book();
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = MissionGenerator::default();

        for _ in 0..500 {
            let mission = generator.generate(&mut rng, &vocab, &book).unwrap();
            match &mission.kind {
                MissionKind::Cocktail { target } | MissionKind::CocktailVariation { target, .. } => {
                    assert!(!target.is_secret(), "{} advertised", target.name);
                }
                MissionKind::SimilarCocktail { target, similar } => {
                    assert!(!target.is_secret() && !similar.is_secret());
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_similar_cocktails_differ_by_at_most_two() {
        let vocab = standard_vocabulary();
        let book = standard_recipe_book();
        let weights = only(MissionType::SimilarCocktail);
        let mut rng = StdRng::seed_from_u64(3);

        let mut previous: Option<String> = None;
        for _ in 0..100 {
            let generated =
                generate_mission(&mut rng, &vocab, &book, &weights, 10, previous.as_deref()).unwrap();
            if let MissionKind::SimilarCocktail { target, similar } = &generated.mission.kind {
                assert_ne!(target.name, similar.name);
                assert!(ingredient_difference(target, similar) <= SIMILAR_MAX_DIFFERENCE);
                assert!(generated.mission.tags.contains(&"cocktail".to_string()));
            } else {
                assert!(generated.fallback, "only similar orders or the fallback");
            }
            previous = Some(generated.mission.text);
        }
    }

    #[test]
    fn test_variation_substitutes_a_different_ingredient() {
        let vocab = standard_vocabulary();
        let book = standard_recipe_book();
        let weights = only(MissionType::CocktailVariation);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let generated = generate_mission(&mut rng, &vocab, &book, &weights, 10, None).unwrap();
            let MissionKind::CocktailVariation {
                target,
                original,
                substitution,
            } = &generated.mission.kind
            else {
                panic!("expected a variation order");
            };
            assert!(target.ingredients.contains(original));
            assert_ne!(original, substitution);
            assert!(vocab.ingredient(substitution).is_some());
        }
    }

    #[test]
    fn test_generated_ranges() {
        let vocab = standard_vocabulary();
        let book = standard_recipe_book();
        let mut rng = StdRng::seed_from_u64(99);
        let mut generator = MissionGenerator::default();

        for _ in 0..1000 {
            match generator.generate(&mut rng, &vocab, &book).unwrap().kind {
                MissionKind::Flavor { required, .. } => assert!((1..=3).contains(&required)),
                MissionKind::ExactCount { count } => assert!((1..=4).contains(&count)),
                MissionKind::NoType { forbidden } => {
                    assert!((1..=2).contains(&forbidden.len()));
                    assert!(forbidden.len() < 2 || forbidden[0] != forbidden[1]);
                }
                MissionKind::MixedTypes { flavors } => {
                    assert!((2..=3).contains(&flavors.len()));
                    let unique: BTreeSet<_> = flavors.iter().map(|f| f.name()).collect();
                    assert_eq!(unique.len(), flavors.len());
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_empty_book_skips_cocktail_family() {
        let vocab = standard_vocabulary();
        let book = RecipeBook::default();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let generated =
                generate_mission(&mut rng, &vocab, &book, &MissionWeights::default(), 10, None).unwrap();
            assert!(!generated.mission.mission_type().targets_recipe());
        }
    }

    #[test]
    fn test_empty_book_with_only_cocktails_has_no_mission() {
        let vocab = standard_vocabulary();
        let book = RecipeBook::default();
        let mut rng = StdRng::seed_from_u64(5);
        let err = generate_mission(&mut rng, &vocab, &book, &only(MissionType::Cocktail), 10, None)
            .unwrap_err();
        assert_eq!(err, MissionError::NoMissionAvailable);
    }

    #[test]
    fn test_filter_missions_by_tag() {
        let vocab = standard_vocabulary();
        let book = standard_recipe_book();
        let mut rng = StdRng::seed_from_u64(21);
        let mut generator = MissionGenerator::default();
        let missions: Vec<Mission> = (0..50)
            .map(|_| generator.generate(&mut rng, &vocab, &book).unwrap())
            .collect();

        assert_eq!(filter_missions_by_tag(&missions, "").len(), missions.len());
        for mission in filter_missions_by_tag(&missions, "COCKTAIL") {
            assert!(mission.mission_type().targets_recipe());
        }
        let counted = filter_missions_by_tag(&missions, "count");
        assert!(counted
            .iter()
            .all(|m| m.mission_type() == MissionType::ExactCount));
    }
}
