//! Data layer: populates the shelves and the recipe book at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills `Vocabulary` and
//! `RecipeBook` from the hard-coded game-design data defined in submodules,
//! then transitions the game into GameState::Playing.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GameState has advanced past Loading.

pub mod recipes;
pub mod vocabulary;

use bevy::prelude::*;
use crate::shared::*;

pub use recipes::populate_recipes;
pub use vocabulary::populate_vocabulary;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Fully populated shelves, for callers outside the ECS (tests, tools).
pub fn standard_vocabulary() -> Vocabulary {
    let mut vocab = Vocabulary::default();
    populate_vocabulary(&mut vocab);
    vocab
}

/// Fully populated recipe book, for callers outside the ECS (tests, tools).
pub fn standard_recipe_book() -> RecipeBook {
    let mut book = RecipeBook::default();
    populate_recipes(&mut book);
    book
}

/// Single system that populates every registry and then transitions to Playing.
fn load_all_data(
    mut vocab: ResMut<Vocabulary>,
    mut book: ResMut<RecipeBook>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Populating shelves and recipe book…");

    populate_vocabulary(&mut vocab);
    info!(
        "  Ingredients loaded: {}, Garnishes loaded: {}",
        vocab.ingredients.len(),
        vocab.garnishes.len()
    );

    populate_recipes(&mut book);
    let secrets = book.recipes.iter().filter(|r| r.is_secret()).count();
    info!(
        "  Recipes loaded: {} ({} secret)",
        book.recipes.len(),
        secrets
    );

    info!("[Data] All data populated. Opening the bar.");
    next_state.set(GameState::Playing);
}
