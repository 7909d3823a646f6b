//! Bar domain: judges served drinks and pays tips.
//!
//! The evaluator itself is pure (`evaluation.rs`); this plugin wires it to
//! `ServeDrinkEvent` and applies the tip and secret-popup policies.

pub mod evaluation;
pub mod serving;

use bevy::prelude::*;
use crate::shared::*;

pub use evaluation::{describe_drink, evaluate, find_recipe, matches_recipe, ScoringRules};
pub use serving::{discover_secret, tip_for};

pub struct BarPlugin;

impl Plugin for BarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DiscoveredSecrets>()
            .add_systems(
                Update,
                serving::handle_serve_drink.run_if(in_state(GameState::Playing)),
            )
            .add_systems(Update, serving::reset_discoveries);
    }
}
