//! Missions domain: generates customer orders and keeps one posted on the bar.

pub mod board;
pub mod generator;
pub mod phrases;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::shared::*;

pub use generator::{
    filter_missions_by_tag, generate_mission, ingredient_difference, GeneratedMission,
    MissionError, MissionGenerator,
};

/// Random source for mission generation. Seeded from `TavernConfig::rng_seed`
/// when set so a session can be replayed.
#[derive(Resource, Debug, Clone)]
pub struct MissionRng(pub StdRng);

impl MissionRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl Default for MissionRng {
    fn default() -> Self {
        Self::new(None)
    }
}

pub struct MissionPlugin;

impl Plugin for MissionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MissionGenerator>()
            .init_resource::<MissionRng>()
            .add_systems(OnEnter(GameState::Playing), board::post_opening_mission)
            // Restarts can arrive from GameOver, so the board listens in every state.
            .add_systems(
                Update,
                (board::refresh_mission, board::log_mission_posted).chain(),
            );
    }
}
