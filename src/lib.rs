//! Tavernkeep library crate: the rules engine of a drink-mixing tavern game.
//!
//! The front-end (rendering, input, popups) is a separate app that adds
//! `TavernPlugin` and talks to it through the events in `shared`. The binary
//! crate (`main.rs`) runs a headless session with a scripted bartender.

pub mod shared;
pub mod config;
pub mod data;
pub mod missions;
pub mod bar;
pub mod economy;
pub mod calendar;

use bevy::prelude::*;

use config::TavernConfig;
use missions::{MissionGenerator, MissionRng};
use shared::*;

/// Registers the shared contract and every domain plugin.
///
/// Reads `TavernConfig` if the app already holds one, otherwise inserts the
/// defaults. Requires `StatesPlugin` (part of `DefaultPlugins`).
pub struct TavernPlugin;

impl Plugin for TavernPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TavernConfig>();
        let config = app.world().resource::<TavernConfig>().clone();
        if let Err(err) = config.validate() {
            warn!("[Tavern] Config problem, running anyway: {}", err);
        }

        app
            // Game state
            .init_state::<GameState>()
            // Config-derived resources
            .insert_resource(Ledger {
                balance: config.starting_balance,
            })
            .insert_resource(DayClock {
                day: 1,
                seconds_left: config.day_length_secs,
                running: true,
            })
            .insert_resource(MissionGenerator::new(
                config.mission_weights.clone(),
                config.retry_budget,
            ))
            .insert_resource(MissionRng::new(config.rng_seed))
            // Shared resources
            .init_resource::<Vocabulary>()
            .init_resource::<RecipeBook>()
            .init_resource::<DiscoveredSecrets>()
            .init_resource::<ActiveMission>()
            .init_resource::<Wallet>()
            .init_resource::<Upgrades>()
            .init_resource::<ShiftStats>()
            // Events
            .add_event::<ServeDrinkEvent>()
            .add_event::<DrinkServedEvent>()
            .add_event::<SecretDiscoveredEvent>()
            .add_event::<MissionPostedEvent>()
            .add_event::<SkipMissionEvent>()
            .add_event::<MissionSkippedEvent>()
            .add_event::<GoldChangeEvent>()
            .add_event::<PurchaseUpgradeEvent>()
            .add_event::<UpgradePurchasedEvent>()
            .add_event::<PayDebtEvent>()
            .add_event::<CloseBarEvent>()
            .add_event::<DayEndEvent>()
            .add_event::<DayReportEvent>()
            .add_event::<DayStartedEvent>()
            .add_event::<GameOverEvent>()
            .add_event::<RestartGameEvent>()
            .add_event::<ToastEvent>()
            // Domain plugins
            .add_plugins(calendar::CalendarPlugin)
            .add_plugins(missions::MissionPlugin)
            .add_plugins(bar::BarPlugin)
            .add_plugins(economy::EconomyPlugin)
            // Data loading
            .add_plugins(data::DataPlugin);
    }
}
