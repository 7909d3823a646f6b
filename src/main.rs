//! Headless tavern session with a scripted bartender.
//!
//! `tavernkeep [config.ron]` plays a full session against the rules engine,
//! logging every order, tip and nightly report, and exits at game over.

use std::time::Duration;

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use tavernkeep::config::{ConfigError, TavernConfig};
use tavernkeep::economy::format_gold;
use tavernkeep::shared::*;
use tavernkeep::TavernPlugin;

/// Game seconds between drinks.
const SERVE_INTERVAL_SECS: f32 = 3.0;
/// Simulated frame length.
const FRAME: Duration = Duration::from_millis(250);

fn main() -> Result<(), ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => TavernConfig::load(path)?,
        None => TavernConfig::default(),
    };

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default(), StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(config)
        .add_plugins(TavernPlugin)
        .add_systems(
            Update,
            (serve_orders, spend_tips).run_if(in_state(GameState::Playing)),
        )
        .add_systems(Update, report_and_exit)
        .run();

    Ok(())
}

// ─── Mixing ───────────────────────────────────────────────────────────────────

fn pour(drink: &mut Drink, ingredient: Option<Ingredient>) {
    if let Some(ingredient) = ingredient {
        drink.add_ingredient(ingredient);
    }
}

fn bottle(vocab: &Vocabulary, flavor: FlavorType) -> Option<Ingredient> {
    vocab.ingredients.iter().find(|i| i.flavor == flavor).cloned()
}

fn from_recipe(recipe: &Recipe, vocab: &Vocabulary, swap: Option<(&str, &str)>) -> Drink {
    let mut names = recipe.ingredients.clone();
    if let Some((original, substitution)) = swap {
        if let Some(slot) = names.iter().position(|n| n == original) {
            names[slot] = substitution.to_string();
        }
    }

    let mut drink = Drink::new();
    for name in &names {
        if let Some(ingredient) = vocab.ingredient(name) {
            drink.add_ingredient(ingredient.clone());
        }
    }
    drink.garnish = recipe
        .garnishes
        .as_ref()
        .and_then(|allowed| allowed.first())
        .and_then(|name| vocab.garnish(name))
        .cloned();
    drink.prep = recipe.serving;
    drink
}

/// What a competent bartender would pour for the order.
fn mix_for(mission: &Mission, vocab: &Vocabulary) -> Drink {
    let mut drink = Drink::new();
    let any = vocab.ingredients.first().cloned();

    match &mission.kind {
        MissionKind::Cocktail { target } | MissionKind::SimilarCocktail { target, .. } => {
            return from_recipe(target, vocab, None);
        }
        MissionKind::CocktailVariation {
            target,
            original,
            substitution,
        } => return from_recipe(target, vocab, Some((original.as_str(), substitution.as_str()))),
        MissionKind::Flavor { flavor, required } => {
            for _ in 0..*required {
                pour(&mut drink, bottle(vocab, *flavor));
            }
        }
        MissionKind::Ingredient { ingredient } => {
            drink.add_ingredient(ingredient.clone());
        }
        MissionKind::Preparation { method } => {
            pour(&mut drink, any);
            drink.prep = Some(*method);
        }
        MissionKind::GarnishOnly { garnish } => {
            pour(&mut drink, any);
            drink.garnish = vocab.garnish(garnish).cloned();
        }
        MissionKind::NoType { forbidden } => {
            let allowed = vocab.ingredients.iter().find(|i| !forbidden.contains(&i.flavor));
            pour(&mut drink, allowed.cloned());
        }
        MissionKind::ExactCount { count } => {
            for _ in 0..*count {
                pour(&mut drink, any.clone());
            }
        }
        MissionKind::MixedTypes { flavors } => {
            for (i, flavor) in flavors.iter().enumerate() {
                let pours = if i == 0 { 2 } else { 1 };
                for _ in 0..pours {
                    pour(&mut drink, bottle(vocab, *flavor));
                }
            }
        }
    }
    drink
}

// ─── Bartender systems ────────────────────────────────────────────────────────

fn serve_orders(
    time: Res<Time>,
    mut since_last: Local<f32>,
    clock: Res<DayClock>,
    active: Res<ActiveMission>,
    vocab: Res<Vocabulary>,
    mut serve_writer: EventWriter<ServeDrinkEvent>,
) {
    *since_last += time.delta_secs();
    if !clock.running || *since_last < SERVE_INTERVAL_SECS {
        return;
    }
    let Some(mission) = &active.mission else {
        return;
    };
    *since_last = 0.0;
    serve_writer.send(ServeDrinkEvent {
        drink: mix_for(mission, &vocab),
    });
}

/// Buys Better Tips first, then puts every spare coin into the debt.
fn spend_tips(
    mut day_started: EventReader<DayStartedEvent>,
    wallet: Res<Wallet>,
    upgrades: Res<Upgrades>,
    mut purchase_writer: EventWriter<PurchaseUpgradeEvent>,
    mut pay_writer: EventWriter<PayDebtEvent>,
) {
    if day_started.read().count() == 0 {
        return;
    }
    let better_tips = UpgradeKind::DrinkIncome;
    if !upgrades.has(better_tips) {
        if wallet.gold >= better_tips.cost() {
            purchase_writer.send(PurchaseUpgradeEvent {
                upgrade: better_tips,
            });
        }
        return;
    }
    if wallet.gold > 0 {
        pay_writer.send(PayDebtEvent { amount: wallet.gold });
    }
}

fn report_and_exit(
    mut reports: EventReader<DayReportEvent>,
    mut game_over: EventReader<GameOverEvent>,
    mut exit: EventWriter<AppExit>,
) {
    for ev in reports.read() {
        info!(
            "Day {}: {} drinks, net {}, balance {}",
            ev.day,
            ev.drinks_served,
            format_gold(ev.report.net),
            format_gold(ev.report.new_balance)
        );
    }
    for ev in game_over.read() {
        info!(
            "{} after {} days and {} drinks. Final balance {}",
            if ev.victory { "Debt cleared" } else { "Evicted" },
            ev.days_played,
            ev.total_drinks,
            format_gold(ev.final_balance)
        );
        info!(
            "Tips earned {}, spent {}, paid toward the debt {}",
            format_gold(i64::try_from(ev.totals.total_gold_earned).unwrap_or(i64::MAX)),
            format_gold(i64::try_from(ev.totals.total_gold_spent).unwrap_or(i64::MAX)),
            format_gold(i64::try_from(ev.totals.total_debt_paid).unwrap_or(i64::MAX))
        );
        exit.send(AppExit::Success);
    }
}
