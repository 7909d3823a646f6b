//! Serving a drink over the counter: judge it, tip the bartender, and record
//! any secret recipe the player stumbled onto.

use bevy::prelude::*;

use crate::config::TavernConfig;
use crate::shared::*;
use super::evaluation::{evaluate, ScoringRules};

impl From<&TavernConfig> for ScoringRules {
    fn from(config: &TavernConfig) -> Self {
        Self {
            secret_bonus: config.secret_bonus,
            medium_multiplier_pct: config.medium_multiplier_pct,
            hard_multiplier_pct: config.hard_multiplier_pct,
        }
    }
}

/// Gold paid for a served drink. A known recipe that missed the order still
/// earns the flat consolation tip.
pub fn tip_for(evaluation: &Evaluation, consolation_reward: u32) -> u32 {
    if evaluation.points == 0 && evaluation.is_known_recipe {
        consolation_reward
    } else {
        evaluation.points
    }
}

/// Records a served secret and decides whether the front-end should celebrate.
/// Returns `(first_time, show_popup)`.
pub fn discover_secret(
    discovered: &mut DiscoveredSecrets,
    recipe_name: &str,
    policy: SecretPopupPolicy,
) -> (bool, bool) {
    let first_time = discovered.record(recipe_name);
    let show_popup = match policy {
        SecretPopupPolicy::FirstDiscovery => first_time,
        SecretPopupPolicy::Always => true,
    };
    (first_time, show_popup)
}

fn refuse(toast_writer: &mut EventWriter<ToastEvent>, message: &str) {
    info!("[Bar] Serve refused: {}", message);
    toast_writer.send(ToastEvent {
        message: message.to_string(),
        duration_secs: 2.5,
    });
}

/// Handles drinks handed over the counter this frame. Only the first one is
/// judged against the posted order; the board replaces the order before the
/// next drink can be taken. Nothing is served once the bar has closed.
#[allow(clippy::too_many_arguments)]
pub fn handle_serve_drink(
    mut serves: EventReader<ServeDrinkEvent>,
    clock: Res<DayClock>,
    active: Res<ActiveMission>,
    book: Res<RecipeBook>,
    config: Res<TavernConfig>,
    mut discovered: ResMut<DiscoveredSecrets>,
    mut stats: ResMut<ShiftStats>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
    mut served_writer: EventWriter<DrinkServedEvent>,
    mut secret_writer: EventWriter<SecretDiscoveredEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    let rules = ScoringRules::from(&*config);
    let mut order_taken = false;

    for ev in serves.read() {
        if !clock.running {
            refuse(&mut toast_writer, "The bar is closed until tomorrow.");
            continue;
        }
        if order_taken {
            refuse(&mut toast_writer, "One drink at a time. The next customer hasn't ordered yet.");
            continue;
        }
        order_taken = true;

        let evaluation = evaluate(&ev.drink, active.mission.as_ref(), &book, &rules);
        let tip = tip_for(&evaluation, config.consolation_reward);

        stats.drinks_served_today += 1;
        stats.total_drinks_served += 1;

        if evaluation.is_secret {
            let (first_time, show_popup) =
                discover_secret(&mut discovered, &evaluation.drink_name, config.secret_popup);
            if first_time {
                info!("[Bar] Secret recipe discovered: {}", evaluation.drink_name);
            }
            secret_writer.send(SecretDiscoveredEvent {
                recipe_name: evaluation.drink_name.clone(),
                first_time,
                show_popup,
            });
        }

        if tip > 0 {
            gold_writer.send(GoldChangeEvent {
                amount: i32::try_from(tip).unwrap_or(i32::MAX),
                reason: format!("Tip for {}", evaluation.drink_name),
            });
        }

        let message = if evaluation.points > 0 {
            format!("{}! +{}g", evaluation.drink_name, tip)
        } else if tip > 0 {
            format!("{}. Not what they asked for, but they know it. +{}g", evaluation.drink_name, tip)
        } else {
            format!("{}. The customer frowns.", evaluation.drink_name)
        };
        toast_writer.send(ToastEvent {
            message,
            duration_secs: 2.5,
        });

        info!(
            "[Bar] Served {} for {} points (tip {}g)",
            evaluation.drink_name, evaluation.points, tip
        );
        served_writer.send(DrinkServedEvent { evaluation, tip });
    }
}

/// Forgets discovered secrets when a new session starts.
pub fn reset_discoveries(
    mut restarts: EventReader<RestartGameEvent>,
    mut discovered: ResMut<DiscoveredSecrets>,
) {
    if restarts.read().count() == 0 {
        return;
    }
    discovered.names.clear();
}
