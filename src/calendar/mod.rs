//! Calendar domain: the heartbeat of the tavern.
//!
//! Responsible for:
//! - Counting down the day of service while Playing
//! - Closing the bar early on request
//! - Sending DayEndEvent (the economy domain answers with a DayReportEvent)
//! - Opening the next day, or ending the game after the last day / once the debt is cleared
//! - Restarting a session

use bevy::prelude::*;

use crate::config::TavernConfig;
use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DayClock>()
            .add_systems(
                Update,
                (tick_day_clock, close_bar_early, advance_after_report)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(Update, restart_session);
    }
}

/// True once the session should end after the books for `day` are closed.
pub fn is_game_over(day: u32, max_days: u32, balance: i64) -> bool {
    day >= max_days || balance >= 0
}

// ─── Day clock ────────────────────────────────────────────────────────────────

fn tick_day_clock(
    time: Res<Time>,
    mut clock: ResMut<DayClock>,
    mut day_end_writer: EventWriter<DayEndEvent>,
) {
    if clock.tick(time.delta_secs()) {
        info!("[Calendar] Last orders! Day {} is over", clock.day);
        day_end_writer.send(DayEndEvent { day: clock.day });
    }
}

/// The front-end can shut the doors before the clock runs out.
fn close_bar_early(
    mut requests: EventReader<CloseBarEvent>,
    mut clock: ResMut<DayClock>,
    mut day_end_writer: EventWriter<DayEndEvent>,
) {
    if requests.read().count() == 0 || !clock.running {
        return;
    }
    info!(
        "[Calendar] Bar closed early on day {} with {:.0}s left",
        clock.day, clock.seconds_left
    );
    clock.running = false;
    clock.seconds_left = 0.0;
    day_end_writer.send(DayEndEvent { day: clock.day });
}

// ─── Day rollover ─────────────────────────────────────────────────────────────

/// Once the books for a day are closed, either open the next day or end the game.
#[allow(clippy::too_many_arguments)]
fn advance_after_report(
    mut reports: EventReader<DayReportEvent>,
    config: Res<TavernConfig>,
    upgrades: Res<Upgrades>,
    shift: Res<ShiftStats>,
    totals: Res<EconomyStats>,
    mut clock: ResMut<DayClock>,
    mut next_state: ResMut<NextState<GameState>>,
    mut started_writer: EventWriter<DayStartedEvent>,
    mut game_over_writer: EventWriter<GameOverEvent>,
) {
    for ev in reports.read() {
        let balance = ev.report.new_balance;

        if is_game_over(ev.day, config.max_days, balance) {
            let victory = balance >= 0;
            info!(
                "[Calendar] Game over after day {}: {} (balance {})",
                ev.day,
                if victory { "debt cleared" } else { "out of time" },
                balance
            );
            next_state.set(GameState::GameOver);
            game_over_writer.send(GameOverEvent {
                victory,
                final_balance: balance,
                days_played: ev.day,
                total_drinks: shift.total_drinks_served,
                totals: totals.clone(),
            });
            return;
        }

        clock.day = ev.day + 1;
        clock.seconds_left = config.day_length(&upgrades);
        clock.running = true;
        info!(
            "[Calendar] Day {} opens ({:.0}s of service)",
            clock.day, clock.seconds_left
        );
        started_writer.send(DayStartedEvent { day: clock.day });
    }
}

// ─── Restart ──────────────────────────────────────────────────────────────────

fn restart_session(
    mut restarts: EventReader<RestartGameEvent>,
    config: Res<TavernConfig>,
    mut clock: ResMut<DayClock>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if restarts.read().count() == 0 {
        return;
    }
    *clock = DayClock {
        day: 1,
        seconds_left: config.day_length_secs,
        running: true,
    };
    next_state.set(GameState::Playing);
    info!("[Calendar] New session: day 1");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_rules() {
        assert!(!is_game_over(1, 30, -20_000));
        assert!(is_game_over(30, 30, -20_000));
        assert!(is_game_over(5, 30, 0));
        assert!(is_game_over(5, 30, 120));
        assert!(!is_game_over(29, 30, -1));
    }
}
