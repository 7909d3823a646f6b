//! End-of-day bookkeeping: what the day's drinks earned, what the tavern cost
//! to run, and where that leaves the ledger.

use bevy::prelude::*;
use crate::shared::*;

pub const DRINK_PRICE: i64 = 20;
/// Extra per drink once Better Tips is bought.
pub const DRINK_INCOME_BONUS: i64 = 10;
pub const RENT: i64 = 60;
pub const FOOD: i64 = 8;
pub const BOOZE_PER_DRINK: i64 = 5;
pub const BOOZE_MINIMUM: i64 = 12;
/// Running costs with Cost Reduction, in percent.
pub const COST_REDUCTION_PCT: i64 = 85;
/// Remaining debt after the nightly Debt Reduction cut, in percent.
pub const DEBT_REDUCTION_PCT: i64 = 95;

fn reduced(cost: i64, upgrades: &Upgrades) -> i64 {
    if upgrades.cost_reduction {
        cost * COST_REDUCTION_PCT / 100
    } else {
        cost
    }
}

/// Pure day-end arithmetic. Percentages are integer and round toward zero.
pub fn compute_day(drinks_served: u32, current_balance: i64, upgrades: &Upgrades) -> DayReport {
    let drinks = i64::from(drinks_served);
    let price = if upgrades.drink_income {
        DRINK_PRICE + DRINK_INCOME_BONUS
    } else {
        DRINK_PRICE
    };

    let earned = drinks * price;
    let rent = reduced(RENT, upgrades);
    let food = reduced(FOOD, upgrades);
    let booze = reduced((drinks * BOOZE_PER_DRINK).max(BOOZE_MINIMUM), upgrades);
    let total_cost = rent + booze + food;
    let net = earned - total_cost;

    let mut new_balance = current_balance + net;
    if upgrades.debt_reduction && new_balance < 0 {
        new_balance = new_balance * DEBT_REDUCTION_PCT / 100;
    }

    DayReport {
        earned,
        rent,
        booze,
        food,
        total_cost,
        net,
        new_balance,
    }
}

/// Closes the books when the day ends: updates the ledger, reports, and
/// resets today's drink count.
pub fn close_books_on_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut ledger: ResMut<Ledger>,
    mut shift: ResMut<ShiftStats>,
    upgrades: Res<Upgrades>,
    mut report_writer: EventWriter<DayReportEvent>,
) {
    for ev in day_end_events.read() {
        let drinks_served = shift.drinks_served_today;
        let report = compute_day(drinks_served, ledger.balance, &upgrades);
        ledger.balance = report.new_balance;
        shift.drinks_served_today = 0;

        info!(
            "[Economy] Day {} books: {} drinks, earned {}, costs {}, balance now {}",
            ev.day,
            drinks_served,
            super::gold::format_gold(report.earned),
            super::gold::format_gold(report.total_cost),
            super::gold::format_gold(report.new_balance)
        );

        report_writer.send(DayReportEvent {
            day: ev.day,
            drinks_served,
            report,
        });
    }
}
