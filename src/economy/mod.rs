//! Economy domain: tips, the upgrade shop, debt payments and the nightly books.
//!
//! All cross-domain communication goes through `crate::shared::*` events and resources.
//! No other domain module is imported here.

use bevy::prelude::*;
use crate::shared::*;

pub mod finance;
pub mod gold;
pub mod upgrades;

pub use finance::compute_day;
pub use gold::format_gold;

use finance::close_books_on_day_end;
use gold::apply_gold_changes;
use upgrades::{handle_pay_debt, handle_skip_mission, handle_upgrade_purchase, reset_economy};

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        // ── Resources ──────────────────────────────────────────────────────
        app.init_resource::<EconomyStats>()
            .init_resource::<Wallet>()
            .init_resource::<Ledger>()
            .init_resource::<Upgrades>()
            .init_resource::<ShiftStats>();

        // ── Systems: Playing state ─────────────────────────────────────────
        app.add_systems(
            Update,
            (
                // Spending requests read the wallet before this frame's changes land.
                handle_upgrade_purchase,
                handle_pay_debt,
                handle_skip_mission,
                // Tips and spending from any domain.
                apply_gold_changes,
                // Day-end: run the finance calculator.
                close_books_on_day_end,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );

        // ── Systems: any state ─────────────────────────────────────────────
        app.add_systems(Update, reset_economy);
    }
}
