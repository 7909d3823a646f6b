use bevy::prelude::*;
use crate::shared::*;

/// Applies GoldChangeEvents to the wallet.
/// Spending more than the wallet holds clamps to 0 instead of underflowing.
pub fn apply_gold_changes(
    mut gold_events: EventReader<GoldChangeEvent>,
    mut wallet: ResMut<Wallet>,
    mut stats: ResMut<EconomyStats>,
) {
    for ev in gold_events.read() {
        if ev.amount >= 0 {
            let gain = ev.amount.unsigned_abs();
            wallet.gold = wallet.gold.saturating_add(gain);
            stats.total_gold_earned = stats.total_gold_earned.saturating_add(u64::from(gain));
            info!(
                "[Economy] Gold +{}: {}. Wallet: {}",
                gain,
                ev.reason,
                format_gold(i64::from(wallet.gold))
            );
        } else {
            let cost = ev.amount.unsigned_abs();
            if wallet.gold >= cost {
                wallet.gold -= cost;
                stats.total_gold_spent = stats.total_gold_spent.saturating_add(u64::from(cost));
                info!(
                    "[Economy] Gold -{}: {}. Wallet: {}",
                    cost,
                    ev.reason,
                    format_gold(i64::from(wallet.gold))
                );
            } else {
                warn!(
                    "[Economy] Tried to spend {}g but only have {}g (reason: {}). Clamping to 0.",
                    cost, wallet.gold, ev.reason
                );
                stats.total_gold_spent = stats.total_gold_spent.saturating_add(u64::from(wallet.gold));
                wallet.gold = 0;
            }
        }
    }
}

/// Format a gold amount as a display string (e.g. "1,234g", "-20,000g").
pub fn format_gold(amount: i64) -> String {
    let digits: Vec<char> = amount.unsigned_abs().to_string().chars().collect();
    let mut result = String::new();
    if amount < 0 {
        result.push('-');
    }
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result.push('g');
    result
}
