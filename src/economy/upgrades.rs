//! Spending tips: the upgrade shop, paying down the debt, and bribing a
//! customer to change their order.
//!
//! Wallet changes go through `GoldChangeEvent`; each handler keeps a running
//! `available` figure so several requests in one frame cannot overspend.

use bevy::prelude::*;

use crate::config::TavernConfig;
use crate::shared::*;
use super::gold::format_gold;

fn toast(writer: &mut EventWriter<ToastEvent>, message: String) {
    writer.send(ToastEvent {
        message,
        duration_secs: 2.5,
    });
}

/// Why a spending request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    AlreadyOwned,
    CannotAfford { need: u32, have: u32 },
    NotInDebt,
    EmptyWallet,
    NoMeadFridge,
}

impl Refusal {
    pub fn message(self) -> String {
        match self {
            Refusal::AlreadyOwned => "You already own that upgrade.".into(),
            Refusal::CannotAfford { need, have } => {
                format!("Not enough gold (need {}g, have {}g).", need, have)
            }
            Refusal::NotInDebt => "The debt is already paid off!".into(),
            Refusal::EmptyWallet => "Your purse is empty.".into(),
            Refusal::NoMeadFridge => "You need the Mead Fridge to swap orders.".into(),
        }
    }
}

/// Checks an upgrade purchase against what is owned and affordable.
pub fn check_purchase(upgrades: &Upgrades, kind: UpgradeKind, available: u32) -> Result<u32, Refusal> {
    if upgrades.has(kind) {
        return Err(Refusal::AlreadyOwned);
    }
    let cost = kind.cost();
    if available < cost {
        return Err(Refusal::CannotAfford {
            need: cost,
            have: available,
        });
    }
    Ok(cost)
}

/// Gold actually moved for a debt payment: capped at the wallet and the debt.
pub fn debt_payment(requested: u32, available: u32, balance: i64) -> Result<u32, Refusal> {
    if balance >= 0 {
        return Err(Refusal::NotInDebt);
    }
    if available == 0 {
        return Err(Refusal::EmptyWallet);
    }
    let debt = u32::try_from(balance.unsigned_abs()).unwrap_or(u32::MAX);
    Ok(requested.min(available).min(debt))
}

pub fn check_skip(upgrades: &Upgrades, skip_cost: u32, available: u32) -> Result<u32, Refusal> {
    if !upgrades.mead_fridge {
        return Err(Refusal::NoMeadFridge);
    }
    if available < skip_cost {
        return Err(Refusal::CannotAfford {
            need: skip_cost,
            have: available,
        });
    }
    Ok(skip_cost)
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_upgrade_purchase(
    mut requests: EventReader<PurchaseUpgradeEvent>,
    wallet: Res<Wallet>,
    mut upgrades: ResMut<Upgrades>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
    mut purchased_writer: EventWriter<UpgradePurchasedEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    let mut available = wallet.gold;

    for ev in requests.read() {
        let cost = match check_purchase(&upgrades, ev.upgrade, available) {
            Ok(cost) => cost,
            Err(refusal) => {
                info!("[Economy] Upgrade {} refused: {:?}", ev.upgrade.label(), refusal);
                toast(&mut toast_writer, refusal.message());
                continue;
            }
        };

        available -= cost;
        upgrades.grant(ev.upgrade);
        gold_writer.send(GoldChangeEvent {
            amount: -(cost as i32),
            reason: format!("Upgrade: {}", ev.upgrade.label()),
        });
        purchased_writer.send(UpgradePurchasedEvent {
            upgrade: ev.upgrade,
        });
        toast(&mut toast_writer, format!("{} purchased!", ev.upgrade.label()));
    }
}

pub fn handle_pay_debt(
    mut requests: EventReader<PayDebtEvent>,
    wallet: Res<Wallet>,
    mut ledger: ResMut<Ledger>,
    mut stats: ResMut<EconomyStats>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    let mut available = wallet.gold;

    for ev in requests.read() {
        let paid = match debt_payment(ev.amount, available, ledger.balance) {
            Ok(0) => continue,
            Ok(paid) => paid,
            Err(refusal) => {
                toast(&mut toast_writer, refusal.message());
                continue;
            }
        };

        available -= paid;
        ledger.balance += i64::from(paid);
        stats.total_debt_paid = stats.total_debt_paid.saturating_add(u64::from(paid));
        gold_writer.send(GoldChangeEvent {
            amount: -i32::try_from(paid).unwrap_or(i32::MAX),
            reason: "Debt payment".into(),
        });
        info!(
            "[Economy] Paid {} toward the debt. Balance now {}",
            format_gold(i64::from(paid)),
            format_gold(ledger.balance)
        );
        toast(
            &mut toast_writer,
            format!("Paid {} toward the debt.", format_gold(i64::from(paid))),
        );
    }
}

pub fn handle_skip_mission(
    mut requests: EventReader<SkipMissionEvent>,
    wallet: Res<Wallet>,
    upgrades: Res<Upgrades>,
    config: Res<TavernConfig>,
    mut gold_writer: EventWriter<GoldChangeEvent>,
    mut skipped_writer: EventWriter<MissionSkippedEvent>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    let mut available = wallet.gold;

    for _ in requests.read() {
        let cost = match check_skip(&upgrades, config.skip_cost, available) {
            Ok(cost) => cost,
            Err(refusal) => {
                toast(&mut toast_writer, refusal.message());
                continue;
            }
        };

        available -= cost;
        if cost > 0 {
            gold_writer.send(GoldChangeEvent {
                amount: -i32::try_from(cost).unwrap_or(i32::MAX),
                reason: "Skipped an order".into(),
            });
        }
        skipped_writer.send(MissionSkippedEvent);
    }
}

/// Empties the wallet, restores the starting debt and takes back all upgrades.
pub fn reset_economy(
    mut restarts: EventReader<RestartGameEvent>,
    config: Res<TavernConfig>,
    mut wallet: ResMut<Wallet>,
    mut ledger: ResMut<Ledger>,
    mut upgrades: ResMut<Upgrades>,
    mut shift: ResMut<ShiftStats>,
    mut stats: ResMut<EconomyStats>,
) {
    if restarts.read().count() == 0 {
        return;
    }
    *wallet = Wallet::default();
    ledger.balance = config.starting_balance;
    *upgrades = Upgrades::default();
    *shift = ShiftStats::default();
    *stats = EconomyStats::default();
    info!("[Economy] Books reset. Balance {}", format_gold(ledger.balance));
}
