//! Pencilsmith game logic: pure functions over [`EconomyState`].

use super::catalog::{apply_upgrade, EffectError};
use super::config::{
    AUTOMATION_SHARE, CREATIVITY_DIVISOR, MIN_PRICE, PASSIVE_INCOME_SHARE,
    PENCILS_PER_REPUTATION, PRICE_STEP, REPUTATION_DIVISOR, SHARPENER_RATE, WORKER_RATE,
};
use super::state::{round_cents, EconomyState, Modifiers, Snapshot, UpgradeStatus, UpgradeView};

/// Pencils per second from workers and sharpeners, before the automation bonus.
fn production_rates(m: &Modifiers, workers: u32, sharpeners: u32) -> (f64, f64) {
    let worker_pencils = workers as f64 * WORKER_RATE * m.worker_boost;
    let sharpener_pencils = sharpeners as f64 * SHARPENER_RATE * m.sharpener_power;
    (worker_pencils, sharpener_pencils)
}

/// Advance the simulation by `delta_secs` of wall-clock time.
///
/// Any non-negative delta is valid and a long gap (backgrounded tab) arrives
/// as one large delta. Pencils and funds are linear in the delta; creativity
/// and reputation grow with its square, so one long step awards more of those
/// than many short ones. Negative or NaN deltas are treated as zero.
pub fn tick(state: &mut EconomyState, delta_secs: f64) {
    let dt = delta_secs.max(0.0);
    let m = &state.modifiers;

    let (worker_pencils, sharpener_pencils) = production_rates(m, state.workers, state.sharpeners);
    let automation_bonus = if m.automation {
        sharpener_pencils * AUTOMATION_SHARE
    } else {
        0.0
    };
    let reputation_factor = m.reputation_boost;
    // The robot factory's 500/s arrives through `flat_per_sec` from its
    // catalog effect; the `robot_factory` flag itself only drives display.

    // The automation bonus is produced but left out of the displayed rate.
    let per_sec = (worker_pencils + sharpener_pencils + m.flat_per_sec) * reputation_factor;
    let produced = per_sec * dt + automation_bonus * dt;
    let creativity_rate = m.creativity_rate;

    state.per_sec = per_sec;
    state.pencils += produced;
    state.inventory += produced;
    state.creativity += (produced / CREATIVITY_DIVISOR) * dt;
    state.reputation += (produced / REPUTATION_DIVISOR) * dt;

    if creativity_rate > 0.0 {
        state.funds += creativity_rate * dt * PASSIVE_INCOME_SHARE;
    }
}

/// Manual click: make `per_click` pencils.
pub fn click(state: &mut EconomyState) {
    let made = state.per_click() as f64;
    state.pencils += made;
    state.inventory += made;
}

/// Try to hire a worker. Returns true if successful.
pub fn buy_worker(state: &mut EconomyState) -> bool {
    let cost = state.worker_cost();
    if state.funds < cost {
        return false;
    }
    state.funds -= cost;
    state.workers += 1;
    true
}

/// Try to install a sharpener. Returns true if successful.
pub fn buy_sharpener(state: &mut EconomyState) -> bool {
    let cost = state.sharpener_cost();
    if state.funds < cost {
        return false;
    }
    state.funds -= cost;
    state.sharpeners += 1;
    true
}

/// Sell the whole inventory. Returns the revenue, or None if there was
/// nothing to sell.
pub fn sell(state: &mut EconomyState) -> Option<f64> {
    let sold = state.inventory;
    if sold <= 0.0 {
        return None;
    }
    let revenue = sold * state.unit_price() * state.demand();
    state.funds += revenue;
    state.inventory = 0.0;
    state.reputation += (sold / PENCILS_PER_REPUTATION).floor();
    Some(revenue)
}

/// Move the charged price by `step` and store it back as a base price, so
/// owned price upgrades keep applying to later steps.
fn step_price(state: &mut EconomyState, step: f64) {
    let charged = round_cents(state.unit_price() + step).max(MIN_PRICE);
    state.price = charged / state.modifiers.price_multiplier;
}

pub fn raise_price(state: &mut EconomyState) {
    step_price(state, PRICE_STEP);
}

pub fn lower_price(state: &mut EconomyState) {
    step_price(state, -PRICE_STEP);
}

pub fn is_unlocked(state: &EconomyState, idx: usize) -> bool {
    state
        .upgrades
        .get(idx)
        .map_or(false, |u| state.pencils >= u.def.unlocked_at)
}

/// Locked / available / bought. Unknown indices report `Locked`.
pub fn upgrade_status(state: &EconomyState, idx: usize) -> UpgradeStatus {
    match state.upgrades.get(idx) {
        Some(u) if u.bought => UpgradeStatus::Bought,
        Some(_) if is_unlocked(state, idx) => UpgradeStatus::Available,
        _ => UpgradeStatus::Locked,
    }
}

pub fn can_buy_upgrade(state: &EconomyState, idx: usize) -> bool {
    upgrade_status(state, idx) == UpgradeStatus::Available
        && state.funds >= state.upgrades[idx].def.cost
}

/// Try to buy an upgrade by catalog index.
///
/// `Ok(false)`: locked, already bought, unaffordable or unknown; nothing
/// changed. `Ok(true)`: bought and applied. `Err`: bought and paid for, but an
/// effect failed and the modifiers are only partially updated.
pub fn buy_upgrade(state: &mut EconomyState, idx: usize) -> Result<bool, EffectError> {
    if !can_buy_upgrade(state, idx) {
        return Ok(false);
    }
    let def = state.upgrades[idx].def;
    state.funds -= def.cost;
    state.upgrades[idx].bought = true;

    match apply_upgrade(&mut state.modifiers, def) {
        Ok(()) => {
            log::info!("upgrade purchased: {}", def.id);
            Ok(true)
        }
        Err(e) => {
            log::error!("upgrade {} bought but effect failed: {}", def.id, e);
            Err(e)
        }
    }
}

/// Reset the modifiers and replay every bought upgrade in catalog order.
/// Failures are logged and skipped; the first one is returned.
pub fn rebuild_modifiers(state: &mut EconomyState) -> Result<(), EffectError> {
    let mut modifiers = Modifiers::default();
    let mut first_err = None;
    for u in state.upgrades.iter().filter(|u| u.bought) {
        if let Err(e) = apply_upgrade(&mut modifiers, u.def) {
            log::error!("replaying upgrade {} failed: {}", u.def.id, e);
            first_err.get_or_insert(e);
        }
    }
    state.modifiers = modifiers;
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Read-only copy of everything the presentation layer displays.
pub fn snapshot(state: &EconomyState) -> Snapshot {
    let upgrades = state
        .upgrades
        .iter()
        .enumerate()
        .map(|(idx, u)| UpgradeView {
            id: u.def.id,
            name: u.def.name,
            description: u.def.description,
            cost: u.def.cost,
            unlocked_at: u.def.unlocked_at,
            status: upgrade_status(state, idx),
            purchasable: can_buy_upgrade(state, idx),
        })
        .collect();

    Snapshot {
        pencils: state.pencils,
        inventory: state.inventory,
        funds: state.funds,
        per_sec: state.per_sec,
        price: state.unit_price(),
        demand: state.demand(),
        per_click: state.per_click(),
        workers: state.workers,
        sharpeners: state.sharpeners,
        creativity: state.creativity,
        reputation: state.reputation,
        worker_cost: state.worker_cost(),
        sharpener_cost: state.sharpener_cost(),
        automation: state.modifiers.automation,
        robot_factory: state.modifiers.robot_factory,
        upgrades,
    }
}
