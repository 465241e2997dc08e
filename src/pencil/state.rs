//! Pencilsmith economy state definitions.

use super::catalog::{UpgradeDef, CATALOG};
use super::config::{
    BASE_PER_CLICK, MIN_PRICE, SHARPENER_BASE_COST, SHARPENER_COST_GROWTH, STARTING_PRICE,
    WORKER_BASE_COST, WORKER_COST_GROWTH,
};

/// Round to the nearest cent.
pub fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Cost of the next worker when `owned` are already hired.
pub fn worker_cost(owned: u32, cost_multiplier: f64) -> f64 {
    WORKER_BASE_COST * WORKER_COST_GROWTH.powi(owned as i32) * cost_multiplier
}

/// Cost of the next sharpener when `owned` are already installed.
/// Sharpeners have no discount modifier.
pub fn sharpener_cost(owned: u32) -> f64 {
    SHARPENER_BASE_COST * SHARPENER_COST_GROWTH.powi(owned as i32)
}

/// Every value an upgrade effect can change, each with its neutral default.
///
/// Never persisted: rebuilt from the set of bought upgrades on load.
#[derive(Clone, Debug, PartialEq)]
pub struct Modifiers {
    /// Added to the base pencils-per-click.
    pub per_click_bonus: u32,
    pub sharpener_power: f64,
    pub worker_boost: f64,
    /// Scales the worker cost curve (0.5 = half price).
    pub worker_cost_multiplier: f64,
    /// Sale-price multiplier, shown to the player as a percentage.
    pub demand: f64,
    /// Scales the listed price at the point of sale.
    pub price_multiplier: f64,
    /// Sharpeners yield an extra share of their output.
    pub automation: bool,
    /// Production added before the reputation factor.
    pub flat_per_sec: f64,
    /// Passive income driver, in funds per second / 2.
    pub creativity_rate: f64,
    pub reputation_boost: f64,
    pub robot_factory: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            per_click_bonus: 0,
            sharpener_power: 1.0,
            worker_boost: 1.0,
            worker_cost_multiplier: 1.0,
            demand: 1.0,
            price_multiplier: 1.0,
            automation: false,
            flat_per_sec: 0.0,
            creativity_rate: 0.0,
            reputation_boost: 1.0,
            robot_factory: false,
        }
    }
}

/// Runtime status of one catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeState {
    pub def: &'static UpgradeDef,
    pub bought: bool,
}

/// Full state of a Pencilsmith game session.
#[derive(Clone, Debug, PartialEq)]
pub struct EconomyState {
    /// Lifetime pencils produced. Never decreases; gates upgrade unlocks.
    pub pencils: f64,
    /// Unsold pencils.
    pub inventory: f64,
    pub funds: f64,
    /// Listed price per pencil, adjusted by the player in 0.01 steps.
    pub price: f64,
    pub workers: u32,
    pub sharpeners: u32,
    pub creativity: f64,
    pub reputation: f64,
    /// Production rate computed by the last tick, for display only.
    pub per_sec: f64,
    pub modifiers: Modifiers,
    /// One entry per catalog upgrade, in catalog order.
    pub upgrades: Vec<UpgradeState>,
}

impl EconomyState {
    pub fn new() -> Self {
        Self {
            pencils: 0.0,
            inventory: 0.0,
            funds: 0.0,
            price: STARTING_PRICE,
            workers: 0,
            sharpeners: 0,
            creativity: 0.0,
            reputation: 0.0,
            per_sec: 0.0,
            modifiers: Modifiers::default(),
            upgrades: CATALOG
                .iter()
                .map(|def| UpgradeState { def, bought: false })
                .collect(),
        }
    }

    /// Pencils added by one manual click.
    pub fn per_click(&self) -> u32 {
        BASE_PER_CLICK + self.modifiers.per_click_bonus
    }

    pub fn demand(&self) -> f64 {
        self.modifiers.demand
    }

    /// Price actually received per pencil, before demand. Always on the
    /// cent grid and never below `MIN_PRICE`.
    pub fn unit_price(&self) -> f64 {
        round_cents(self.price * self.modifiers.price_multiplier).max(MIN_PRICE)
    }

    pub fn worker_cost(&self) -> f64 {
        worker_cost(self.workers, self.modifiers.worker_cost_multiplier)
    }

    pub fn sharpener_cost(&self) -> f64 {
        sharpener_cost(self.sharpeners)
    }

    /// Index of the upgrade with the given id, if it is in the catalog.
    #[cfg(test)]
    pub fn upgrade_index(&self, id: &str) -> Option<usize> {
        self.upgrades.iter().position(|u| u.def.id == id)
    }

    #[cfg(test)]
    pub fn is_bought(&self, id: &str) -> bool {
        self.upgrades.iter().any(|u| u.def.id == id && u.bought)
    }
}

impl Default for EconomyState {
    fn default() -> Self {
        Self::new()
    }
}

/// Display status of an upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeStatus {
    Locked,
    Available,
    Bought,
}

/// Read-only view of one upgrade for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeView {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub cost: f64,
    pub unlocked_at: f64,
    pub status: UpgradeStatus,
    /// Unlocked, not yet bought and affordable right now.
    pub purchasable: bool,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub pencils: f64,
    pub inventory: f64,
    pub funds: f64,
    pub per_sec: f64,
    pub price: f64,
    pub demand: f64,
    pub per_click: u32,
    pub workers: u32,
    pub sharpeners: u32,
    pub creativity: f64,
    pub reputation: f64,
    pub worker_cost: f64,
    pub sharpener_cost: f64,
    pub automation: bool,
    pub robot_factory: bool,
    pub upgrades: Vec<UpgradeView>,
}
