//! Tuning constants for the Pencilsmith economy.

// ── Cost curves ─────────────────────────────────────────────────
pub const WORKER_BASE_COST: f64 = 10.0;
pub const WORKER_COST_GROWTH: f64 = 1.15;
pub const SHARPENER_BASE_COST: f64 = 75.0;
pub const SHARPENER_COST_GROWTH: f64 = 1.2;

// ── Production ──────────────────────────────────────────────────
/// Pencils per second produced by one worker before boosts.
pub const WORKER_RATE: f64 = 1.0;
/// Pencils per second produced by one sharpener before boosts.
pub const SHARPENER_RATE: f64 = 5.0;
/// Extra share of sharpener output granted by the automation suite.
pub const AUTOMATION_SHARE: f64 = 0.5;
/// Pencils added per manual click before upgrades.
pub const BASE_PER_CLICK: u32 = 1;

// ── Secondary counters ──────────────────────────────────────────
pub const CREATIVITY_DIVISOR: f64 = 100.0;
pub const REPUTATION_DIVISOR: f64 = 1000.0;
/// Funds earned per second per point of creativity rate.
pub const PASSIVE_INCOME_SHARE: f64 = 0.5;
/// Pencils sold per reputation point awarded on a sale.
pub const PENCILS_PER_REPUTATION: f64 = 100.0;

// ── Pricing ─────────────────────────────────────────────────────
pub const STARTING_PRICE: f64 = 0.10;
pub const PRICE_STEP: f64 = 0.01;
pub const MIN_PRICE: f64 = 0.01;

// ── Session ─────────────────────────────────────────────────────
/// localStorage key of the single save entry.
pub const STORAGE_KEY: &str = "pencilsmith-save";

/// Runtime settings for a [`crate::pencil::session::Session`].
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Name of the save entry in the key-value store.
    pub storage_key: String,
    /// Minimum simulated seconds between autosaves. 0 saves every frame.
    pub autosave_interval_secs: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            autosave_interval_secs: 0.0,
        }
    }
}
