//! Pencilsmith save/load.
//!
//! Only base counters and the bought flags are written. Modifiers are
//! rebuilt on load by replaying the bought upgrades' effects.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current format. Bump it when the layout changes.
//! - Records without a `version` field come from the original single-file
//!   game and load as version 0. Their derived fields (`perClick`, `demand`,
//!   `sharpenerPowerMultiplier`, ...) are ignored. Their `price` already has
//!   the price upgrades multiplied in, so it is divided back to a base price
//!   after the modifiers are rebuilt; the charged price stays what it was.
//! - Records newer than `SAVE_VERSION` are rejected and discarded.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::MIN_PRICE;
use super::logic::rebuild_modifiers;
use super::state::EconomyState;

pub const SAVE_VERSION: u32 = 1;

/// Serialized form of a game session.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SaveData {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub state: StateSave,
    #[serde(default)]
    pub upgrades: Vec<UpgradeSave>,
}

/// Persisted economy counters. Missing keys keep their starting value.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StateSave {
    pub pencils: f64,
    pub inventory: f64,
    pub funds: f64,
    pub price: f64,
    pub workers: u32,
    pub sharpeners: u32,
    pub creativity: f64,
    pub reputation: f64,
}

impl Default for StateSave {
    fn default() -> Self {
        extract_state(&EconomyState::new())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct UpgradeSave {
    pub id: String,
    #[serde(default)]
    pub bought: bool,
}

/// Errors that can occur during save/load.
#[derive(Debug)]
pub enum SaveError {
    Json(serde_json::Error),
    /// The key-value store refused the operation.
    Storage(String),
    /// Written by a newer build than this one understands.
    Incompatible { found: u32, supported: u32 },
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Json(e) => write!(f, "malformed save data: {}", e),
            SaveError::Storage(msg) => write!(f, "storage error: {}", msg),
            SaveError::Incompatible { found, supported } => write!(
                f,
                "save version {} is newer than supported version {}",
                found, supported
            ),
        }
    }
}

impl std::error::Error for SaveError {}

/// A named-entry key-value store holding serialized saves.
pub trait SaveStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;
    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError>;
    fn remove(&mut self, key: &str) -> Result<(), SaveError>;
}

/// In-memory store, used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Browser localStorage. Every operation fails outside a browser window.
#[derive(Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage(&self) -> Result<web_sys::Storage, SaveError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| SaveError::Storage("localStorage unavailable".to_string()))
    }
}

impl SaveStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, data: &str) -> Result<(), SaveError> {
        self.storage()?
            .set_item(key, data)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), SaveError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| SaveError::Storage(format!("{e:?}")))
    }
}

fn extract_state(state: &EconomyState) -> StateSave {
    StateSave {
        pencils: state.pencils,
        inventory: state.inventory,
        funds: state.funds,
        price: state.price,
        workers: state.workers,
        sharpeners: state.sharpeners,
        creativity: state.creativity,
        reputation: state.reputation,
    }
}

/// Extract the persisted part of a session.
pub fn extract_save(state: &EconomyState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        state: extract_state(state),
        upgrades: state
            .upgrades
            .iter()
            .map(|u| UpgradeSave {
                id: u.def.id.to_string(),
                bought: u.bought,
            })
            .collect(),
    }
}

/// Non-negative finite value, or `fallback`.
fn sane(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

/// Replace `state` with a fresh session merged with `save`, then rebuild the
/// modifiers from the bought upgrades. Unknown upgrade ids are ignored.
pub fn apply_save(state: &mut EconomyState, save: &SaveData) {
    let fresh = EconomyState::new();
    let s = &save.state;
    let price = sane(s.price, fresh.price);
    *state = EconomyState {
        pencils: sane(s.pencils, fresh.pencils),
        inventory: sane(s.inventory, fresh.inventory),
        funds: sane(s.funds, fresh.funds),
        price: if price > 0.0 { price } else { MIN_PRICE },
        workers: s.workers,
        sharpeners: s.sharpeners,
        creativity: sane(s.creativity, fresh.creativity),
        reputation: sane(s.reputation, fresh.reputation),
        ..fresh
    };
    state.inventory = state.inventory.min(state.pencils);

    for saved in save.upgrades.iter().filter(|u| u.bought) {
        match state.upgrades.iter_mut().find(|u| u.def.id == saved.id) {
            Some(u) => u.bought = true,
            None => log::warn!("ignoring unknown upgrade in save: {}", saved.id),
        }
    }

    // Failures are logged by rebuild_modifiers; the session carries on.
    let _ = rebuild_modifiers(state);

    if save.version == 0 {
        state.price /= state.modifiers.price_multiplier;
    }
}

pub fn to_json(state: &EconomyState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&extract_save(state))?)
}

/// Parse a save record and check its version.
pub fn from_json(json: &str) -> Result<SaveData, SaveError> {
    let data: SaveData = serde_json::from_str(json)?;
    if data.version > SAVE_VERSION {
        return Err(SaveError::Incompatible {
            found: data.version,
            supported: SAVE_VERSION,
        });
    }
    Ok(data)
}

/// Write the session to `store` under `key`.
pub fn save_game(state: &EconomyState, store: &mut dyn SaveStore, key: &str) -> Result<(), SaveError> {
    let json = to_json(state)?;
    store.write(key, &json)
}

/// Restore the session from `store`. Returns `Ok(false)` when there is no
/// save. Unreadable or incompatible saves are removed and reported as errors,
/// leaving `state` untouched.
pub fn load_game(state: &mut EconomyState, store: &mut dyn SaveStore, key: &str) -> Result<bool, SaveError> {
    let json = match store.read(key)? {
        Some(j) => j,
        None => return Ok(false),
    };

    let data = match from_json(&json) {
        Ok(d) => d,
        Err(e) => {
            let _ = store.remove(key);
            return Err(e);
        }
    };

    if data.version < SAVE_VERSION {
        log::info!(
            "migrating save from version {} to {}",
            data.version,
            SAVE_VERSION
        );
    }

    apply_save(state, &data);
    Ok(true)
}

/// Remove the save entry.
pub fn delete_save(store: &mut dyn SaveStore, key: &str) -> Result<(), SaveError> {
    store.remove(key)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_roundtrip_reproduces_bought_set_and_modifiers(
            bought in proptest::collection::vec(any::<bool>(), 13),
            workers in 0u32..1000,
            funds in 0.0f64..1e9,
        ) {
            let mut state = EconomyState::new();
            state.workers = workers;
            state.funds = funds;
            for (u, b) in state.upgrades.iter_mut().zip(&bought) {
                u.bought = *b;
            }
            prop_assert!(rebuild_modifiers(&mut state).is_ok());

            let json = to_json(&state).unwrap();
            let mut restored = EconomyState::new();
            apply_save(&mut restored, &from_json(&json).unwrap());

            let restored_bought: Vec<bool> = restored.upgrades.iter().map(|u| u.bought).collect();
            prop_assert_eq!(restored_bought, bought);
            prop_assert_eq!(&restored.modifiers, &state.modifiers);
            prop_assert_eq!(restored.workers, workers);
            prop_assert!((restored.funds - funds).abs() <= funds * 1e-12);
        }
    }
}
