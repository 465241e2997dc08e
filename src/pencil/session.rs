//! One running game: economy state plus its clock, save store and settings.
//!
//! The host calls [`Session::frame`] once per rendered frame and
//! [`Session::dispatch`] for each player intent. Nothing here blocks, and
//! persistence failures never interrupt play.

use crate::time::{Clock, FrameClock};

use super::actions::Action;
use super::catalog::EffectError;
use super::config::SessionConfig;
use super::logic;
use super::save::{self, SaveStore};
use super::state::{EconomyState, Snapshot};

pub struct Session<C: Clock, S: SaveStore> {
    pub state: EconomyState,
    clock: C,
    frames: FrameClock,
    store: S,
    config: SessionConfig,
    /// Simulated seconds since the last autosave.
    since_save: f64,
}

impl<C: Clock, S: SaveStore> Session<C, S> {
    /// Start a session, restoring the saved game if there is one.
    pub fn new(clock: C, mut store: S, config: SessionConfig) -> Self {
        let mut state = EconomyState::new();
        match save::load_game(&mut state, &mut store, &config.storage_key) {
            Ok(true) => log::info!("save restored ({} pencils)", state.pencils.floor()),
            Ok(false) => log::info!("no save found, starting fresh"),
            Err(e) => log::warn!("load failed, starting fresh: {}", e),
        }

        let mut frames = FrameClock::new();
        frames.restart(clock.now_ms());
        Self {
            state,
            clock,
            frames,
            store,
            config,
            since_save: 0.0,
        }
    }

    /// Advance by the wall-clock time since the previous frame and autosave
    /// when due. Returns the elapsed seconds.
    pub fn frame(&mut self) -> f64 {
        let delta = self.frames.update(self.clock.now_ms());
        logic::tick(&mut self.state, delta);

        self.since_save += delta;
        if self.since_save >= self.config.autosave_interval_secs {
            self.save();
        }
        delta
    }

    /// Apply a player action and save.
    ///
    /// `Ok(false)` means the action was rejected (e.g. unaffordable) and
    /// nothing changed. An `Err` means an upgrade was bought but its effect
    /// failed.
    pub fn dispatch(&mut self, action: Action) -> Result<bool, EffectError> {
        let state = &mut self.state;
        let result = match action {
            Action::MakePencil => {
                logic::click(state);
                Ok(true)
            }
            Action::BuyWorker => Ok(logic::buy_worker(state)),
            Action::BuySharpener => Ok(logic::buy_sharpener(state)),
            Action::Sell => Ok(logic::sell(state).is_some()),
            Action::RaisePrice => {
                logic::raise_price(state);
                Ok(true)
            }
            Action::LowerPrice => {
                logic::lower_price(state);
                Ok(true)
            }
            Action::BuyUpgrade(idx) => logic::buy_upgrade(state, idx),
            Action::Reset => {
                self.reset();
                return Ok(true);
            }
        };
        if !matches!(result, Ok(false)) {
            self.save();
        }
        result
    }

    /// Delete the save and start over from a fresh state.
    pub fn reset(&mut self) {
        if let Err(e) = save::delete_save(&mut self.store, &self.config.storage_key) {
            log::warn!("could not clear save: {}", e);
        }
        self.state = EconomyState::new();
        self.frames.restart(self.clock.now_ms());
        self.since_save = 0.0;
        log::info!("game reset");
    }

    /// Best-effort save. Failures are logged and play continues.
    pub fn save(&mut self) {
        self.since_save = 0.0;
        if let Err(e) = save::save_game(&self.state, &mut self.store, &self.config.storage_key) {
            log::warn!("save failed: {}", e);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        logic::snapshot(&self.state)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
