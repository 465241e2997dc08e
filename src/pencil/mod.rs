//! Pencilsmith: an incremental pencil-making game.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod logic;
pub mod render;
pub mod save;
pub mod session;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::click::ClickState;
use crate::time::Clock;

use actions::{Action, CONFIRM_KEY, RESET_KEY};
use save::SaveStore;
use session::Session;

/// The session plus the little UI state the adapter needs.
pub struct PencilGame<C: Clock, S: SaveStore> {
    pub session: Session<C, S>,
    /// Reset was requested and awaits confirmation.
    pub confirm_reset: bool,
}

impl<C: Clock, S: SaveStore> PencilGame<C, S> {
    pub fn new(session: Session<C, S>) -> Self {
        Self {
            session,
            confirm_reset: false,
        }
    }

    /// Handle a key press. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: char) -> bool {
        if self.confirm_reset {
            self.confirm_reset = false;
            if key == CONFIRM_KEY {
                // Reset cannot fail.
                let _ = self.session.dispatch(Action::Reset);
            }
            return true;
        }
        if key == RESET_KEY {
            self.confirm_reset = true;
            return true;
        }

        let upgrade_count = self.session.state.upgrades.len();
        match Action::from_key(key, upgrade_count) {
            Some(action) => {
                // Effect failures are logged inside the engine.
                let _ = self.session.dispatch(action);
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self) {
        self.session.frame();
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.session.snapshot(), self.confirm_reset, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pencil::config::SessionConfig;
    use crate::pencil::save::MemoryStore;
    use crate::time::ManualClock;

    fn game() -> PencilGame<ManualClock, MemoryStore> {
        PencilGame::new(Session::new(
            ManualClock::default(),
            MemoryStore::default(),
            SessionConfig::default(),
        ))
    }

    #[test]
    fn pencil_key_makes_pencils() {
        let mut g = game();
        assert!(g.handle_key('p'));
        assert!((g.session.state.pencils - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_key_is_not_consumed() {
        let mut g = game();
        assert!(!g.handle_key('z'));
    }

    #[test]
    fn upgrade_key_buys_upgrade() {
        let mut g = game();
        g.session.state.pencils = 30.0;
        g.session.state.funds = 50.0;
        assert!(g.handle_key('a'));
        assert!(g.session.state.is_bought("better-wood"));
        g.handle_key('p');
        assert!((g.session.state.pencils - 32.0).abs() < 1e-9);
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut g = game();
        g.handle_key('p');
        assert!(g.handle_key(RESET_KEY));
        assert!(g.confirm_reset);
        assert!(g.handle_key('n'));
        assert!(!g.confirm_reset);
        assert!((g.session.state.pencils - 1.0).abs() < 1e-9);

        g.handle_key(RESET_KEY);
        assert!(g.handle_key(CONFIRM_KEY));
        assert_eq!(g.session.state.pencils, 0.0);
    }

    #[test]
    fn cancelling_key_is_swallowed() {
        let mut g = game();
        g.handle_key(RESET_KEY);
        // 'p' cancels the reset instead of making a pencil.
        assert!(g.handle_key('p'));
        assert_eq!(g.session.state.pencils, 0.0);
    }

    #[test]
    fn tick_advances_session() {
        let mut g = game();
        g.session.state.workers = 10;
        g.session.clock().advance(1000.0);
        g.tick();
        assert!((g.session.state.pencils - 10.0).abs() < 1e-9);
    }
}
