//! Player intents and their key bindings.
//!
//! The presentation layer maps key presses and clicks to an [`Action`] and
//! hands it to the session. It never touches the economy directly.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MakePencil,
    BuyWorker,
    BuySharpener,
    Sell,
    RaisePrice,
    LowerPrice,
    BuyUpgrade(usize),
    /// Wipe the save and start over. Callers confirm with the player first.
    Reset,
}

impl Action {
    /// Map a key press to an action. Reset has no direct key; see
    /// [`RESET_KEY`] and [`CONFIRM_KEY`].
    pub fn from_key(key: char, upgrade_count: usize) -> Option<Action> {
        match key {
            'p' => Some(Action::MakePencil),
            'w' => Some(Action::BuyWorker),
            's' => Some(Action::BuySharpener),
            'x' => Some(Action::Sell),
            '+' | '=' => Some(Action::RaisePrice),
            '-' => Some(Action::LowerPrice),
            c => upgrade_key_index(c)
                .filter(|&i| i < upgrade_count)
                .map(Action::BuyUpgrade),
        }
    }
}

/// Upgrade keys, in catalog order. Disjoint from the action keys above.
const UPGRADE_KEYS: [char; 13] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm'];

/// Asks for reset confirmation.
pub const RESET_KEY: char = 'R';
/// Confirms a pending reset. Any other key cancels it.
pub const CONFIRM_KEY: char = 'y';

fn upgrade_key_index(key: char) -> Option<usize> {
    UPGRADE_KEYS.iter().position(|&k| k == key)
}

/// Key bound to the upgrade at `index`, if any.
pub fn upgrade_key(index: usize) -> Option<char> {
    UPGRADE_KEYS.get(index).copied()
}
