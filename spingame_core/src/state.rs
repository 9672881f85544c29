use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GameConfig;
use crate::symbols::{Reels, Symbol, Wager};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub balance: u64,
    pub reels: Reels,
    pub spinning: bool,
    pub wager: Wager,
    pub muted: bool,
    pub last_win: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl GameState {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            balance: cfg.starting_balance,
            reels: [Symbol::default(); 3],
            spinning: false,
            wager: cfg.default_wager,
            muted: false,
            last_win: 0,
        }
    }

    /// Whether the spin control is enabled.
    pub fn can_spin(&self) -> bool {
        !self.spinning && self.balance >= self.wager.amount()
    }

    pub fn phase(&self) -> SpinPhase {
        if self.spinning {
            SpinPhase::Shuffling
        } else {
            SpinPhase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinPhase {
    Idle,
    Shuffling,
}

impl fmt::Display for SpinPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinPhase::Idle => f.write_str("idle"),
            SpinPhase::Shuffling => f.write_str("shuffling"),
        }
    }
}

pub type Subscriber = Box<dyn FnMut(&GameState)>;

/// Holds the one `GameState` and tells subscribers about every write.
/// Setters do not validate; callers own the invariants.
#[derive(Default)]
pub struct Store {
    state: GameState,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn subscribe(&mut self, f: impl FnMut(&GameState) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    pub fn set_balance(&mut self, balance: u64) {
        self.update(|s| s.balance = balance);
    }

    pub fn set_reels(&mut self, reels: Reels) {
        self.update(|s| s.reels = reels);
    }

    pub fn set_spinning(&mut self, spinning: bool) {
        self.update(|s| s.spinning = spinning);
    }

    pub fn set_wager(&mut self, wager: Wager) {
        self.update(|s| s.wager = wager);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.update(|s| s.muted = muted);
    }

    pub fn set_last_win(&mut self, last_win: u64) {
        self.update(|s| s.last_win = last_win);
    }

    fn update(&mut self, f: impl FnOnce(&mut GameState)) {
        f(&mut self.state);
        for sub in self.subscribers.iter_mut() {
            sub(&self.state);
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
