pub mod config;
pub mod cue;
pub mod engine;
pub mod error;
pub mod paytable;
pub mod rng;
pub mod scheduler;
pub mod state;
pub mod symbols;

pub use crate::config::GameConfig;
pub use crate::cue::{Cue, CueGate, CuePlayer, RecordingCues, SilentCues};
pub use crate::engine::{SpinGame, SpinRejection, SpinResult, SpinStart};
pub use crate::error::{ConfigError, CueError, SymbolError, WagerError};
pub use crate::paytable::{classify, evaluate, Payout, PAYTABLE};
pub use crate::rng::{RandSymbols, ScriptedSymbols, SymbolSource};
pub use crate::scheduler::{
    Scheduler, SpinId, TimerEvent, TimerHandle, TimerKind, VirtualHandle, VirtualScheduler,
};
pub use crate::state::{GameState, SpinPhase, Store};
pub use crate::symbols::{reels_to_string, Reels, Symbol, Wager};

/// Display name of the in-game currency.
pub const CURRENCY: &str = "MODS";
