use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SymbolError, WagerError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Symbol {
    #[default]
    Diamond,
    Crown,
    MoneyBag,
    SlotMachine,
    Star,
}

impl Symbol {
    /// The reel alphabet, in index order.
    pub const ALL: [Symbol; 5] = [
        Symbol::Diamond,
        Symbol::Crown,
        Symbol::MoneyBag,
        Symbol::SlotMachine,
        Symbol::Star,
    ];

    pub fn from_index(i: u8) -> Result<Self, SymbolError> {
        Self::ALL
            .get(i as usize)
            .copied()
            .ok_or(SymbolError::UnknownIndex(i))
    }

    pub fn to_index(self) -> u8 {
        match self {
            Symbol::Diamond => 0,
            Symbol::Crown => 1,
            Symbol::MoneyBag => 2,
            Symbol::SlotMachine => 3,
            Symbol::Star => 4,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Symbol::Diamond => "💎",
            Symbol::Crown => "👑",
            Symbol::MoneyBag => "💰",
            Symbol::SlotMachine => "🎰",
            Symbol::Star => "⭐",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// The three visible reel slots, left to right.
pub type Reels = [Symbol; 3];

pub fn reels_to_string(reels: &Reels) -> String {
    reels
        .iter()
        .map(|s| s.glyph())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stake for a single spin. Only the amounts on the selector exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(try_from = "u64", into = "u64")]
pub enum Wager {
    #[default]
    Ten,
    Fifty,
    Hundred,
    FiveHundred,
}

impl Wager {
    pub const ALL: [Wager; 4] = [Wager::Ten, Wager::Fifty, Wager::Hundred, Wager::FiveHundred];

    pub fn amount(self) -> u64 {
        match self {
            Wager::Ten => 10,
            Wager::Fifty => 50,
            Wager::Hundred => 100,
            Wager::FiveHundred => 500,
        }
    }
}

impl TryFrom<u64> for Wager {
    type Error = WagerError;

    fn try_from(amount: u64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|w| w.amount() == amount)
            .ok_or(WagerError::Unsupported(amount))
    }
}

impl From<Wager> for u64 {
    fn from(w: Wager) -> u64 {
        w.amount()
    }
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount())
    }
}
