use crate::symbols::{Reels, Wager};
use serde::{Deserialize, Serialize};

/// Payout class of a final outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Payout {
    Triple,
    AdjacentPair,
    Miss,
}

impl Payout {
    pub fn multiplier(self) -> u64 {
        match self {
            Payout::Triple => 10,
            Payout::AdjacentPair => 2,
            Payout::Miss => 0,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Payout::Triple => "three of a kind",
            Payout::AdjacentPair => "adjacent pair (left two or right two)",
            Payout::Miss => "anything else",
        }
    }
}

/// Rules in evaluation order; the first match pays.
pub const PAYTABLE: [Payout; 3] = [Payout::Triple, Payout::AdjacentPair, Payout::Miss];

// Only neighbouring reels form a pair: [A, B, A] is a miss.
pub fn classify(reels: &Reels) -> Payout {
    let [a, b, c] = *reels;
    if a == b && b == c {
        Payout::Triple
    } else if a == b || b == c {
        Payout::AdjacentPair
    } else {
        Payout::Miss
    }
}

pub fn evaluate(reels: &Reels, wager: Wager) -> u64 {
    classify(reels).multiplier() * wager.amount()
}
