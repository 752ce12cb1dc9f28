use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::Round;
use crate::random::RandomSource;

/// Points for a correct call.
pub const COIN_FLIP_REWARD: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub enum CoinFace {
    Heads,
    Tails,
}

impl CoinFace {
    pub const ALL: [CoinFace; 2] = [CoinFace::Heads, CoinFace::Tails];

    pub fn name(&self) -> &'static str {
        match self {
            CoinFace::Heads => "heads",
            CoinFace::Tails => "tails",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "heads" | "h" => Some(CoinFace::Heads),
            "tails" | "t" => Some(CoinFace::Tails),
            _ => None,
        }
    }
}

/// Fair toss: heads below one half.
pub fn toss(rng: &mut impl RandomSource) -> CoinFace {
    if rng.draw() < 0.5 {
        CoinFace::Heads
    } else {
        CoinFace::Tails
    }
}

pub fn flip(rng: &mut impl RandomSource, prediction: CoinFace) -> Round<CoinFace> {
    let outcome = toss(rng);
    let correct = outcome == prediction;
    Round {
        prediction,
        outcome,
        correct,
        reward: if correct { COIN_FLIP_REWARD } else { 0 },
    }
}
