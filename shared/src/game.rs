use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Screens of a session. `Spinner` is the hub, the rest are mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub enum MiniGame {
    #[default]
    Spinner,
    CoinFlip,
    DiceKingdom,
    MarbleCollector,
    Plinko,
}

impl MiniGame {
    /// Header title shown while this screen is active.
    pub fn title(&self) -> &'static str {
        match self {
            MiniGame::Spinner => "Probability Spinner",
            MiniGame::CoinFlip => "Coin Flip Challenge",
            MiniGame::DiceKingdom => "Dice Kingdom",
            MiniGame::MarbleCollector => "Monster Marble Collector",
            MiniGame::Plinko => "Probability Plinko",
        }
    }
}

/// A labelled wedge of the spinner wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub game: MiniGame,
    pub label: &'static str,
}

/// Wheel segments in angular order, starting at angle zero.
pub const SEGMENTS: [Segment; 4] = [
    Segment {
        game: MiniGame::CoinFlip,
        label: "Coin Flip",
    },
    Segment {
        game: MiniGame::DiceKingdom,
        label: "Dice Kingdom",
    },
    Segment {
        game: MiniGame::MarbleCollector,
        label: "Marble Collector",
    },
    Segment {
        game: MiniGame::Plinko,
        label: "Plinko",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mini_game_serializes_camel_case() {
        let json = serde_json::to_string(&MiniGame::MarbleCollector).unwrap();
        assert_eq!(json, "\"marbleCollector\"");
        let parsed: MiniGame = serde_json::from_str("\"diceKingdom\"").unwrap();
        assert_eq!(parsed, MiniGame::DiceKingdom);
    }

    #[test]
    fn segments_cover_every_mini_game_once() {
        for game in [
            MiniGame::CoinFlip,
            MiniGame::DiceKingdom,
            MiniGame::MarbleCollector,
            MiniGame::Plinko,
        ] {
            assert_eq!(SEGMENTS.iter().filter(|s| s.game == game).count(), 1);
        }
        assert!(SEGMENTS.iter().all(|s| s.game != MiniGame::Spinner));
    }
}
