//! Scripted players that stand in for a human at the controls.
//!
//! An autoplayer is a small state machine that:
//! - Looks at the latest [`Snapshot`]
//! - Answers with the command a player would send next
//! - Heads back to the spinner after a few rounds in each mini-game
//!
//! Strategies differ only in the predictions they make.

use probability_shared::game::MiniGame;
use probability_shared::games::coin_flip::CoinFace;
use probability_shared::games::marble::MarbleColor;
use probability_shared::games::plinko::{Slot, SLOT_COUNT};
use probability_shared::protocol::{Command, JarView, Snapshot};
use probability_shared::random::RandomSource;

/// How an autoplayer picks its predictions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Heads, red and the center slot, every time
    Stubborn,
    /// Uniform picks among all options
    Random,
    /// Heads, the color with the most marbles left, and the center slot
    Informed,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Stubborn, Strategy::Random, Strategy::Informed];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Stubborn => "stubborn",
            Strategy::Random => "random",
            Strategy::Informed => "informed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }

    fn coin_prediction(&self, rng: &mut impl RandomSource) -> CoinFace {
        match self {
            Strategy::Random => CoinFace::ALL[rng.index(CoinFace::ALL.len())],
            Strategy::Stubborn | Strategy::Informed => CoinFace::Heads,
        }
    }

    fn marble_prediction(&self, jar: &JarView, rng: &mut impl RandomSource) -> MarbleColor {
        match self {
            Strategy::Stubborn => MarbleColor::Red,
            Strategy::Random => MarbleColor::ALL[rng.index(MarbleColor::ALL.len())],
            Strategy::Informed => jar.most_likely.unwrap_or(MarbleColor::Red),
        }
    }

    fn slot_prediction(&self, rng: &mut impl RandomSource) -> Slot {
        match self {
            Strategy::Random => Slot::new(rng.index(SLOT_COUNT) as u8).unwrap_or(Slot::CENTER),
            Strategy::Stubborn | Strategy::Informed => Slot::CENTER,
        }
    }
}

/// A player that automatically plays the session
#[derive(Debug)]
pub struct AutoPlayer {
    pub strategy: Strategy,
    /// Rounds to play on each mini-game visit
    rounds_per_visit: u32,
    rounds_played: u32,
}

impl AutoPlayer {
    pub fn new(strategy: Strategy, rounds_per_visit: u32) -> Self {
        Self {
            strategy,
            rounds_per_visit: rounds_per_visit.max(1),
            rounds_played: 0,
        }
    }

    /// Next command for the screen in `snapshot`. `None` means wait.
    pub fn next_command(
        &mut self,
        snapshot: &Snapshot,
        rng: &mut impl RandomSource,
    ) -> Option<Command> {
        let session = &snapshot.session;
        if session.is_transitioning {
            return None;
        }

        let game = session.current_game;
        if game == MiniGame::Spinner {
            self.rounds_played = 0;
            return (!snapshot.spinner.spinning).then_some(Command::Spin);
        }

        if self.rounds_played >= self.rounds_per_visit {
            return Some(Command::ReturnToSpinner);
        }

        let command = match game {
            MiniGame::CoinFlip => Command::FlipCoin {
                prediction: self.strategy.coin_prediction(rng),
            },
            MiniGame::DiceKingdom => Command::RollDice,
            MiniGame::MarbleCollector => {
                if snapshot.jar.marbles.is_empty() {
                    return Some(Command::ResetJar);
                }
                Command::DrawMarble {
                    prediction: self.strategy.marble_prediction(&snapshot.jar, rng),
                }
            }
            MiniGame::Plinko => match snapshot.board.prediction {
                None => {
                    return Some(Command::SelectSlot {
                        slot: self.strategy.slot_prediction(rng),
                    })
                }
                Some(_) => Command::DropBall,
            },
            MiniGame::Spinner => return None,
        };
        self.rounds_played += 1;
        Some(command)
    }
}
