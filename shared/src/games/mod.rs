//! Random-process simulators, one per mini-game.
//!
//! Each simulator samples its outcome from a [`RandomSource`](crate::random::RandomSource)
//! in a single synchronous call and reports whether the player's prediction
//! was right together with the points it earns.

pub mod coin_flip;
pub mod dice;
pub mod marble;
pub mod plinko;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sound the presentation layer plays when a result is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub enum SoundCue {
    Success,
    Hit,
}

impl SoundCue {
    pub fn for_verdict(correct: bool) -> Self {
        if correct {
            SoundCue::Success
        } else {
            SoundCue::Hit
        }
    }
}

/// Result of one predicted round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round<O> {
    pub prediction: O,
    pub outcome: O,
    pub correct: bool,
    pub reward: u32,
}

impl<O> Round<O> {
    pub fn cue(&self) -> SoundCue {
        SoundCue::for_verdict(self.correct)
    }
}
