//! Plinko board: an eight-bounce random walk over nine slots.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::Round;
use crate::random::RandomSource;

pub const SLOT_COUNT: usize = 9;
pub const BOUNCES: usize = 8;
/// Points for a correct (or center-zone) prediction.
pub const PLINKO_REWARD: u32 = 20;

const START_POSITION: f64 = 4.0;
const BOUNCE_STEP: f64 = 0.5;

/// A landing slot, always in `0..SLOT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/", type = "number")]
#[serde(try_from = "u8", into = "u8")]
pub struct Slot(u8);

impl Slot {
    pub const CENTER: Slot = Slot(4);

    pub fn new(index: u8) -> Option<Self> {
        ((index as usize) < SLOT_COUNT).then_some(Slot(index))
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Slots 3, 4 and 5.
    pub fn in_center_zone(&self) -> bool {
        (3..=5).contains(&self.0)
    }
}

impl TryFrom<u8> for Slot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Slot::new(value).ok_or_else(|| format!("slot {} is outside 0..{}", value, SLOT_COUNT))
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> u8 {
        slot.0
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drop one ball and return where it lands.
pub fn drop_ball(rng: &mut impl RandomSource) -> Slot {
    let mut position = START_POSITION;
    for _ in 0..BOUNCES {
        position += if rng.draw() < 0.5 {
            -BOUNCE_STEP
        } else {
            BOUNCE_STEP
        };
    }
    let slot = position.round().clamp(0.0, (SLOT_COUNT - 1) as f64);
    Slot(slot as u8)
}

/// Exact match, or both slots inside the center zone.
pub fn is_correct(prediction: Slot, landed: Slot) -> bool {
    prediction == landed || (prediction.in_center_zone() && landed.in_center_zone())
}

/// Per-slot landing counts for one board session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlinkoBoard {
    slot_counts: [u32; SLOT_COUNT],
    last_slot: Option<Slot>,
}

impl PlinkoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_counts(&self) -> &[u32; SLOT_COUNT] {
        &self.slot_counts
    }

    pub fn last_slot(&self) -> Option<Slot> {
        self.last_slot
    }

    pub fn total_drops(&self) -> u32 {
        self.slot_counts.iter().sum()
    }

    /// Tallest bar, never below 1 so histograms can divide by it.
    pub fn max_count(&self) -> u32 {
        self.slot_counts.iter().copied().max().unwrap_or(0).max(1)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn drop_round(&mut self, rng: &mut impl RandomSource, prediction: Slot) -> Round<Slot> {
        let outcome = drop_ball(rng);
        self.slot_counts[outcome.index()] += 1;
        self.last_slot = Some(outcome);

        let correct = is_correct(prediction, outcome);
        Round {
            prediction,
            outcome,
            correct,
            reward: if correct { PLINKO_REWARD } else { 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, ScriptedDraws};

    fn slot(i: u8) -> Slot {
        Slot::new(i).unwrap()
    }

    #[test]
    fn all_left_bounces_land_in_slot_zero() {
        let mut rng = ScriptedDraws::new([0.1]);
        assert_eq!(drop_ball(&mut rng), slot(0));
        assert_eq!(rng.consumed(), BOUNCES);
    }

    #[test]
    fn all_right_bounces_land_in_last_slot() {
        let mut rng = ScriptedDraws::new([0.9]);
        assert_eq!(drop_ball(&mut rng), slot(8));
    }

    #[test]
    fn balanced_bounces_land_in_center() {
        let mut rng = ScriptedDraws::new([0.1, 0.9]);
        assert_eq!(drop_ball(&mut rng), Slot::CENTER);
    }

    #[test]
    fn landing_slot_is_always_on_the_board() {
        let mut rng = RngSource::seeded(77);
        let mut board = PlinkoBoard::new();
        for _ in 0..5_000 {
            let round = board.drop_round(&mut rng, Slot::CENTER);
            assert!(round.outcome.index() < SLOT_COUNT);
        }
        assert_eq!(board.total_drops(), 5_000);
        // binomial(8, 1/2): the middle slot is the tallest bar
        let counts = board.slot_counts();
        assert_eq!(board.max_count(), counts[4]);
    }

    #[test]
    fn center_zone_predictions_are_equivalent() {
        for predicted in 3..=5 {
            for landed in 3..=5 {
                assert!(is_correct(slot(predicted), slot(landed)));
            }
        }
    }

    #[test]
    fn outside_center_needs_exact_match() {
        assert!(is_correct(slot(0), slot(0)));
        assert!(!is_correct(slot(2), slot(3)));
        assert!(!is_correct(slot(3), slot(2)));
        assert!(!is_correct(slot(6), slot(5)));
        assert!(!is_correct(slot(8), slot(7)));
    }

    #[test]
    fn drop_records_slot_and_reward() {
        let mut board = PlinkoBoard::new();
        let mut rng = ScriptedDraws::new([0.1, 0.9]);
        let round = board.drop_round(&mut rng, slot(3));
        assert_eq!(round.outcome, Slot::CENTER);
        assert!(round.correct);
        assert_eq!(round.reward, PLINKO_REWARD);
        assert_eq!(board.slot_counts()[4], 1);
        assert_eq!(board.last_slot(), Some(Slot::CENTER));

        let mut left = ScriptedDraws::new([0.1]);
        let miss = board.drop_round(&mut left, slot(4));
        assert!(!miss.correct);
        assert_eq!(miss.reward, 0);
    }

    #[test]
    fn reset_zeroes_counts() {
        let mut board = PlinkoBoard::new();
        let mut rng = RngSource::seeded(3);
        board.drop_round(&mut rng, slot(1));
        board.reset();
        assert_eq!(board.slot_counts(), &[0; SLOT_COUNT]);
        assert_eq!(board.last_slot(), None);
        assert_eq!(board.max_count(), 1);
    }

    #[test]
    fn slot_rejects_out_of_range() {
        assert!(Slot::new(9).is_none());
        assert!(Slot::try_from(12u8).is_err());
        let parsed: Slot = serde_json::from_str("8").unwrap();
        assert_eq!(parsed.index(), 8);
        assert!(serde_json::from_str::<Slot>("9").is_err());
    }

    #[test]
    fn slot_exports_as_typescript_number() {
        assert_eq!(Slot::inline(), "number");
        let path = Slot::output_path().map(|p| p.to_path_buf());
        assert!(path.is_some_and(|p| p.ends_with("bindings/Slot.ts")));
    }
}
