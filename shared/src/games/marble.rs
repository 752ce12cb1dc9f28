//! Marble jar sampled without replacement.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::Round;
use crate::random::RandomSource;

/// Points for naming the drawn color.
pub const MARBLE_REWARD: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub enum MarbleColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl MarbleColor {
    pub const ALL: [MarbleColor; 4] = [
        MarbleColor::Red,
        MarbleColor::Blue,
        MarbleColor::Green,
        MarbleColor::Yellow,
    ];

    /// Marbles of this color in a full jar.
    pub fn initial_count(&self) -> usize {
        match self {
            MarbleColor::Red => 3,
            MarbleColor::Blue => 2,
            MarbleColor::Green => 3,
            MarbleColor::Yellow => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarbleColor::Red => "red",
            MarbleColor::Blue => "blue",
            MarbleColor::Green => "green",
            MarbleColor::Yellow => "yellow",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Ordered multiset of marbles. Drawing removes the marble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarbleJar {
    marbles: Vec<MarbleColor>,
}

impl Default for MarbleJar {
    fn default() -> Self {
        Self::new()
    }
}

impl MarbleJar {
    /// A full jar: reds, then blues, greens and yellows.
    pub fn new() -> Self {
        let marbles = MarbleColor::ALL
            .iter()
            .flat_map(|c| std::iter::repeat(*c).take(c.initial_count()))
            .collect();
        Self { marbles }
    }

    pub fn initial_size() -> usize {
        MarbleColor::ALL.iter().map(MarbleColor::initial_count).sum()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn len(&self) -> usize {
        self.marbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marbles.is_empty()
    }

    pub fn marbles(&self) -> &[MarbleColor] {
        &self.marbles
    }

    pub fn count(&self, color: MarbleColor) -> usize {
        self.marbles.iter().filter(|m| **m == color).count()
    }

    /// Chance of drawing `color` next, in percent. Zero for an empty jar.
    pub fn probability_percent(&self, color: MarbleColor) -> f64 {
        if self.marbles.is_empty() {
            return 0.0;
        }
        self.count(color) as f64 / self.marbles.len() as f64 * 100.0
    }

    /// Color with the most marbles left; earlier colors win ties.
    pub fn most_likely(&self) -> Option<MarbleColor> {
        let mut best: Option<(MarbleColor, usize)> = None;
        for color in MarbleColor::ALL {
            let count = self.count(color);
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((color, count));
            }
        }
        best.map(|(color, _)| color)
    }

    /// Remove one uniformly chosen marble. `None` when the jar is empty.
    pub fn take(&mut self, rng: &mut impl RandomSource) -> Option<MarbleColor> {
        if self.marbles.is_empty() {
            return None;
        }
        let idx = rng.index(self.marbles.len());
        Some(self.marbles.remove(idx))
    }

    pub fn draw(
        &mut self,
        rng: &mut impl RandomSource,
        prediction: MarbleColor,
    ) -> Option<Round<MarbleColor>> {
        let outcome = self.take(rng)?;
        let correct = outcome == prediction;
        Some(Round {
            prediction,
            outcome,
            correct,
            reward: if correct { MARBLE_REWARD } else { 0 },
        })
    }
}
