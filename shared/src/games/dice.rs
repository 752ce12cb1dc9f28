use crate::random::RandomSource;

/// Points per collected resource. Always granted; there is no prediction.
pub const POINTS_PER_RESOURCE: u32 = 5;

/// Percent chance of each two-die sum, index 0 is sum 2.
const SUM_PROBABILITY_PERCENT: [f64; 11] = [
    2.8, 5.6, 8.3, 11.1, 13.9, 16.7, 13.9, 11.1, 8.3, 5.6, 2.8,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    pub first: u8,
    pub second: u8,
}

impl DiceRoll {
    pub fn sum(&self) -> u8 {
        self.first + self.second
    }

    pub fn resources(&self) -> u32 {
        resources_for(self.first, self.second)
    }

    pub fn reward(&self) -> u32 {
        self.resources() * POINTS_PER_RESOURCE
    }

    pub fn sum_probability(&self) -> f64 {
        sum_probability_percent(self.sum())
    }
}

/// One fair die, 1..=6.
pub fn roll_die(rng: &mut impl RandomSource) -> u8 {
    rng.index(6) as u8 + 1
}

pub fn roll_pair(rng: &mut impl RandomSource) -> DiceRoll {
    let first = roll_die(rng);
    let second = roll_die(rng);
    DiceRoll { first, second }
}

pub fn resources_for(first: u8, second: u8) -> u32 {
    (first as u32 + second as u32) / 2
}

/// Theoretical chance of a sum, in percent. Zero outside 2..=12.
pub fn sum_probability_percent(sum: u8) -> f64 {
    match sum {
        2..=12 => SUM_PROBABILITY_PERCENT[(sum - 2) as usize],
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, ScriptedDraws};

    #[test]
    fn draws_map_to_faces() {
        let mut rng = ScriptedDraws::new([0.0, 0.17, 0.5, 0.999]);
        assert_eq!(roll_die(&mut rng), 1);
        assert_eq!(roll_die(&mut rng), 2);
        assert_eq!(roll_die(&mut rng), 4);
        assert_eq!(roll_die(&mut rng), 6);
    }

    #[test]
    fn resources_are_half_the_sum_rounded_down() {
        for first in 1..=6u8 {
            for second in 1..=6u8 {
                let expected = ((first + second) / 2) as u32;
                assert_eq!(resources_for(first, second), expected);
            }
        }
    }

    #[test]
    fn example_rolls_collect_nine() {
        let rolls = [
            DiceRoll { first: 3, second: 4 },
            DiceRoll { first: 6, second: 6 },
        ];
        assert_eq!(rolls[0].resources(), 3);
        assert_eq!(rolls[1].resources(), 6);
        assert_eq!(rolls.iter().map(DiceRoll::resources).sum::<u32>(), 9);
        assert_eq!(rolls[1].reward(), 30);
    }

    #[test]
    fn probability_table_is_theoretical() {
        assert_eq!(sum_probability_percent(7), 16.7);
        assert_eq!(sum_probability_percent(2), 2.8);
        assert_eq!(sum_probability_percent(12), 2.8);
        assert_eq!(sum_probability_percent(1), 0.0);
        assert_eq!(sum_probability_percent(13), 0.0);

        for sum in 2..=12u8 {
            let ways = 6 - (7 - sum as i32).abs();
            let exact = ways as f64 / 36.0 * 100.0;
            assert!((sum_probability_percent(sum) - exact).abs() < 0.06);
        }
    }

    #[test]
    fn seeded_rolls_stay_in_range() {
        let mut rng = RngSource::seeded(11);
        for _ in 0..1_000 {
            let roll = roll_pair(&mut rng);
            assert!((1..=6).contains(&roll.first));
            assert!((1..=6).contains(&roll.second));
            assert!((2..=12).contains(&roll.sum()));
        }
    }
}
