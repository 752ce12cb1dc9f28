//! Spinner wheel: spin-down physics and segment selection.
//!
//! The wheel is a tiny state machine stepped by [`step_spinner`]. Whatever
//! drives it (a render loop, a tokio interval, a test) only supplies the
//! elapsed time. Segment resolution is the pure [`select_segment`].

use std::f64::consts::{PI, TAU};

use crate::config::SpinnerConfig;
use crate::game::{MiniGame, SEGMENTS};
use crate::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpinnerState {
    /// Accumulated rotation in radians, unbounded.
    pub rotation: f64,
    pub velocity: f64,
    pub phase: SpinPhase,
}

impl SpinnerState {
    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }
}

/// Segment picked by the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub index: usize,
    /// Shortest-arc distance between the segment center and the pointer.
    pub distance: f64,
}

impl Selection {
    /// Mini-game on the wheel's segment, if the index is one of [`SEGMENTS`].
    pub fn game(&self) -> Option<MiniGame> {
        SEGMENTS.get(self.index).map(|s| s.game)
    }
}

/// `n mod m` in `[0, m)` for positive `m`, also for negative `n`.
pub fn euclidean_modulo(n: f64, m: f64) -> f64 {
    n.rem_euclid(m)
}

/// Shortest arc between two angles already in `[0, 2π)`.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let delta = (a - b).abs();
    if delta > PI {
        TAU - delta
    } else {
        delta
    }
}

/// Center of segment `index` after the wheel turned by `rotation`, in `[0, 2π)`.
pub fn segment_center(index: usize, segment_count: usize, rotation: f64) -> f64 {
    let width = TAU / segment_count as f64;
    euclidean_modulo(index as f64 * width + width / 2.0 + rotation, TAU)
}

/// Segment whose center is closest to `pointer_angle`. The first index wins
/// ties. `segment_count` must be at least one.
pub fn select_segment(rotation: f64, segment_count: usize, pointer_angle: f64) -> Selection {
    let mut best = Selection {
        index: 0,
        distance: f64::INFINITY,
    };
    for index in 0..segment_count {
        let center = segment_center(index, segment_count, rotation);
        let distance = angular_distance(center, pointer_angle);
        if distance < best.distance {
            best = Selection { index, distance };
        }
    }
    best
}

/// Start a spin. Returns `None` while the wheel is still turning.
pub fn launch(
    state: SpinnerState,
    config: &SpinnerConfig,
    rng: &mut impl RandomSource,
) -> Option<SpinnerState> {
    if state.is_spinning() {
        return None;
    }
    let velocity = config.velocity_min + rng.draw() * (config.velocity_max - config.velocity_min);
    Some(SpinnerState {
        rotation: state.rotation,
        velocity,
        phase: SpinPhase::Spinning,
    })
}

/// Advance the wheel by `dt`. Yields the selection on the tick it stops.
pub fn step_spinner(
    mut state: SpinnerState,
    dt: f64,
    config: &SpinnerConfig,
    segment_count: usize,
) -> (SpinnerState, Option<Selection>) {
    if !state.is_spinning() {
        return (state, None);
    }

    state.rotation += state.velocity * dt;
    state.velocity *= config.decay;

    if state.velocity < config.stop_threshold {
        state.velocity = 0.0;
        state.phase = SpinPhase::Idle;
        let selection = select_segment(state.rotation, segment_count, config.pointer_angle);
        (state, Some(selection))
    } else {
        (state, None)
    }
}
