//! Double-helix state and geometry.
//!
//! [`HelixState`] holds the only value that changes between frames, the
//! rotation phase. [`HelixGeometry`] turns a phase into the frame's
//! depth-tagged primitives.

mod geometry;

use std::f32::consts::TAU;

pub use geometry::{HelixGeometry, StrandPoint, PRIMITIVES_PER_SLOT};

/// Wrap `phase` into [0, 2π).
///
/// Works for negative input too, so the helix can spin either way.
#[must_use]
pub fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative input.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Rotation phase of the helix, in radians, always in [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HelixState {
    phase: f32,
}

impl HelixState {
    /// State at phase 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// State at `phase`, wrapped into range.
    #[must_use]
    pub fn with_phase(phase: f32) -> Self {
        Self {
            phase: wrap_phase(phase),
        }
    }

    /// Current phase in [0, 2π).
    #[must_use]
    pub const fn phase(&self) -> f32 {
        self.phase
    }

    /// Step the phase by `delta` radians, wrapping past a full turn.
    pub fn advance(&mut self, delta: f32) {
        self.phase = wrap_phase(self.phase + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates() {
        let mut state = HelixState::new();
        state.advance(0.01);
        state.advance(0.01);
        assert!((state.phase() - 0.02).abs() < 1e-7);
    }

    #[test]
    fn advance_past_full_turn_subtracts_tau() {
        let start = TAU - 0.005;
        let mut state = HelixState::with_phase(start);
        state.advance(0.01);
        let expected = start + 0.01 - TAU;
        assert!((state.phase() - expected).abs() < 1e-5);
        assert!(state.phase() < TAU);
    }

    #[test]
    fn negative_speed_wraps_from_below() {
        let mut state = HelixState::new();
        state.advance(-0.25);
        assert!((state.phase() - (TAU - 0.25)).abs() < 1e-5);
    }

    #[test]
    fn phase_stays_in_range_over_long_runs() {
        let mut state = HelixState::new();
        for _ in 0..100_000 {
            state.advance(0.37);
            assert!((0.0..TAU).contains(&state.phase()));
        }
    }

    #[test]
    fn wrap_handles_tiny_negative_input() {
        let wrapped = wrap_phase(-1e-9);
        assert!((0.0..TAU).contains(&wrapped));
    }
}
