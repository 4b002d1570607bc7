//! Collision and termination rules
//!
//! Every check is a pure predicate over a single candidate position. The
//! simulation asks `classify` once per tick; the individual predicates are
//! public so the renderer and tests can reuse them.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::world::World;
use crate::consts::*;

/// Why a flight ended without reaching the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    Fence,
    OutOfBounds,
    Ground,
}

/// Classification of one candidate position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Safe to commit, keep flying
    Continue,
    Lost(LossReason),
    Won,
}

impl Outcome {
    /// True for outcomes that end the flight
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

/// Ball inside the fence band at a height covered by a fence segment.
///
/// The band is fixed at x ∈ [19.5, 20.5]; segments only contribute their
/// vertical extent.
pub fn hits_fence(pos: DVec2, world: &World) -> bool {
    if pos.x >= FENCE_BAND_MIN_X && pos.x <= FENCE_BAND_MAX_X {
        return world.fence().iter().any(|segment| segment.spans_y(pos.y));
    }
    false
}

/// Ball strictly outside the world bounds
#[inline]
pub fn out_of_bounds(pos: DVec2, world: &World) -> bool {
    !world.bounds().contains(pos)
}

/// Ball at or below the ground tolerance band
#[inline]
pub fn hits_ground(pos: DVec2) -> bool {
    pos.y <= GROUND_TOLERANCE
}

/// Ball inside the square hit box around the target
#[inline]
pub fn hits_target(pos: DVec2, world: &World) -> bool {
    let delta = (pos - world.target()).abs();
    delta.x < TARGET_TOLERANCE && delta.y < TARGET_TOLERANCE
}

/// Classify a candidate position. First match wins:
/// fence, out of bounds, ground (away from the target), target.
pub fn classify(pos: DVec2, world: &World) -> Outcome {
    if hits_fence(pos, world) {
        return Outcome::Lost(LossReason::Fence);
    }
    if out_of_bounds(pos, world) {
        return Outcome::Lost(LossReason::OutOfBounds);
    }
    let on_target = hits_target(pos, world);
    if hits_ground(pos) && !on_target {
        return Outcome::Lost(LossReason::Ground);
    }
    if on_target {
        return Outcome::Won;
    }
    Outcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::reference()
    }

    #[test]
    fn test_fence_gap_is_passable() {
        let world = world();
        assert!(!hits_fence(DVec2::new(20.0, 14.0), &world));
        assert!(hits_fence(DVec2::new(20.0, 10.0), &world));
        // Segment ends are inclusive
        assert!(hits_fence(DVec2::new(20.0, 13.0), &world));
        assert!(hits_fence(DVec2::new(20.0, 16.0), &world));
    }

    #[test]
    fn test_fence_band_edges() {
        let world = world();
        assert!(hits_fence(DVec2::new(19.5, 5.0), &world));
        assert!(hits_fence(DVec2::new(20.5, 5.0), &world));
        assert!(!hits_fence(DVec2::new(19.49, 5.0), &world));
        assert!(!hits_fence(DVec2::new(20.51, 5.0), &world));
    }

    #[test]
    fn test_target_box_is_square() {
        let world = world();
        assert!(hits_target(DVec2::new(30.0, 0.0), &world));
        assert!(!hits_target(DVec2::new(30.6, 0.0), &world));
        // Corner of the box, outside a circle of radius 0.5
        assert!(hits_target(DVec2::new(29.6, 0.4), &world));
        // Tolerance is strict
        assert!(!hits_target(DVec2::new(29.5, 0.0), &world));
    }

    #[test]
    fn test_out_of_bounds_edges() {
        let world = world();
        assert!(out_of_bounds(DVec2::new(-0.1, 5.0), &world));
        assert!(!out_of_bounds(DVec2::new(0.0, 5.0), &world));
        assert!(!out_of_bounds(DVec2::new(30.0, 20.0), &world));
        assert!(out_of_bounds(DVec2::new(10.0, 20.01), &world));
        assert!(out_of_bounds(DVec2::new(10.0, -0.01), &world));
    }

    #[test]
    fn test_ground_tolerance() {
        assert!(hits_ground(DVec2::new(5.0, 0.1)));
        assert!(hits_ground(DVec2::new(5.0, 0.0)));
        assert!(!hits_ground(DVec2::new(5.0, 0.11)));
    }

    #[test]
    fn test_classify_precedence() {
        let world = world();
        // Fence wins over ground at the fence foot
        assert_eq!(
            classify(DVec2::new(20.0, 0.05), &world),
            Outcome::Lost(LossReason::Fence)
        );
        // Below ground is out of bounds before it is a ground hit
        assert_eq!(
            classify(DVec2::new(5.0, -0.01), &world),
            Outcome::Lost(LossReason::OutOfBounds)
        );
        assert_eq!(
            classify(DVec2::new(5.0, 0.05), &world),
            Outcome::Lost(LossReason::Ground)
        );
        // Grounded inside the target box is a win, not a loss
        assert_eq!(classify(DVec2::new(29.8, 0.05), &world), Outcome::Won);
        assert_eq!(classify(DVec2::new(29.8, 0.3), &world), Outcome::Won);
        assert_eq!(classify(DVec2::new(10.0, 10.0), &world), Outcome::Continue);
        // Target hit box past the right edge is still out of bounds
        assert_eq!(
            classify(DVec2::new(30.2, 0.2), &world),
            Outcome::Lost(LossReason::OutOfBounds)
        );
    }

    #[test]
    fn test_outcome_terminal() {
        assert!(!Outcome::Continue.is_terminal());
        assert!(Outcome::Won.is_terminal());
        assert!(Outcome::Lost(LossReason::Ground).is_terminal());
    }
}
