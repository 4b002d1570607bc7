//! Game state and launch input types
//!
//! All mutable per-session state lives in `SimState`; nothing is global.

use std::collections::VecDeque;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::world::World;
use crate::{degrees_to_radians, polar_to_cartesian};

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 50;

/// Largest launch angle the slider allows (degrees)
pub const MAX_ANGLE_DEG: u32 = 90;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for launch, aim arrow visible
    #[default]
    Ready,
    /// Ball in flight
    Playing,
    /// Ball reached the target
    Won,
    /// Ball hit the fence, the ground or left the world
    Lost,
}

impl GameStatus {
    /// Won or Lost: no more ticks until reset
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Aim chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchParameters {
    /// Whole degrees above the horizontal, 0..=90
    pub angle_deg: u32,
    /// Initial speed (world units/s)
    pub power: f64,
}

impl LaunchParameters {
    pub fn new(angle_deg: u32, power: f64) -> Self {
        Self {
            angle_deg: angle_deg.min(MAX_ANGLE_DEG),
            power,
        }
    }

    #[inline]
    pub fn radians(&self) -> f64 {
        degrees_to_radians(self.angle_deg)
    }

    /// Initial velocity for these parameters
    #[inline]
    pub fn velocity(&self) -> DVec2 {
        polar_to_cartesian(self.power, self.radians())
    }
}

/// Bounded history of past ball positions, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<DVec2>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Append a point, evicting the oldest once over capacity
    pub fn record(&mut self, pos: DVec2) {
        self.points.push_back(pos);
        if self.points.len() > TRAIL_LENGTH {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    pub fn oldest(&self) -> Option<DVec2> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub status: GameStatus,
    /// Last committed ball position
    pub position: DVec2,
    pub velocity: DVec2,
    /// Simulated seconds since launch
    pub elapsed: f64,
    pub trail: Trail,
}

impl SimState {
    /// Fresh Ready state with the ball on the start point
    pub fn new(world: &World) -> Self {
        Self {
            status: GameStatus::Ready,
            position: world.start(),
            velocity: DVec2::ZERO,
            elapsed: 0.0,
            trail: Trail::new(),
        }
    }
}
