//! Fence Shot - launch a ball through the fence gap onto the target
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (world geometry, collisions, game state)
//! - `renderer`: World-to-pixel mapping and Canvas 2D style drawing
//! - `frame_loop`: Cancellable per-refresh scheduling
//! - `game`: Controller tying input, simulation, scheduling and drawing together
//! - `settings`: Slider ranges and defaults

pub mod error;
pub mod frame_loop;
pub mod game;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SchedulerError, WorldError};
pub use game::Game;
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep per animation frame (seconds of simulated time)
    pub const SIM_DT: f64 = 0.025;
    /// Downward acceleration (world units/s²)
    pub const GRAVITY: f64 = -1.0;

    /// World dimensions (grid units)
    pub const WORLD_WIDTH: f64 = 30.0;
    pub const WORLD_HEIGHT: f64 = 20.0;

    /// Fence collision band around x = 20
    pub const FENCE_BAND_MIN_X: f64 = 19.5;
    pub const FENCE_BAND_MAX_X: f64 = 20.5;
    /// Ball counts as grounded at or below this height
    pub const GROUND_TOLERANCE: f64 = 0.1;
    /// Half-size of the square target hit box
    pub const TARGET_TOLERANCE: f64 = 0.5;

    /// Trail is sampled whenever `elapsed % TRAIL_SAMPLE_PERIOD < dt`
    pub const TRAIL_SAMPLE_PERIOD: f64 = 0.1;

    /// Substeps used to integrate the trajectory preview
    pub const PREVIEW_STEPS: u32 = 100;

    /// Launch arrow geometry (world units / radians)
    pub const ARROW_SCALE: f64 = 0.75;
    pub const ARROW_HEAD_LENGTH: f64 = 2.5;
    pub const ARROW_HEAD_ANGLE: f64 = 0.3;

    /// Marker sizes (pixels, independent of grid size)
    pub const BALL_PIXEL_RADIUS: f64 = 15.0;
    pub const TARGET_PIXEL_RADIUS: f64 = 10.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert a slider angle (whole degrees) to radians
#[inline]
pub fn degrees_to_radians(angle_deg: u32) -> f64 {
    angle_deg as f64 * std::f64::consts::PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let right = polar_to_cartesian(2.0, 0.0);
        assert!((right.x - 2.0).abs() < 1e-12);
        assert!(right.y.abs() < 1e-12);

        let up = polar_to_cartesian(3.0, degrees_to_radians(90));
        assert!(up.x.abs() < 1e-12);
        assert!((up.y - 3.0).abs() < 1e-12);
    }
}
