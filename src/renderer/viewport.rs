//! World-to-pixel coordinate mapping

use glam::DVec2;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// Mapping for one frame, rebuilt from the surface size every draw so the
/// canvas can be resized between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Pixels per world unit
    pub grid_size: f64,
    /// Surface height in pixels (y axis is flipped against it)
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            grid_size: (width / WORLD_WIDTH).min(height / WORLD_HEIGHT),
            height,
        }
    }

    /// World y grows upward, pixel y grows downward
    #[inline]
    pub fn to_pixel(&self, world: DVec2) -> DVec2 {
        DVec2::new(
            world.x * self.grid_size,
            self.height - world.y * self.grid_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_uses_tighter_axis() {
        assert_eq!(Viewport::new(600.0, 400.0).grid_size, 20.0);
        // Wide canvas: height limits
        assert_eq!(Viewport::new(900.0, 400.0).grid_size, 20.0);
        // Tall canvas: width limits
        assert_eq!(Viewport::new(300.0, 400.0).grid_size, 10.0);
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let view = Viewport::new(600.0, 400.0);
        assert_eq!(view.to_pixel(DVec2::ZERO), DVec2::new(0.0, 400.0));
        assert_eq!(view.to_pixel(DVec2::new(30.0, 20.0)), DVec2::new(600.0, 0.0));
        assert_eq!(view.to_pixel(DVec2::new(20.0, 13.0)), DVec2::new(400.0, 140.0));
    }

    #[test]
    fn test_tall_canvas_anchors_ground_to_bottom() {
        let view = Viewport::new(300.0, 400.0);
        assert_eq!(view.to_pixel(DVec2::ZERO), DVec2::new(0.0, 400.0));
        assert_eq!(view.to_pixel(DVec2::new(0.0, 20.0)).y, 200.0);
    }
}
