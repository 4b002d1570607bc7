//! Static level geometry
//!
//! Everything here is in world units on a 30x20 grid, with y pointing up.
//! A `World` never changes during a session.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::error::{WorldError, WorldPart};

/// One fence obstacle, stored as two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub const fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Whether `y` lies within the segment's vertical extent
    #[inline]
    pub fn spans_y(&self, y: f64) -> bool {
        y >= self.start.y && y <= self.end.y
    }

    fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

/// Axis-aligned playable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: WORLD_WIDTH,
            min_y: 0.0,
            max_y: WORLD_HEIGHT,
        }
    }
}

impl Bounds {
    /// Inclusive containment: points on the edge are inside
    #[inline]
    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.y >= self.min_y && pos.y <= self.max_y
    }

    fn is_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x < self.max_x
            && self.min_y < self.max_y
    }
}

/// Level geometry shared read-only by the simulation and the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct World {
    start: DVec2,
    target: DVec2,
    fence: Vec<Segment>,
    bounds: Bounds,
}

impl World {
    /// Build a world, rejecting geometry the simulation cannot use.
    ///
    /// Fence segments listed top-down (`start.y > end.y`) are flipped so the
    /// fence test can always read `start.y..=end.y`.
    pub fn new(
        start: DVec2,
        target: DVec2,
        fence: Vec<Segment>,
        bounds: Bounds,
    ) -> Result<Self, WorldError> {
        if !bounds.is_valid() {
            return Err(WorldError::InvalidBounds {
                min_x: bounds.min_x,
                max_x: bounds.max_x,
                min_y: bounds.min_y,
                max_y: bounds.max_y,
            });
        }

        for (part, point) in [(WorldPart::Start, start), (WorldPart::Target, target)] {
            if !point.is_finite() {
                return Err(WorldError::NonFinite { part });
            }
            if !bounds.contains(point) {
                return Err(WorldError::OutsideBounds {
                    part,
                    x: point.x,
                    y: point.y,
                });
            }
        }

        let mut normalized = Vec::with_capacity(fence.len());
        for (index, segment) in fence.into_iter().enumerate() {
            if !segment.is_finite() {
                return Err(WorldError::NonFinite {
                    part: WorldPart::Fence(index),
                });
            }
            if segment.start.y > segment.end.y {
                log::warn!("Fence segment {} is inverted, swapping endpoints", index);
                normalized.push(Segment::new(segment.end, segment.start));
            } else {
                normalized.push(segment);
            }
        }

        if normalized.is_empty() {
            log::warn!("World has no fence segments");
        }

        Ok(Self {
            start,
            target,
            fence: normalized,
            bounds,
        })
    }

    /// The standard level: fence at x = 20 with a gap between y = 13 and y = 16
    pub fn reference() -> Self {
        Self {
            start: DVec2::ZERO,
            target: DVec2::new(WORLD_WIDTH, 0.0),
            fence: vec![
                Segment::new(DVec2::new(20.0, 0.0), DVec2::new(20.0, 13.0)),
                Segment::new(DVec2::new(20.0, 16.0), DVec2::new(20.0, WORLD_HEIGHT)),
            ],
            bounds: Bounds::default(),
        }
    }

    #[inline]
    pub fn start(&self) -> DVec2 {
        self.start
    }

    #[inline]
    pub fn target(&self) -> DVec2 {
        self.target
    }

    #[inline]
    pub fn fence(&self) -> &[Segment] {
        &self.fence
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

impl Default for World {
    fn default() -> Self {
        Self::reference()
    }
}
