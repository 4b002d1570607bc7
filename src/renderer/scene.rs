//! Frame drawing
//!
//! Stateless: the same world, state, aim and override always produce the same
//! sequence of draw calls.

use glam::DVec2;

use super::surface::{DrawSurface, Label, Path, Stroke, TextAlign};
use super::viewport::Viewport;
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::sim::{GameStatus, LaunchParameters, SimState, World, preview_path};

/// Colors for game elements
pub mod colors {
    pub const GRID: &str = "#ddd";
    pub const LABEL: &str = "#666";
    pub const AXIS: &str = "#999";
    pub const FENCE: &str = "#663300";
    pub const TARGET: &str = "red";
    pub const PREVIEW: &str = "rgba(0, 128, 255, 0.5)";
    pub const TRAIL: &str = "rgba(0, 100, 255, 0.3)";
    pub const BALL: &str = "blue";
    pub const AIM_ARROW: &str = "green";
}

const LABEL_FONT: &str = "10px Arial";
const GRID_STEP: usize = 2;
const LABEL_STEP: usize = 4;

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub world: &'a World,
    pub state: &'a SimState,
    /// Live slider values (not necessarily the ones used for the launch)
    pub params: &'a LaunchParameters,
    /// Uncommitted terminal position to show instead of `state.position`
    pub display_override: Option<DVec2>,
}

impl Frame<'_> {
    /// Where the ball is drawn this frame
    pub fn ball_position(&self) -> DVec2 {
        self.display_override.unwrap_or(self.state.position)
    }
}

/// Draw a full frame, back to front
pub fn draw_frame<S: DrawSurface + ?Sized>(surface: &mut S, frame: &Frame<'_>) {
    let (width, height) = surface.size();
    let view = Viewport::new(width, height);

    surface.clear();
    draw_grid(surface, &view);
    draw_axes(surface, &view);
    draw_fence(surface, &view, frame.world);
    surface.fill_circle(
        view.to_pixel(frame.world.target()),
        TARGET_PIXEL_RADIUS,
        colors::TARGET,
    );

    let status = frame.state.status;
    if status.is_terminal() {
        draw_preview(surface, &view, frame);
    }
    if status != GameStatus::Ready {
        draw_trail(surface, &view, frame);
    }

    surface.fill_circle(
        view.to_pixel(frame.ball_position()),
        BALL_PIXEL_RADIUS,
        colors::BALL,
    );

    if status == GameStatus::Ready {
        draw_aim_arrow(surface, &view, frame);
    }
}

fn draw_grid<S: DrawSurface + ?Sized>(surface: &mut S, view: &Viewport) {
    let grid = Stroke {
        color: colors::GRID,
        width: 1.0,
    };

    for x in (0..=WORLD_WIDTH as usize).step_by(GRID_STEP) {
        let xf = x as f64;
        let bottom = view.to_pixel(DVec2::new(xf, 0.0));
        let top = view.to_pixel(DVec2::new(xf, WORLD_HEIGHT));
        surface.stroke_path(&Path::polyline([top, bottom]), grid);

        if x % LABEL_STEP == 0 {
            surface.fill_text(
                &x.to_string(),
                bottom + DVec2::new(0.0, 12.0),
                Label {
                    color: colors::LABEL,
                    font: LABEL_FONT,
                    align: TextAlign::Center,
                },
            );
        }
    }

    for y in (0..=WORLD_HEIGHT as usize).step_by(GRID_STEP) {
        let yf = y as f64;
        let left = view.to_pixel(DVec2::new(0.0, yf));
        let right = view.to_pixel(DVec2::new(WORLD_WIDTH, yf));
        surface.stroke_path(&Path::polyline([left, right]), grid);

        if y % LABEL_STEP == 0 {
            surface.fill_text(
                &y.to_string(),
                DVec2::new(15.0, left.y + 4.0),
                Label {
                    color: colors::LABEL,
                    font: LABEL_FONT,
                    align: TextAlign::Right,
                },
            );
        }
    }
}

fn draw_axes<S: DrawSurface + ?Sized>(surface: &mut S, view: &Viewport) {
    let axis = Stroke {
        color: colors::AXIS,
        width: 2.0,
    };
    let origin = view.to_pixel(DVec2::ZERO);
    surface.stroke_path(
        &Path::polyline([origin, view.to_pixel(DVec2::new(WORLD_WIDTH, 0.0))]),
        axis,
    );
    surface.stroke_path(
        &Path::polyline([origin, view.to_pixel(DVec2::new(0.0, WORLD_HEIGHT))]),
        axis,
    );
}

fn draw_fence<S: DrawSurface + ?Sized>(surface: &mut S, view: &Viewport, world: &World) {
    let stroke = Stroke {
        color: colors::FENCE,
        width: 4.0,
    };
    for segment in world.fence() {
        let path = Path::polyline([view.to_pixel(segment.start), view.to_pixel(segment.end)]);
        surface.stroke_path(&path, stroke);
    }
}

/// Replay of the whole flight, re-derived from the live aim
fn draw_preview<S: DrawSurface + ?Sized>(surface: &mut S, view: &Viewport, frame: &Frame<'_>) {
    let points = preview_path(
        frame.world,
        frame.params,
        frame.state.elapsed,
        PREVIEW_STEPS,
    );
    let path = Path::polyline(points.into_iter().map(|p| view.to_pixel(p)));
    surface.stroke_path(
        &path,
        Stroke {
            color: colors::PREVIEW,
            width: 2.0,
        },
    );
}

fn draw_trail<S: DrawSurface + ?Sized>(surface: &mut S, view: &Viewport, frame: &Frame<'_>) {
    let trail = &frame.state.trail;
    if trail.is_empty() {
        return;
    }

    let points = trail
        .iter()
        .chain(std::iter::once(frame.ball_position()))
        .map(|p| view.to_pixel(p));
    surface.stroke_path(
        &Path::polyline(points),
        Stroke {
            color: colors::TRAIL,
            width: 2.0,
        },
    );
}

fn draw_aim_arrow<S: DrawSurface + ?Sized>(surface: &mut S, view: &Viewport, frame: &Frame<'_>) {
    let stroke = Stroke {
        color: colors::AIM_ARROW,
        width: 2.0,
    };
    let start = frame.world.start();
    let radians = frame.params.radians();
    let tip = start + polar_to_cartesian(frame.params.power * ARROW_SCALE, radians);

    surface.stroke_path(
        &Path::polyline([view.to_pixel(start), view.to_pixel(tip)]),
        stroke,
    );

    let barb_a = tip - polar_to_cartesian(ARROW_HEAD_LENGTH, radians - ARROW_HEAD_ANGLE);
    let barb_b = tip - polar_to_cartesian(ARROW_HEAD_LENGTH, radians + ARROW_HEAD_ANGLE);
    let mut head = Path::new();
    head.move_to(view.to_pixel(tip))
        .line_to(view.to_pixel(barb_a))
        .move_to(view.to_pixel(tip))
        .line_to(view.to_pixel(barb_b));
    surface.stroke_path(&head, stroke);
}
