//! Trajectory preview drawn after a flight ends

use glam::DVec2;

use super::state::LaunchParameters;
use super::world::World;
use crate::consts::GRAVITY;

/// Integrate a flight from the start point over `[0, duration]` in `steps`
/// equal substeps.
///
/// Uses the same position-then-gravity ordering as the live simulation. The
/// returned path starts with the start point and stops before the first
/// substep that leaves the world bounds.
pub fn preview_path(
    world: &World,
    params: &LaunchParameters,
    duration: f64,
    steps: u32,
) -> Vec<DVec2> {
    let mut path = Vec::with_capacity(steps as usize + 1);
    let mut pos = world.start();
    let mut vel = params.velocity();
    path.push(pos);

    if steps == 0 {
        return path;
    }

    let h = duration / steps as f64;
    for _ in 0..steps {
        pos += vel * h;
        vel.y += GRAVITY * h;

        if !world.bounds().contains(pos) {
            break;
        }
        path.push(pos);
    }

    path
}
