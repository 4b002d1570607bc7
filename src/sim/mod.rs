//! Projectile simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - No wall-clock time
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod trajectory;
pub mod world;

pub use collision::{
    LossReason, Outcome, classify, hits_fence, hits_ground, hits_target, out_of_bounds,
};
pub use state::{GameStatus, LaunchParameters, MAX_ANGLE_DEG, SimState, TRAIL_LENGTH, Trail};
pub use tick::{TickReport, launch, reset, tick};
pub use trajectory::preview_path;
pub use world::{Bounds, Segment, World};
