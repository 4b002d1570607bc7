//! Text shown around the canvas: status message, ball readout, slider values

use glam::DVec2;

use crate::sim::{GameStatus, LossReason, Outcome};

pub const READY_MESSAGE: &str = "Adjust angle and power, then press Go!";
pub const LAUNCHED_MESSAGE: &str = "Ball launched!";

/// Status line for the current state.
///
/// `last` is the outcome of the most recent tick; it picks the loss wording.
pub fn status_message(status: GameStatus, last: Option<Outcome>) -> &'static str {
    match (status, last) {
        (GameStatus::Ready, _) => READY_MESSAGE,
        (GameStatus::Playing, _) => LAUNCHED_MESSAGE,
        (GameStatus::Won, _) => "You hit the target! You win!",
        (GameStatus::Lost, Some(Outcome::Lost(reason))) => loss_message(reason),
        (GameStatus::Lost, _) => "Game over.",
    }
}

pub fn loss_message(reason: LossReason) -> &'static str {
    match reason {
        LossReason::Fence => "You hit the fence! Game over.",
        LossReason::OutOfBounds => "Ball went out of bounds! Game over.",
        LossReason::Ground => "Ball hit the ground! Game over.",
    }
}

/// Ball position and velocity, two decimals each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallReadout {
    pub pos_x: String,
    pub pos_y: String,
    pub vel_x: String,
    pub vel_y: String,
}

impl BallReadout {
    pub fn new(position: DVec2, velocity: DVec2) -> Self {
        Self {
            pos_x: format!("{:.2}", position.x),
            pos_y: format!("{:.2}", position.y),
            vel_x: format!("{:.2}", velocity.x),
            vel_y: format!("{:.2}", velocity.y),
        }
    }
}

pub fn format_angle(angle_deg: u32) -> String {
    angle_deg.to_string()
}

pub fn format_power(power: f64) -> String {
    format!("{:.1}", power)
}
