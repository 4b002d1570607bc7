//! Error types for the boundaries of the game
//!
//! The simulation itself has no failure modes: losing is a game state, not an
//! error. Errors only come from building a world, scheduling frames and
//! reading configuration.

use core::fmt;

/// Which piece of world geometry a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldPart {
    Start,
    Target,
    Bounds,
    Fence(usize),
}

impl fmt::Display for WorldPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Target => write!(f, "target"),
            Self::Bounds => write!(f, "bounds"),
            Self::Fence(index) => write!(f, "fence segment {index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// A coordinate is NaN or infinite
    NonFinite { part: WorldPart },
    /// Bounds are empty or inverted
    InvalidBounds { min_x: f64, max_x: f64, min_y: f64, max_y: f64 },
    /// Start or target lies outside the bounds
    OutsideBounds { part: WorldPart, x: f64, y: f64 },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { part } => write!(f, "{part} has a non-finite coordinate"),
            Self::InvalidBounds {
                min_x,
                max_x,
                min_y,
                max_y,
            } => write!(
                f,
                "invalid bounds x=[{min_x}, {max_x}] y=[{min_y}, {max_y}]"
            ),
            Self::OutsideBounds { part, x, y } => {
                write!(f, "{part} at ({x}, {y}) is outside the world bounds")
            }
        }
    }
}

impl std::error::Error for WorldError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The frame callback has not been installed yet
    NotReady,
    /// The host refused the frame request
    Rejected(String),
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "frame callback not installed"),
            Self::Rejected(reason) => write!(f, "frame request rejected: {reason}"),
        }
    }
}

impl std::error::Error for SchedulerError {}

#[derive(Debug)]
pub enum ConfigError {
    /// Settings JSON failed to parse
    Parse(serde_json::Error),
    /// Settings parsed but are inconsistent
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
