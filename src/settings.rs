//! Game settings: slider ranges and simulation pacing
//!
//! Read once at startup from an inline JSON block (web) or an environment
//! variable (native). Nothing is ever written back.

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::error::ConfigError;
use crate::sim::{LaunchParameters, MAX_ANGLE_DEG};

/// Range and resolution of the power slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for PowerRange {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 20.0,
            step: 0.1,
            default: 10.0,
        }
    }
}

impl PowerRange {
    /// Clamp a raw slider value into the range (NaN falls back to default)
    pub fn clamp(&self, power: f64) -> f64 {
        if power.is_nan() {
            return self.default;
        }
        power.clamp(self.min, self.max)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial angle slider position (degrees)
    pub default_angle: u32,
    pub power: PowerRange,
    /// Simulated seconds advanced per animation frame
    pub sim_dt: f64,
    /// Id of the `<canvas>` element to draw on
    pub canvas_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_angle: 45,
            power: PowerRange::default(),
            sim_dt: SIM_DT,
            canvas_id: "gameCanvas".to_string(),
        }
    }
}

impl Settings {
    /// Id of the inline `<script type="application/json">` settings block
    pub const ELEMENT_ID: &'static str = "fence-shot-settings";
    /// Environment variable holding settings JSON on native builds
    pub const ENV_VAR: &'static str = "FENCE_SHOT_SETTINGS";

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.power;
        if ![p.min, p.max, p.step, p.default, self.sim_dt]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ConfigError::Invalid("non-finite number".to_string()));
        }
        if p.min <= 0.0 || p.min >= p.max {
            return Err(ConfigError::Invalid(format!(
                "power range [{}, {}] must be positive and non-empty",
                p.min, p.max
            )));
        }
        if p.default < p.min || p.default > p.max {
            return Err(ConfigError::Invalid(format!(
                "default power {} outside [{}, {}]",
                p.default, p.min, p.max
            )));
        }
        if p.step <= 0.0 {
            return Err(ConfigError::Invalid("power step must be positive".to_string()));
        }
        if self.default_angle > MAX_ANGLE_DEG {
            return Err(ConfigError::Invalid(format!(
                "default angle {} exceeds {}",
                self.default_angle, MAX_ANGLE_DEG
            )));
        }
        if self.sim_dt <= 0.0 {
            return Err(ConfigError::Invalid("sim_dt must be positive".to_string()));
        }
        Ok(())
    }

    /// Slider starting positions
    pub fn initial_params(&self) -> LaunchParameters {
        LaunchParameters::new(self.default_angle, self.power.default)
    }

    /// Settings from optional JSON, falling back to defaults on any problem
    pub fn from_optional_json(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the page's inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_optional_json(json.as_deref())
    }

    /// Load settings from the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let json = std::env::var(Self::ENV_VAR).ok();
        Self::from_optional_json(json.as_deref())
    }
}
