//! Die resolver configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tumble::{Bounds, WorldConfig};

use crate::error::MoodError;

/// Fixed simulation tick (60 Hz).
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Where a fresh roll starts.
pub const DEFAULT_SPAWN: Vec3 = Vec3::new(0.0, 5.0, 0.0);

/// Where `reset()` parks the die, far outside the play area.
pub const DEFAULT_PARKED: Vec3 = Vec3::new(1000.0, 1000.0, 1000.0);

/// Ranges for the randomized launch applied by `roll()`.
///
/// Each velocity component is drawn independently:
/// - lateral x/z: `(u - 0.5) * lateral_speed`
/// - upward y: exactly `upward_speed`
/// - spin x/y/z: `u * max_spin`
///
/// where `u` is uniform in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// Full width of the lateral speed range
    pub lateral_speed: f32,
    /// Upward launch speed
    pub upward_speed: f32,
    /// Upper bound of each spin component (rad/s)
    pub max_spin: f32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            lateral_speed: 5.0,
            upward_speed: 5.0,
            max_spin: 10.0,
        }
    }
}

/// Configuration for a [`DieResolver`](crate::dice::DieResolver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Physics step size in seconds
    pub fixed_dt: f32,
    /// Die mass
    pub die_mass: f32,
    /// Die half size (0.5 for a unit cube)
    pub die_half_size: f32,
    /// Start position of every roll
    pub spawn: Vec3,
    /// Position the die is moved to on reset
    pub parked: Vec3,
    /// Randomized launch ranges
    pub launch: LaunchConfig,
    /// Linear speed below which the die may count as settled
    pub settle_speed: f32,
    /// Allowed height above rest (one half size) for a settled die
    pub rest_margin: f32,
    /// Minimum upward alignment of the winning face
    pub confidence: f32,
    /// Force an outcome after this many ticks of an armed roll (`None` waits forever)
    pub max_settle_ticks: Option<u32>,
    /// Half extent of the cubic play area; outcomes only resolve inside it
    pub play_area_half_extent: f32,
    /// Physics world settings
    pub world: WorldConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fixed_dt: FIXED_DT,
            die_mass: 1.0,
            die_half_size: 0.5,
            spawn: DEFAULT_SPAWN,
            parked: DEFAULT_PARKED,
            launch: LaunchConfig::default(),
            settle_speed: 0.1,
            rest_margin: 0.1,
            confidence: 0.9,
            max_settle_ticks: Some(900),
            play_area_half_extent: 50.0,
            world: WorldConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MoodError::Json`] on malformed input and
    /// [`MoodError::InvalidConfig`] / [`MoodError::World`] if a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, MoodError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The play area as bounds.
    #[must_use]
    pub fn play_area(&self) -> Bounds {
        Bounds::cube(self.play_area_half_extent)
    }

    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), MoodError> {
        let positive = [
            ("fixed_dt", self.fixed_dt),
            ("die_mass", self.die_mass),
            ("die_half_size", self.die_half_size),
            ("settle_speed", self.settle_speed),
            ("play_area_half_extent", self.play_area_half_extent),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MoodError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("rest_margin", self.rest_margin),
            ("launch.lateral_speed", self.launch.lateral_speed),
            ("launch.upward_speed", self.launch.upward_speed),
            ("launch.max_spin", self.launch.max_spin),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MoodError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(MoodError::InvalidConfig(format!(
                "confidence must lie in (0, 1), got {}",
                self.confidence
            )));
        }
        if self.max_settle_ticks == Some(0) {
            return Err(MoodError::InvalidConfig(
                "max_settle_ticks must be at least 1".to_string(),
            ));
        }
        if self.play_area().contains(self.parked) {
            return Err(MoodError::InvalidConfig(
                "parked position must lie outside the play area".to_string(),
            ));
        }

        self.world.validate()?;
        Ok(())
    }
}
