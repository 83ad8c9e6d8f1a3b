//! Per-kind tuning values and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("radius `{name}` must be non-negative, got {value}")]
    NegativeRadius { name: &'static str, value: f32 },
    #[error("attack radius {attack} exceeds look radius {look}")]
    AttackExceedsLook { attack: f32, look: f32 },
    #[error("look radius {look} must be below stopping distance {stopping}")]
    LookNotBelowStopping { look: f32, stopping: f32 },
    #[error("loot drop percent {0} outside [0, 100]")]
    DropPercentOutOfRange(f32),
    #[error("knockback resistance {0} outside [0, 1]")]
    ResistanceOutOfRange(f32),
    #[error("maximum health must be positive, got {0}")]
    NonPositiveHealth(f32),
    #[error("pool `{0}` must start with at least one slot")]
    EmptyPool(&'static str),
    #[error("particle cutoff must be positive, got {0}")]
    NonPositiveCutoff(f32),
}

/// Distance thresholds driving the AI controller.
///
/// The gap between `look_radius` and `stopping_distance` is the hysteresis
/// band that keeps an alerted actor from flapping at a single boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiThresholds {
    pub look_radius: f32,
    pub attack_radius: f32,
    pub stopping_distance: f32,
}

impl AiThresholds {
    /// Require `stopping_distance > look_radius >= attack_radius >= 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("look_radius", self.look_radius),
            ("attack_radius", self.attack_radius),
            ("stopping_distance", self.stopping_distance),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeRadius { name, value });
            }
        }
        if self.attack_radius > self.look_radius {
            return Err(ConfigError::AttackExceedsLook {
                attack: self.attack_radius,
                look: self.look_radius,
            });
        }
        if self.look_radius >= self.stopping_distance {
            return Err(ConfigError::LookNotBelowStopping {
                look: self.look_radius,
                stopping: self.stopping_distance,
            });
        }
        Ok(())
    }
}

/// Everything that distinguishes one actor kind from another at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorProfile {
    /// AI thresholds. `None` for kinds that never run the controller.
    pub thresholds: Option<AiThresholds>,
    pub max_health: f32,
    /// Multiplier on incoming knockback, in [0, 1].
    pub knockback_resistance: f32,
    /// Chance in percent (0-100) that death drops one loot instance.
    pub loot_drop_percent: f32,
}

impl ActorProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(thresholds) = &self.thresholds {
            thresholds.validate()?;
        }
        if !(self.max_health > 0.0) {
            return Err(ConfigError::NonPositiveHealth(self.max_health));
        }
        if !(0.0..=1.0).contains(&self.knockback_resistance) {
            return Err(ConfigError::ResistanceOutOfRange(self.knockback_resistance));
        }
        if !(0.0..=100.0).contains(&self.loot_drop_percent) {
            return Err(ConfigError::DropPercentOutOfRange(self.loot_drop_percent));
        }
        Ok(())
    }
}
