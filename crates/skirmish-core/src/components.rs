//! Per-actor combat components: the hit-point ledger and the knockback impulse.
//!
//! Both are plain data with a handful of small methods. They know nothing
//! about pools or the AI; death side effects are the caller's business.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{KNOCKBACK_EPSILON, KNOCKBACK_TIME_CONSTANT};

/// Result of a single `take_damage` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Invulnerable; nothing changed.
    Blocked,
    /// Health was already zero; nothing changed and no death must fire.
    AlreadyDepleted,
    /// Health dropped but is still above zero.
    Wounded,
    /// Health reached zero on this call. Fires exactly once per life.
    Depleted,
}

/// Hit-point ledger. `0 <= current <= maximum` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthComponent {
    current: f32,
    maximum: f32,
    invulnerable: bool,
}

impl HealthComponent {
    /// Full health, damage enabled.
    pub fn new(maximum: f32) -> Self {
        let maximum = maximum.max(0.0);
        Self {
            current: maximum,
            maximum,
            invulnerable: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Fraction of health remaining, for health bars.
    pub fn fraction(&self) -> f32 {
        if self.maximum > 0.0 {
            self.current / self.maximum
        } else {
            0.0
        }
    }

    /// Lower health by `amount`, clamped at zero. A NaN amount counts as zero.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.invulnerable {
            return DamageOutcome::Blocked;
        }
        if self.current <= 0.0 {
            return DamageOutcome::AlreadyDepleted;
        }

        self.current = (self.current - nan_to_zero(amount)).clamp(0.0, self.maximum);

        if self.current <= 0.0 {
            self.current = 0.0;
            DamageOutcome::Depleted
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Raise health by `amount`, clamped at the maximum. A NaN amount counts as zero.
    pub fn gain_health(&mut self, amount: f32) {
        self.current = (self.current + nan_to_zero(amount)).clamp(0.0, self.maximum);
    }

    /// Set current health to maximum.
    pub fn fill(&mut self) {
        self.current = self.maximum;
    }

    /// Replace the maximum and refill. Used when a pooled actor is reconfigured.
    pub fn reset(&mut self, maximum: f32) {
        self.maximum = maximum.max(0.0);
        self.current = self.maximum;
        self.invulnerable = false;
    }

    /// Flip invulnerability. This is a toggle, not a counter: callers must
    /// pair enable/disable calls themselves.
    pub fn toggle_invulnerable(&mut self) {
        self.invulnerable = !self.invulnerable;
    }
}

/// `f32::clamp` passes NaN straight through, which would poison `current`.
/// Infinities are fine: the clamp pins them to a bound.
fn nan_to_zero(amount: f32) -> f32 {
    if amount.is_nan() {
        0.0
    } else {
        amount
    }
}

/// Accumulated displacement impulse on the x,z plane.
///
/// The decay rate is expressed per frame (`KNOCKBACK_TIME_CONSTANT * dt`), so
/// the effective half-life depends on the frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnockbackModel {
    impulse: Vec3,
    resistance: f32,
}

impl KnockbackModel {
    /// `resistance` in [0, 1] scales every incoming push; 0 makes the actor immovable.
    pub fn new(resistance: f32) -> Self {
        Self {
            impulse: Vec3::ZERO,
            resistance: resistance.clamp(0.0, 1.0),
        }
    }

    pub fn impulse(&self) -> Vec3 {
        self.impulse
    }

    pub fn resistance(&self) -> f32 {
        self.resistance
    }

    pub fn is_at_rest(&self) -> bool {
        self.impulse == Vec3::ZERO
    }

    /// Add a push. Same-tick pushes accumulate without any magnitude clamp.
    pub fn apply(&mut self, push: Vec3) {
        self.impulse.x += push.x * self.resistance;
        self.impulse.z += push.z * self.resistance;
    }

    /// Integrate the impulse into `position` and decay it toward zero.
    /// A non-positive `dt` does nothing.
    pub fn tick(&mut self, position: &mut Vec3, dt: f32) {
        if self.impulse.x.abs() < KNOCKBACK_EPSILON {
            self.impulse.x = 0.0;
        }
        if self.impulse.z.abs() < KNOCKBACK_EPSILON {
            self.impulse.z = 0.0;
        }
        if self.is_at_rest() || !(dt > 0.0) {
            return;
        }

        let rate = KNOCKBACK_TIME_CONSTANT * dt;
        *position += self.impulse * rate;
        self.impulse = self.impulse.lerp(Vec3::ZERO, rate.clamp(0.0, 1.0));
    }

    /// Drop any residual impulse and take a new resistance.
    pub fn reset(&mut self, resistance: f32) {
        self.impulse = Vec3::ZERO;
        self.resistance = resistance.clamp(0.0, 1.0);
    }
}
