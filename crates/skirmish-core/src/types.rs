//! Fundamental handle, time, and vector helper types.
//!
//! Positions are `glam::Vec3` in meters. y = up; combat happens on the x,z plane.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable index of an actor slot in the actor registry.
///
/// A handle stays valid for the whole lifetime of the registry; the actor
/// behind it is reused across deaths and respawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorHandle(pub u32);

/// Stable index of a particle slot in the particle pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticleHandle(pub u32);

impl ActorHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ParticleHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ActorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// Project a vector onto the horizontal x,z plane.
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal direction from `from` to `to`, or zero when they coincide.
pub fn planar_direction(from: Vec3, to: Vec3) -> Vec3 {
    planar(to - from).normalize_or_zero()
}
