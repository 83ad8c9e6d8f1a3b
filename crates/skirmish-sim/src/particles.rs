//! Short-lived hit effects with time-based release.

use glam::Vec3;

use skirmish_core::types::ParticleHandle;

use crate::pool::{Pool, PoolError};

#[derive(Debug, Clone, Default)]
pub struct Particle {
    pub position: Vec3,
    /// Seconds since `play`.
    pub elapsed: f32,
    pub playing: bool,
}

/// Pool of particle effects. Callers play effects; only `sweep` stops them.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    pool: Pool<Particle>,
    cutoff_secs: f32,
    expired_buffer: Vec<usize>,
}

impl ParticlePool {
    pub fn new(size: usize, cutoff_secs: f32) -> Self {
        Self {
            pool: Pool::filled(size, |_| Particle::default()),
            cutoff_secs,
            expired_buffer: Vec::new(),
        }
    }

    /// Start an effect at `position`, growing the pool if every slot is playing.
    pub fn play(&mut self, position: Vec3) -> ParticleHandle {
        let acquired = self.pool.acquire_with(|_| Particle::default());
        if acquired.grown {
            log::info!("Particle pool grown to {} slots.", acquired.index + 1);
        }
        *acquired.item = Particle {
            position,
            elapsed: 0.0,
            playing: true,
        };
        ParticleHandle(acquired.index as u32)
    }

    /// Age every playing effect by `dt` and release those past the cutoff.
    pub fn sweep(&mut self, dt: f32) {
        let cutoff = self.cutoff_secs;
        self.expired_buffer.clear();
        for (index, particle) in self.pool.iter_active_mut() {
            particle.elapsed += dt;
            if particle.elapsed >= cutoff {
                particle.playing = false;
                self.expired_buffer.push(index);
            }
        }
        for &index in &self.expired_buffer {
            if let Err(err) = self.pool.release(index) {
                log::error!("Particle sweep failed: {err}");
            }
        }
    }

    pub fn get(&self, handle: ParticleHandle) -> Result<&Particle, PoolError> {
        self.pool.get(handle.index())
    }

    pub fn is_active(&self, handle: ParticleHandle) -> Result<bool, PoolError> {
        self.pool.is_active(handle.index())
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn cutoff_secs(&self) -> f32 {
        self.cutoff_secs
    }
}
