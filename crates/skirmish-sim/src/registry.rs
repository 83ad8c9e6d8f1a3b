//! Actor registry: the combat actor pool plus live-count bookkeeping.
//!
//! Death is detected by combat (the actor flips `alive`) and reclaimed here
//! by the per-tick sweep, so a dead actor keeps its slot for at most one tick.

use glam::Vec3;

use skirmish_core::enums::ActorKind;
use skirmish_core::events::{Cue, GameEvent};
use skirmish_core::profile::ActorProfile;
use skirmish_core::types::ActorHandle;

use crate::actor::{Actor, Lifecycle};
use crate::event_bus::EventBus;
use crate::pool::{Pool, PoolError};

pub struct ActorRegistry {
    pool: Pool<Actor>,
    live_count: usize,
    health_bars: bool,
}

impl ActorRegistry {
    /// Pre-fill `size` inactive actors of `kind`.
    pub fn new(size: usize, kind: ActorKind, profile: ActorProfile) -> Self {
        let pool = Pool::filled(size, |index| {
            Actor::new(ActorHandle(index as u32), kind, profile)
        });
        Self {
            pool,
            live_count: 0,
            health_bars: true,
        }
    }

    /// Activate an actor of `kind` at `position`, growing the pool if every slot is in use.
    pub fn spawn(
        &mut self,
        kind: ActorKind,
        profile: ActorProfile,
        position: Vec3,
        cues: &mut Vec<Cue>,
    ) -> ActorHandle {
        let health_bars = self.health_bars;
        let acquired = self
            .pool
            .acquire_with(|index| Actor::new(ActorHandle(index as u32), kind, profile));
        if acquired.grown {
            log::info!("Actor pool grown to {} slots.", acquired.index + 1);
        }

        let actor = acquired.item;
        actor.configure(kind, profile, position);
        actor.health_bar_enabled = health_bars;
        if !actor.alive {
            actor.respawn(cues);
        }

        self.live_count += 1;
        log::debug!("Spawned {kind:?} {} at {position:?}.", actor.id);
        actor.id
    }

    /// Reclaim every active actor that reports death, publishing one
    /// `ActorSlain` per reclaimed actor. Reclaimed handles are written to `reclaimed`.
    pub fn sweep(&mut self, bus: &mut EventBus<GameEvent>, reclaimed: &mut Vec<ActorHandle>) {
        reclaimed.clear();
        reclaimed.extend(
            self.pool
                .iter_active()
                .filter(|(_, actor)| !actor.alive)
                .map(|(_, actor)| actor.id),
        );

        for &handle in reclaimed.iter() {
            // Handles come straight from the pool, so reclaim cannot fail here.
            if let Err(err) = self.reclaim(handle, bus) {
                log::error!("Sweep failed to reclaim {handle}: {err}");
            }
        }
    }

    /// Deactivate one actor and return its slot to the pool. Reclaiming a
    /// free slot is a no-op.
    pub fn reclaim(
        &mut self,
        handle: ActorHandle,
        bus: &mut EventBus<GameEvent>,
    ) -> Result<(), PoolError> {
        if !self.pool.is_active(handle.index())? {
            return Ok(());
        }
        let actor = self.pool.get_mut(handle.index())?;
        actor.collision_enabled = false;
        let kind = actor.kind;

        self.pool.release(handle.index())?;
        self.live_count = self.live_count.saturating_sub(1);
        log::debug!("Reclaimed {kind:?} {handle}; {} live.", self.live_count);

        bus.publish(GameEvent::ActorSlain {
            actor: handle,
            kind,
        });
        Ok(())
    }

    pub fn get(&self, handle: ActorHandle) -> Result<&Actor, PoolError> {
        self.pool.get(handle.index())
    }

    pub fn get_mut(&mut self, handle: ActorHandle) -> Result<&mut Actor, PoolError> {
        self.pool.get_mut(handle.index())
    }

    pub fn is_active(&self, handle: ActorHandle) -> Result<bool, PoolError> {
        self.pool.is_active(handle.index())
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Actor> {
        self.pool.iter_active().map(|(_, actor)| actor)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.pool.iter_active_mut().map(|(_, actor)| actor)
    }

    /// Number of active slots.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// Number of active slots holding `kind`.
    pub fn live_count_of(&self, kind: ActorKind) -> usize {
        self.iter_active().filter(|actor| actor.kind == kind).count()
    }

    /// Total slots, active or not.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn health_bars(&self) -> bool {
        self.health_bars
    }

    /// Show or hide health bars on every slot, including inactive and future ones.
    pub fn set_health_bars(&mut self, visible: bool) {
        if self.health_bars == visible {
            return;
        }
        self.health_bars = visible;
        for actor in self.pool.iter_all_mut() {
            actor.health_bar_enabled = visible;
        }
    }
}
