//! Simulation engine: the explicit context every component runs inside.
//!
//! `SimulationEngine` owns the actor and particle pools, the player, the
//! event bus, the loot world, and the encounter listeners. It processes
//! queued commands, runs all systems, and produces `SimSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::commands::SimCommand;
use skirmish_core::constants::{
    DEFAULT_ENEMY_POOL_SIZE, DEFAULT_PARTICLE_CUTOFF_SECS, DEFAULT_PARTICLE_POOL_SIZE,
    SPAWN_NEAR_PLAYER_OFFSET,
};
use skirmish_core::enums::{ActorKind, Faction};
use skirmish_core::events::{Cue, GameEvent};
use skirmish_core::profile::{ActorProfile, ConfigError};
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::{ActorHandle, SimTime};

use skirmish_ai::profiles::get_profile;

use crate::actor::{Actor, DeathContext, Lifecycle, PLAYER_HANDLE};
use crate::combat::{self, HitReport, HitTarget, IgnoreReason, Overlap, WeaponStats};
use crate::encounter::{Gate, SpawnZone};
use crate::event_bus::{EventBus, Subscription, SubscriptionId};
use crate::loot;
use crate::particles::ParticlePool;
use crate::pool::PoolError;
use crate::registry::ActorRegistry;
use crate::systems;
use crate::systems::snapshot::SnapshotInputs;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub enemy_pool_size: usize,
    pub particle_pool_size: usize,
    /// Seconds a particle plays before the sweep frees it.
    pub particle_cutoff_secs: f32,
    pub enemy: ActorProfile,
    pub breakable: ActorProfile,
    pub player: ActorProfile,
    pub player_spawn: Vec3,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            enemy_pool_size: DEFAULT_ENEMY_POOL_SIZE,
            particle_pool_size: DEFAULT_PARTICLE_POOL_SIZE,
            particle_cutoff_secs: DEFAULT_PARTICLE_CUTOFF_SECS,
            enemy: get_profile(ActorKind::Enemy),
            breakable: get_profile(ActorKind::Breakable),
            player: get_profile(ActorKind::Player),
            player_spawn: Vec3::ZERO,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enemy_pool_size == 0 {
            return Err(ConfigError::EmptyPool("enemy"));
        }
        if self.particle_pool_size == 0 {
            return Err(ConfigError::EmptyPool("particle"));
        }
        if !(self.particle_cutoff_secs > 0.0) {
            return Err(ConfigError::NonPositiveCutoff(self.particle_cutoff_secs));
        }
        self.enemy.validate()?;
        self.breakable.validate()?;
        self.player.validate()
    }

    pub fn profile(&self, kind: ActorKind) -> ActorProfile {
        match kind {
            ActorKind::Enemy => self.enemy,
            ActorKind::Breakable => self.breakable,
            ActorKind::Player => self.player,
        }
    }
}

/// The simulation engine. Owns every pool and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    registry: ActorRegistry,
    particles: ParticlePool,
    player: Actor,
    bus: EventBus<GameEvent>,
    loot: World,
    zones: BTreeMap<u32, SpawnZone>,
    gates: BTreeMap<u32, Gate>,
    next_zone_id: u32,
    next_gate_id: u32,
    time: SimTime,
    rng: ChaCha8Rng,
    god_mode: bool,
    command_queue: VecDeque<SimCommand>,
    overlap_queue: Vec<Overlap>,
    reclaim_buffer: Vec<ActorHandle>,
    despawn_buffer: Vec<hecs::Entity>,
    cues: Vec<Cue>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut player = Actor::new(PLAYER_HANDLE, ActorKind::Player, config.player);
        player.position = config.player_spawn;

        log::info!(
            "Simulation created: seed {}, {} enemy slots, {} particle slots.",
            config.seed,
            config.enemy_pool_size,
            config.particle_pool_size
        );

        Ok(Self {
            registry: ActorRegistry::new(config.enemy_pool_size, ActorKind::Enemy, config.enemy),
            particles: ParticlePool::new(config.particle_pool_size, config.particle_cutoff_secs),
            player,
            bus: EventBus::new(),
            loot: World::new(),
            zones: BTreeMap::new(),
            gates: BTreeMap::new(),
            next_zone_id: 0,
            next_gate_id: 0,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            god_mode: false,
            command_queue: VecDeque::new(),
            overlap_queue: Vec::new(),
            reclaim_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            cues: Vec::new(),
            config,
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Queue a hitbox overlap for delivery during the next tick.
    ///
    /// Actor targets are bounds-checked here; the pool never shrinks, so a
    /// handle that is valid now is still valid at delivery.
    pub fn queue_overlap(&mut self, overlap: Overlap) -> Result<(), PoolError> {
        if let HitTarget::Actor(handle) = overlap.target {
            self.registry.is_active(handle)?;
        }
        self.overlap_queue.push(overlap);
        Ok(())
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    /// Time never runs backwards: a negative or NaN `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32) -> SimSnapshot {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        self.process_commands();
        self.run_systems(dt);
        self.time.advance(dt);
        self.snapshot()
    }

    /// Activate an enemy at `position`.
    pub fn spawn(&mut self, position: Vec3) -> ActorHandle {
        self.spawn_kind(ActorKind::Enemy, position)
    }

    /// Activate an actor of `kind` at `position`. There is only ever one
    /// player: spawning `Player` moves it and brings it back if dead.
    pub fn spawn_kind(&mut self, kind: ActorKind, position: Vec3) -> ActorHandle {
        if kind == ActorKind::Player {
            if !self.player.alive {
                self.respawn_player();
            }
            self.player.position = position;
            return PLAYER_HANDLE;
        }
        let profile = self.config.profile(kind);
        self.registry.spawn(kind, profile, position, &mut self.cues)
    }

    /// Resolve a player weapon hit on `target` immediately.
    pub fn apply_hit(
        &mut self,
        attacker_origin: Vec3,
        target: ActorHandle,
        base_damage: f32,
        damage_multiplier: f32,
        knockback_multiplier: f32,
    ) -> Result<HitReport, PoolError> {
        self.deliver(&Overlap {
            attacker_origin,
            attacker_faction: Faction::Player,
            target: HitTarget::Actor(target),
            weapon: WeaponStats {
                base_damage,
                damage_multiplier,
                knockback_multiplier,
            },
        })
    }

    /// Resolve an enemy weapon hit on the player immediately.
    pub fn hit_player(&mut self, attacker_origin: Vec3, weapon: WeaponStats) -> HitReport {
        let mut death = DeathContext {
            rng: &mut self.rng,
            loot: &mut self.loot,
            cues: &mut self.cues,
        };
        let report = combat::resolve(
            attacker_origin,
            Faction::Hostile,
            &weapon,
            &mut self.player,
            &mut death,
        );
        if report.landed() {
            let position = self.player.position;
            self.play_hit_particle(position);
        }
        report
    }

    /// Clear the attack latch of `actor`. The next controller update may start a new swing.
    pub fn finish_attack(&mut self, actor: ActorHandle) -> Result<(), PoolError> {
        self.registry.get_mut(actor)?.is_attacking = false;
        Ok(())
    }

    /// Publish `EncounterReset` and let every listener react right away.
    pub fn reset_encounter(&mut self) {
        log::info!("Encounter reset.");
        self.bus.publish(GameEvent::EncounterReset);
        self.dispatch_encounter_events();
    }

    pub fn subscribe(&mut self) -> Subscription<GameEvent> {
        self.bus.subscribe()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // --- Player ---

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn set_player_position(&mut self, position: Vec3) {
        self.player.position = position;
    }

    /// Top up a living player. A dead player only gets health back through respawn.
    pub fn heal_player(&mut self, amount: f32) {
        if self.player.alive {
            self.player.health.gain_health(amount);
        }
    }

    pub fn respawn_player(&mut self) {
        self.player.respawn(&mut self.cues);
        self.player.position = self.config.player_spawn;
        self.player.knockback.reset(self.config.player.knockback_resistance);
        if self.player.health.is_invulnerable() {
            self.player.health.toggle_invulnerable();
        }
    }

    pub fn god_mode(&self) -> bool {
        self.god_mode
    }

    // --- Encounters ---

    /// Register a spawn zone. Returns its id.
    pub fn add_spawn_zone(
        &mut self,
        locations: Vec<Vec3>,
        gates: Vec<u32>,
        one_time_only: bool,
    ) -> u32 {
        let id = self.next_zone_id;
        self.next_zone_id += 1;
        let zone = SpawnZone::new(id, locations, gates, one_time_only, &mut self.bus);
        self.zones.insert(id, zone);
        id
    }

    /// Register a gate. Returns its id.
    pub fn add_gate(&mut self, key_gate: bool) -> u32 {
        let id = self.next_gate_id;
        self.next_gate_id += 1;
        self.gates.insert(id, Gate::new(id, key_gate, &mut self.bus));
        id
    }

    pub fn remove_spawn_zone(&mut self, id: u32) -> bool {
        match self.zones.remove(&id) {
            Some(zone) => {
                zone.detach(&mut self.bus);
                true
            }
            None => false,
        }
    }

    pub fn remove_gate(&mut self, id: u32) -> bool {
        match self.gates.remove(&id) {
            Some(gate) => {
                gate.detach(&mut self.bus);
                true
            }
            None => false,
        }
    }

    pub fn spawn_zone(&self, id: u32) -> Option<&SpawnZone> {
        self.zones.get(&id)
    }

    pub fn gate(&self, id: u32) -> Option<&Gate> {
        self.gates.get(&id)
    }

    /// Fire a spawn zone: one enemy per location, listed gates locked.
    /// Returns the spawned handles; empty if the zone is unknown or consumed.
    pub fn trigger_spawn_zone(&mut self, id: u32) -> Vec<ActorHandle> {
        let Some(zone) = self.zones.get_mut(&id) else {
            log::warn!("Ignoring trigger for unknown spawn zone {id}.");
            return Vec::new();
        };
        if !zone.trigger() {
            log::debug!("Spawn zone {id} already consumed.");
            return Vec::new();
        }
        let locations = zone.locations.clone();
        let gate_ids = zone.gates.clone();

        let spawned: Vec<ActorHandle> = locations
            .into_iter()
            .map(|position| self.spawn(position))
            .collect();

        for gate_id in gate_ids {
            match self.gates.get_mut(&gate_id) {
                Some(gate) => gate.set_locked(true, &mut self.cues),
                None => log::warn!("Spawn zone {id} lists unknown gate {gate_id}."),
            }
        }

        log::info!("Spawn zone {id} triggered: {} enemies.", spawned.len());
        spawned
    }

    /// External key hook. Returns false for an unknown gate.
    pub fn unlock_gate(&mut self, id: u32) -> bool {
        match self.gates.get_mut(&id) {
            Some(gate) => {
                gate.set_locked(false, &mut self.cues);
                true
            }
            None => false,
        }
    }

    // --- Loot ---

    pub fn loot_count(&self) -> usize {
        loot::count(&self.loot)
    }

    /// Pick up every loot instance within `radius` of `position`.
    pub fn collect_loot_near(&mut self, position: Vec3, radius: f32) -> usize {
        loot::collect_near(&mut self.loot, position, radius, &mut self.despawn_buffer)
    }

    // --- Accessors ---

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::ResetEncounter => self.reset_encounter(),
            SimCommand::TriggerSpawnZone { zone } => {
                self.trigger_spawn_zone(zone);
            }
            SimCommand::ToggleBlock => {
                if self.player.alive {
                    self.player.health.toggle_invulnerable();
                } else {
                    log::warn!("Ignoring block toggle while the player is dead.");
                }
            }
            SimCommand::AttackFinished { actor } => {
                if let Err(err) = self.finish_attack(actor) {
                    log::warn!("Ignoring attack-finished for {actor}: {err}");
                }
            }
            SimCommand::ToggleGodMode => {
                self.god_mode = !self.god_mode;
                log::info!("God mode {}.", if self.god_mode { "on" } else { "off" });
            }
            SimCommand::SpawnNearPlayer => {
                let offset = Vec3::new(SPAWN_NEAR_PLAYER_OFFSET, 0.0, SPAWN_NEAR_PLAYER_OFFSET);
                let position = self.player.position + offset;
                self.spawn(position);
            }
            SimCommand::SetHealthBars { visible } => {
                self.registry.set_health_bars(visible);
                self.player.health_bar_enabled = visible;
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. God mode keeps the player topped up
        if self.god_mode && self.player.alive {
            self.player.health.fill();
        }
        // 2. Controller update
        systems::ai::run(&mut self.registry, &self.player, dt, &mut self.cues);
        // 3. Knockback integration
        systems::knockback::run(&mut self.registry, &mut self.player, dt);
        // 4. Overlap delivery
        let overlaps = std::mem::take(&mut self.overlap_queue);
        for overlap in &overlaps {
            if let Err(err) = self.deliver(overlap) {
                log::error!("Dropped overlap on {:?}: {err}", overlap.target);
            }
        }
        self.overlap_queue = overlaps;
        self.overlap_queue.clear();
        // 5. Reclaim dead actors
        self.registry.sweep(&mut self.bus, &mut self.reclaim_buffer);
        // 6. Expire particles
        self.particles.sweep(dt);
        // 7. Encounter listeners
        self.dispatch_encounter_events();
    }

    fn deliver(&mut self, overlap: &Overlap) -> Result<HitReport, PoolError> {
        let mut death = DeathContext {
            rng: &mut self.rng,
            loot: &mut self.loot,
            cues: &mut self.cues,
        };

        let target = match overlap.target {
            HitTarget::Player => &mut self.player,
            HitTarget::Actor(handle) => {
                if !self.registry.is_active(handle)? {
                    return Ok(HitReport::Ignored(IgnoreReason::Inactive));
                }
                self.registry.get_mut(handle)?
            }
        };

        let report = combat::resolve(
            overlap.attacker_origin,
            overlap.attacker_faction,
            &overlap.weapon,
            target,
            &mut death,
        );
        let position = target.position;
        if report.landed() {
            self.play_hit_particle(position);
        }
        Ok(report)
    }

    fn play_hit_particle(&mut self, position: Vec3) {
        self.particles.play(position);
        self.cues.push(Cue::ParticlePlayed { position });
    }

    fn dispatch_encounter_events(&mut self) {
        for zone in self.zones.values_mut() {
            zone.handle_events();
        }
        let enemies_alive = self.registry.live_count_of(ActorKind::Enemy);
        for gate in self.gates.values_mut() {
            gate.handle_events(enemies_alive, &mut self.cues);
        }
    }

    fn snapshot(&mut self) -> SimSnapshot {
        let cues = std::mem::take(&mut self.cues);
        systems::snapshot::build_snapshot(SnapshotInputs {
            time: self.time,
            registry: &self.registry,
            player: &self.player,
            particles: &self.particles,
            loot_on_ground: loot::count(&self.loot),
            gates: &self.gates,
            cues,
        })
    }
}
