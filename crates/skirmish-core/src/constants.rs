//! Simulation constants and tuning parameters.

/// Nominal tick rate of the driver loop (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Pools ---

/// Enemy slots allocated when the registry is created.
pub const DEFAULT_ENEMY_POOL_SIZE: usize = 10;

/// Particle slots allocated when the particle pool is created.
pub const DEFAULT_PARTICLE_POOL_SIZE: usize = 8;

/// Lifetime of a particle effect before it is stopped and freed (seconds).
pub const DEFAULT_PARTICLE_CUTOFF_SECS: f32 = 0.25;

// --- AI ---

/// Radius of the enemy's awareness sphere (m).
pub const ENEMY_LOOK_RADIUS: f32 = 10.0;

/// Enemy melee reach (m).
pub const ENEMY_ATTACK_RADIUS: f32 = 3.0;

/// Distance at which an alerted enemy gives up the chase (m).
pub const ENEMY_STOPPING_DISTANCE: f32 = 15.0;

/// Walking speed while pursuing (m/s).
pub const PURSUE_SPEED: f32 = 3.5;

/// Blend rate used to turn an actor toward its target (per second).
pub const FACE_TURN_RATE: f32 = 15.0;

// --- Health ---

/// Default maximum hit points for enemies and the player.
pub const DEFAULT_MAX_HEALTH: f32 = 100.0;

/// Default maximum hit points for breakable props.
pub const BREAKABLE_MAX_HEALTH: f32 = 10.0;

// --- Knockback ---

/// Impulse components smaller than this are snapped to zero.
pub const KNOCKBACK_EPSILON: f32 = 0.01;

/// Scale applied to the impulse both when integrating and when decaying.
pub const KNOCKBACK_TIME_CONSTANT: f32 = 10.0;

// --- Loot ---

/// Default chance (percent) that a slain enemy drops loot.
pub const ENEMY_LOOT_DROP_PERCENT: f32 = 25.0;

/// Default chance (percent) that a smashed breakable drops loot.
pub const BREAKABLE_LOOT_DROP_PERCENT: f32 = 50.0;

// --- Debug commands ---

/// Offset from the player at which `SpawnNearPlayer` places an enemy (m).
pub const SPAWN_NEAR_PLAYER_OFFSET: f32 = 3.0;
