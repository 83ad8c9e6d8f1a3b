//! Kind-specific default profiles.
//!
//! Consolidates per-kind tuning so the engine config can start from sane values.

use skirmish_core::enums::ActorKind;
use skirmish_core::profile::{ActorProfile, AiThresholds};

/// Default AI thresholds for melee enemies.
pub fn enemy_thresholds() -> AiThresholds {
    use skirmish_core::constants::*;

    AiThresholds {
        look_radius: ENEMY_LOOK_RADIUS,
        attack_radius: ENEMY_ATTACK_RADIUS,
        stopping_distance: ENEMY_STOPPING_DISTANCE,
    }
}

/// Get the default profile for a given kind.
pub fn get_profile(kind: ActorKind) -> ActorProfile {
    use skirmish_core::constants::*;

    match kind {
        ActorKind::Enemy => ActorProfile {
            thresholds: Some(enemy_thresholds()),
            max_health: DEFAULT_MAX_HEALTH,
            knockback_resistance: 1.0,
            loot_drop_percent: ENEMY_LOOT_DROP_PERCENT,
        },
        ActorKind::Breakable => ActorProfile {
            thresholds: None,
            max_health: BREAKABLE_MAX_HEALTH,
            knockback_resistance: 0.0, // props don't slide
            loot_drop_percent: BREAKABLE_LOOT_DROP_PERCENT,
        },
        ActorKind::Player => ActorProfile {
            thresholds: None,
            max_health: DEFAULT_MAX_HEALTH,
            knockback_resistance: 1.0,
            loot_drop_percent: 0.0,
        },
    }
}
