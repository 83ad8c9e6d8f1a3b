#[cfg(test)]
mod tests {
    use glam::Vec3;

    use skirmish_core::enums::{ActorKind, AiState, MoveIntent};
    use skirmish_core::profile::AiThresholds;

    use crate::fsm::{evaluate, pursue_step, turn_toward, AiContext};
    use crate::profiles::{enemy_thresholds, get_profile};

    fn make_context(state: AiState, distance: f32, is_attacking: bool) -> AiContext {
        AiContext {
            state,
            alive: true,
            target_alive: true,
            distance,
            is_attacking,
            thresholds: enemy_thresholds(),
        }
    }

    #[test]
    fn test_idle_to_alert_inside_look_radius() {
        // look radius 10, target at 8
        let update = evaluate(&make_context(AiState::Idle, 8.0, false));
        assert!(update.state_changed);
        assert_eq!(update.new_state, AiState::Alert);
        assert!(update.roar);
        assert!(update.face_target);
    }

    #[test]
    fn test_idle_stays_idle_outside_look_radius() {
        let update = evaluate(&make_context(AiState::Idle, 12.0, false));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AiState::Idle);
        assert!(!update.roar);
    }

    #[test]
    fn test_look_radius_boundary_is_inclusive() {
        let update = evaluate(&make_context(AiState::Idle, 10.0, false));
        assert_eq!(update.new_state, AiState::Alert);
    }

    #[test]
    fn test_alert_back_to_idle_beyond_stopping_distance() {
        // stopping distance 15, target moves to 20
        let update = evaluate(&make_context(AiState::Alert, 20.0, false));
        assert!(update.state_changed);
        assert_eq!(update.new_state, AiState::Idle);
        assert_eq!(update.movement, MoveIntent::Stop);
    }

    #[test]
    fn test_alert_pursues_inside_hysteresis_band() {
        // 12 is past the look radius but short of the stopping distance
        let update = evaluate(&make_context(AiState::Alert, 12.0, false));
        assert_eq!(update.new_state, AiState::Pursuing);
        assert_eq!(update.movement, MoveIntent::Pursue);
        assert!(update.face_target);
    }

    #[test]
    fn test_pursuing_keeps_pursuing() {
        let update = evaluate(&make_context(AiState::Pursuing, 6.0, false));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AiState::Pursuing);
        assert_eq!(update.movement, MoveIntent::Pursue);
    }

    #[test]
    fn test_alert_to_attacking_in_range() {
        let update = evaluate(&make_context(AiState::Pursuing, 2.5, false));
        assert_eq!(update.new_state, AiState::Attacking);
        assert!(update.is_attacking);
        assert!(update.attack_started);
        assert!(update.face_target);
    }

    #[test]
    fn test_attack_hook_fires_once() {
        let first = evaluate(&make_context(AiState::Alert, 2.0, false));
        assert!(first.attack_started);

        let second = evaluate(&make_context(first.new_state, 2.0, first.is_attacking));
        assert_eq!(second.new_state, AiState::Attacking);
        assert!(!second.attack_started);
        assert!(!second.face_target, "no re-facing mid swing");
    }

    #[test]
    fn test_latch_holds_attacking_even_when_target_leaves() {
        // With the latch set, distance no longer matters
        let update = evaluate(&make_context(AiState::Attacking, 40.0, true));
        assert_eq!(update.new_state, AiState::Attacking);
        assert!(update.is_attacking);
        assert!(!update.attack_started);
    }

    #[test]
    fn test_cleared_latch_lets_actor_disengage() {
        let update = evaluate(&make_context(AiState::Attacking, 40.0, false));
        assert_eq!(update.new_state, AiState::Idle);
        assert!(!update.is_attacking);
    }

    #[test]
    fn test_dead_is_inert() {
        let update = evaluate(&make_context(AiState::Dead, 1.0, false));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AiState::Dead);

        let mut ctx = make_context(AiState::Idle, 1.0, false);
        ctx.alive = false;
        assert!(!evaluate(&ctx).state_changed);
    }

    #[test]
    fn test_dead_target_freezes_controller() {
        let mut ctx = make_context(AiState::Pursuing, 1.0, false);
        ctx.target_alive = false;
        let update = evaluate(&ctx);
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AiState::Pursuing);
        assert_eq!(update.movement, MoveIntent::Hold);
        assert!(!update.attack_started);
    }

    #[test]
    fn test_no_flapping_across_look_boundary() {
        // Walk the target back and forth across the look radius; once alerted
        // the actor only drops to Idle past the stopping distance.
        let mut state = AiState::Idle;
        let mut latch = false;
        let mut idle_drops = 0;
        for distance in [9.9, 10.1, 9.9, 10.1, 14.9, 10.1, 9.9] {
            let update = evaluate(&make_context(state, distance, latch));
            if update.state_changed && update.new_state == AiState::Idle {
                idle_drops += 1;
            }
            state = update.new_state;
            latch = update.is_attacking;
        }
        assert_eq!(idle_drops, 0);
        assert_eq!(state, AiState::Pursuing);
    }

    #[test]
    fn test_custom_thresholds() {
        let ctx = AiContext {
            thresholds: AiThresholds {
                look_radius: 4.0,
                attack_radius: 1.0,
                stopping_distance: 6.0,
            },
            ..make_context(AiState::Idle, 5.0, false)
        };
        assert_eq!(evaluate(&ctx).new_state, AiState::Idle);
    }

    #[test]
    fn test_pursue_step_stops_at_attack_radius() {
        let mut pos = Vec3::new(10.0, 0.0, 0.0);
        let target = Vec3::ZERO;
        for _ in 0..1000 {
            pos = pursue_step(pos, target, 3.5, 1.0 / 60.0, 3.0);
        }
        assert!((pos.x - 3.0).abs() < 1e-4);
        assert_eq!(pos.z, 0.0);
    }

    #[test]
    fn test_pursue_step_speed_limited() {
        let pos = pursue_step(Vec3::new(0.0, 1.0, 10.0), Vec3::ZERO, 2.0, 0.5, 0.0);
        assert!((pos.z - 9.0).abs() < 1e-5);
        assert_eq!(pos.y, 1.0, "height is untouched");
    }

    #[test]
    fn test_turn_toward_snaps_with_full_rate() {
        let facing = turn_toward(Vec3::Z, Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), 1.0);
        assert!((facing - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_turn_toward_partial_blend_stays_normalized() {
        let facing = turn_toward(Vec3::Z, Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), 0.25);
        assert!((facing.length() - 1.0).abs() < 1e-5);
        assert!(facing.x > 0.0 && facing.z > 0.0);
    }

    #[test]
    fn test_turn_toward_target_behind_still_turns() {
        let mut facing = Vec3::Z;
        for _ in 0..30 {
            facing = turn_toward(facing, Vec3::ZERO, Vec3::new(0.0, 0.0, -5.0), 0.25);
        }
        assert!(facing.z < -0.99, "facing {facing:?} never came around");
    }

    #[test]
    fn test_default_profiles_validate() {
        for kind in [ActorKind::Enemy, ActorKind::Breakable, ActorKind::Player] {
            assert!(get_profile(kind).validate().is_ok(), "{kind:?}");
        }
        assert!(get_profile(ActorKind::Enemy).thresholds.is_some());
        assert!(get_profile(ActorKind::Breakable).thresholds.is_none());
    }
}
