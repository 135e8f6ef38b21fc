#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use crate::commands::{HostCommand, MoveInput};
    use crate::components::Transform;
    use crate::config::{ConfigError, FlockConfig, MissileConfig};
    use crate::constants::*;
    use crate::enums::*;
    use crate::types::SimTime;

    #[test]
    fn test_update_phase_toggle_alternates() {
        let phase = UpdatePhase::default();
        assert_eq!(phase, UpdatePhase::ProcessFirstHalf);
        assert_eq!(phase.toggle(), UpdatePhase::ProcessSecondHalf);
        assert_eq!(phase.toggle().toggle(), UpdatePhase::ProcessFirstHalf);
    }

    #[test]
    fn test_partitions_cover_population_exactly_once() {
        for len in [0usize, 1, 2, 3, 4, 99, 100] {
            let first = UpdatePhase::ProcessFirstHalf.partition(len);
            let second = UpdatePhase::ProcessSecondHalf.partition(len);
            assert_eq!(first.start, 0);
            assert_eq!(first.end, second.start, "halves must be contiguous");
            assert_eq!(second.end, len);
            assert_eq!(first.len() + second.len(), len);
        }
    }

    #[test]
    fn test_odd_population_gives_extra_boid_to_second_half() {
        assert_eq!(UpdatePhase::ProcessFirstHalf.partition(5), 0..2);
        assert_eq!(UpdatePhase::ProcessSecondHalf.partition(5), 2..5);
    }

    #[test]
    fn test_flock_config_defaults() {
        let config = FlockConfig::default();
        assert_eq!(config.population, NUM_BOIDS);
        assert_eq!(config.range_attract, 30.0);
        assert_eq!(config.range_repel, 20.0);
        assert_eq!(config.attract_vmax, 5.0);
        assert_eq!(config.attract_factor, 4.0);
        assert_eq!(config.repel_factor, 2.0);
        assert_eq!(config.align_factor, 2.0);
        assert_eq!(config.neighborhood, Neighborhood::Partition);
        assert!(!config.apply_align_factor);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            FlockConfig::from_json_str(r#"{ "population": 8, "neighborhood": "Flock" }"#).unwrap();
        assert_eq!(config.population, 8);
        assert_eq!(config.neighborhood, Neighborhood::Flock);
        assert_eq!(config.max_speed, BOID_MAX_SPEED);

        let missiles = MissileConfig::from_json_str(r#"{ "thrust": [0.0, 2.0, 0.0] }"#).unwrap();
        assert_eq!(missiles.capacity, MAX_MISSILES);
        assert_eq!(missiles.thrust, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_flock_config_rejects_inverted_speed_band() {
        let config = FlockConfig {
            min_speed: 60.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                min_field: "min_speed",
                max_field: "max_speed",
            })
        );
    }

    #[test]
    fn test_flock_config_rejects_negative_range() {
        let config = FlockConfig {
            range_repel: -1.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("range_repel"), "{err}");
    }

    #[test]
    fn test_missile_config_rejects_empty_pool() {
        let config = MissileConfig {
            capacity: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPool { field: "capacity" })
        );
    }

    #[test]
    fn test_sim_time_accumulates_variable_dt() {
        let mut time = SimTime::default();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_transform_forward_follows_rotation() {
        let transform = Transform::default();
        assert!((transform.forward() - Vec3::Z).length() < 1e-6);

        let turned = Transform {
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Default::default()
        };
        assert!((turned.forward() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_host_command_json_is_tagged() {
        let json = serde_json::to_string(&HostCommand::FireMissile).unwrap();
        assert_eq!(json, r#"{"type":"FireMissile"}"#);

        let cmd: HostCommand = serde_json::from_str(
            r#"{"type":"SetMoveInput","input":{"forward":true,"back":false,"left":false,"right":true}}"#,
        )
        .unwrap();
        match cmd {
            HostCommand::SetMoveInput { input } => assert_eq!(
                input,
                MoveInput {
                    forward: true,
                    right: true,
                    ..Default::default()
                }
            ),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
