#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::config::*;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::state::EncounterSnapshot;
    use crate::types::{direction_from_degrees, heading_degrees, rotate_cw, SimTime};

    fn minimal_emitter() -> EmitterConfig {
        EmitterConfig {
            bullet_type: BulletType::BallSmall,
            offset: Vec2::ZERO,
            speed: 3.0,
            acceleration: 0.0,
            damage: 1,
            rotation: RotationMode::None,
            aim: AimMode::Fixed { angle_deg: 0.0 },
            aim_rotation_speed: 0.0,
            pattern: Pattern::Linear,
            batch: None,
            gravity: false,
            lifespan_secs: None,
            trigger: None,
        }
    }

    fn minimal_config() -> EncounterConfig {
        EncounterConfig {
            name: "test".to_string(),
            max_health: 100,
            lives: None,
            boss_position: Vec2::ZERO,
            phases: vec![PhaseConfig {
                name: "opening".to_string(),
                duration_secs: None,
                options: vec![OptionConfig {
                    fire_interval_secs: 0.5,
                    activation_delay_secs: 0.0,
                    scale_by_health: false,
                    fire_interval_delta: 0.0,
                    bullet_speed_delta: 0.0,
                    bullet_acceleration_delta: 0.0,
                    emitters: vec![minimal_emitter()],
                }],
            }],
            zones: vec![],
        }
    }

    // ---- Angle conventions ----

    #[test]
    fn test_direction_from_degrees_cardinals() {
        let up = direction_from_degrees(0.0);
        assert!((up.x - 0.0).abs() < 1e-6 && (up.y - 1.0).abs() < 1e-6);

        // Clockwise: 90° is to the right.
        let right = direction_from_degrees(90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);

        let down = direction_from_degrees(180.0);
        assert!(down.x.abs() < 1e-6 && (down.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_degrees_inverts_direction() {
        for angle in [0.0_f32, 30.0, 90.0, 135.0, 179.0] {
            let dir = direction_from_degrees(angle);
            assert!(
                (heading_degrees(dir) - angle).abs() < 1e-3,
                "heading({angle}) round-trip failed"
            );
        }
    }

    #[test]
    fn test_rotate_cw_quarter_turn() {
        let up = Vec2::new(0.0, 1.0);
        let right = rotate_cw(up, 90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);

        // Full turn is the identity.
        let back = rotate_cw(up, 360.0);
        assert!((back - up).length() < 1e-5);
    }

    // ---- SimTime ----

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.dt(), crate::constants::DT);
        for _ in 0..60 {
            time.advance();
        }
        assert_eq!(time.tick, 60);
        // 60 ticks at 60Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
    }

    // ---- Config validation ----

    #[test]
    fn test_valid_config_passes() {
        assert!(minimal_config().validate().is_ok());
    }

    #[test]
    fn test_empty_phases_rejected() {
        let mut config = minimal_config();
        config.phases.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_emitters_rejected() {
        let mut config = minimal_config();
        config.phases[0].options[0].emitters.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_pattern_count_rejected() {
        let mut config = minimal_config();
        config.phases[0].options[0].emitters[0].pattern = Pattern::Radial { count: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nonpositive_fire_interval_rejected() {
        let mut config = minimal_config();
        config.phases[0].options[0].fire_interval_secs = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_out_of_range_wideness_rejected() {
        let mut config = minimal_config();
        config.phases[0].options[0].emitters[0].pattern = Pattern::Arc {
            count: 5,
            wideness_deg: 400.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nonpositive_lifespan_rejected() {
        let mut config = minimal_config();
        config.phases[0].options[0].emitters[0].lifespan_secs = Some(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_zone_rejected() {
        let mut config = minimal_config();
        config.zones.push(ZoneConfig {
            min: Vec2::new(1.0, 1.0),
            max: Vec2::new(1.0, 3.0),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bullet_types_deduplicated() {
        let mut config = minimal_config();
        let mut second = minimal_emitter();
        second.bullet_type = BulletType::StarSmall;
        config.phases[0].options[0].emitters.push(second);
        config.phases[0].options[0].emitters.push(minimal_emitter());

        let types = config.bullet_types();
        assert_eq!(types, vec![BulletType::BallSmall, BulletType::StarSmall]);
    }

    // ---- Serde round-trips ----

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = minimal_config();
        config.phases[0].options[0].emitters[0].trigger = Some(TriggerConfig {
            one_shot_enter: true,
            on_enter: Some(TriggerEffect {
                speed: Some(5.0),
                direction: Some(DirectionChange {
                    target_player: true,
                    new_direction: Vec2::ZERO,
                    face_new_direction: true,
                }),
                ..Default::default()
            }),
            on_exit: None,
        });

        let json = serde_json::to_string(&config).unwrap();
        let back: EncounterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(json, serde_json::to_string(&back).unwrap());
        assert!(back.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_validates() {
        let dir = std::env::temp_dir().join("barrage_test_config");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("encounter.json");

        let config = minimal_config();
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded.name, "test");
        assert_eq!(loaded.phases.len(), 1);

        // A structurally valid but semantically broken file is rejected.
        let mut broken = minimal_config();
        broken.phases[0].options[0].fire_interval_secs = -1.0;
        std::fs::write(&path, serde_json::to_string(&broken).unwrap()).unwrap();
        assert!(load_from_file(&path).is_err());

        assert!(load_from_file(&dir.join("missing.json")).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_rotation_mode_serde() {
        let variants = vec![
            RotationMode::None,
            RotationMode::FaceTravel { offset_deg: 90.0 },
            RotationMode::ConstantSpin {
                speed: 180.0,
                acceleration: 10.0,
            },
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: RotationMode = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_pattern_serde() {
        let variants = vec![
            Pattern::Linear,
            Pattern::Radial { count: 12 },
            Pattern::Arc {
                count: 5,
                wideness_deg: 60.0,
            },
            Pattern::Spray { spread_deg: 30.0 },
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: Pattern = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::ScoreAwarded { amount: 500 },
            GameEvent::HealthFraction { value: 0.6 },
            GameEvent::PhaseAnnounced {
                name: "opening".to_string(),
            },
            GameEvent::CountdownStarted { seconds: 45.0 },
            GameEvent::CountdownCancelled,
            GameEvent::Cue { cue: CueId::Graze },
            GameEvent::PickupSpawned {
                kind: PickupKind::BonusScore,
                position: Vec2::new(1.0, -2.0),
            },
            GameEvent::LifeLost { remaining: 1 },
            GameEvent::BossDefeated,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = EncounterSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: EncounterSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }
}
