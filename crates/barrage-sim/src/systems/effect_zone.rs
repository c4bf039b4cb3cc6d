//! Effect zones: regions that reconfigure trigger bullets crossing their
//! boundary, mid-flight.

use glam::Vec2;
use hecs::World;

use barrage_core::components::{Bullet, Kinematics, Orientation, Rotation, TriggerState};
use barrage_core::config::{TriggerEffect, ZoneConfig};
use barrage_core::enums::{DirectionChange, RotationMode};
use barrage_core::types::{heading_degrees, Position, Velocity};

fn contains(zone: &ZoneConfig, point: Vec2) -> bool {
    point.x >= zone.min.x && point.x <= zone.max.x && point.y >= zone.min.y && point.y <= zone.max.y
}

/// Detect zone enter/exit edges for every live trigger bullet and apply the
/// configured effects. Enter effects honor the one-shot flag; exit effects
/// always reapply.
pub fn run(world: &mut World, zones: &[ZoneConfig], player_position: Vec2) {
    if zones.is_empty() {
        return;
    }

    for (_entity, (bullet, position, velocity, kinematics, rotation, orientation, trigger)) in
        world.query_mut::<(
            &Bullet,
            &Position,
            &mut Velocity,
            &mut Kinematics,
            &mut Rotation,
            &mut Orientation,
            &mut TriggerState,
        )>()
    {
        if !bullet.active {
            continue;
        }

        for (index, zone) in zones.iter().enumerate() {
            let index = index as u32;
            let inside_now = contains(zone, position.0);
            let was_inside = trigger.inside.contains(&index);

            if inside_now && !was_inside {
                trigger.inside.push(index);
                if let Some(effect) = trigger.config.on_enter {
                    if !(trigger.config.one_shot_enter && trigger.enter_invoked) {
                        trigger.enter_invoked = true;
                        apply_effect(
                            &effect,
                            position.0,
                            velocity,
                            kinematics,
                            rotation,
                            orientation,
                            player_position,
                        );
                    }
                }
            } else if !inside_now && was_inside {
                trigger.inside.retain(|&z| z != index);
                if let Some(effect) = trigger.config.on_exit {
                    apply_effect(
                        &effect,
                        position.0,
                        velocity,
                        kinematics,
                        rotation,
                        orientation,
                        player_position,
                    );
                }
            }
        }
    }
}

/// Apply one trigger effect to a bullet. Unset fields leave the bullet
/// alone; speed and direction combine so a lone direction change keeps the
/// current speed.
fn apply_effect(
    effect: &TriggerEffect,
    position: Vec2,
    velocity: &mut Velocity,
    kinematics: &mut Kinematics,
    rotation: &mut Rotation,
    orientation: &mut Orientation,
    player_position: Vec2,
) {
    if let Some(acceleration) = effect.acceleration {
        kinematics.acceleration = acceleration;
    }

    if effect.spin_speed.is_some() || effect.spin_acceleration.is_some() {
        let (mut speed, mut acceleration) = match rotation.mode {
            RotationMode::ConstantSpin {
                speed,
                acceleration,
            } => (speed, acceleration),
            _ => (0.0, 0.0),
        };
        if let Some(value) = effect.spin_speed {
            speed = value;
        }
        if let Some(value) = effect.spin_acceleration {
            acceleration = value;
        }
        rotation.mode = RotationMode::ConstantSpin {
            speed,
            acceleration,
        };
    }

    match (effect.speed, effect.direction) {
        (Some(speed), Some(change)) => {
            let direction = new_direction(&change, position, player_position);
            velocity.0 = direction * speed;
            reorient(&change, direction, orientation);
        }
        (Some(speed), None) => {
            if let Some(heading) = velocity.0.try_normalize() {
                velocity.0 = heading * speed;
            }
        }
        (None, Some(change)) => {
            let speed = velocity.0.length();
            let direction = new_direction(&change, position, player_position);
            velocity.0 = direction * speed;
            reorient(&change, direction, orientation);
        }
        (None, None) => {}
    }
}

fn new_direction(change: &DirectionChange, position: Vec2, player_position: Vec2) -> Vec2 {
    if change.target_player {
        (player_position - position).try_normalize().unwrap_or(Vec2::Y)
    } else {
        change.new_direction.try_normalize().unwrap_or(Vec2::Y)
    }
}

fn reorient(change: &DirectionChange, direction: Vec2, orientation: &mut Orientation) {
    if change.face_new_direction {
        orientation.angle_deg = heading_degrees(direction);
    }
}
