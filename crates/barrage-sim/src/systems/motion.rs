//! Bullet kinematics: acceleration along the heading, gravity, position
//! integration, rotation, and lifespan accounting.

use hecs::{Entity, World};

use barrage_core::components::{Bullet, Kinematics, Lifespan, Orientation, Rotation};
use barrage_core::constants::GRAVITY;
use barrage_core::enums::RotationMode;
use barrage_core::types::{heading_degrees, Position, Velocity};

/// Integrate every live bullet by `dt`. Bullets whose lifespan ran out are
/// pushed into `expired` for the engine to dispose.
pub fn run(world: &mut World, dt: f32, expired: &mut Vec<Entity>) {
    for (entity, (bullet, position, velocity, kinematics, rotation, orientation, lifespan)) in
        world.query_mut::<(
            &Bullet,
            &mut Position,
            &mut Velocity,
            &Kinematics,
            &mut Rotation,
            &mut Orientation,
            Option<&mut Lifespan>,
        )>()
    {
        if !bullet.active {
            continue;
        }

        // Acceleration acts along the current heading: the bullet speeds up
        // or slows down on its path instead of being pushed off it.
        if kinematics.acceleration != 0.0 {
            if let Some(heading) = velocity.0.try_normalize() {
                velocity.0 += heading * kinematics.acceleration * dt;
            }
        }

        if kinematics.gravity {
            velocity.0.y -= GRAVITY * dt;
        }

        position.0 += velocity.0 * dt;

        match &mut rotation.mode {
            RotationMode::None => {}
            RotationMode::FaceTravel { offset_deg } => {
                if velocity.0.length_squared() > 0.0 {
                    orientation.angle_deg = heading_degrees(velocity.0) - *offset_deg;
                }
            }
            RotationMode::ConstantSpin {
                speed,
                acceleration,
            } => {
                orientation.angle_deg = (orientation.angle_deg + *speed * dt).rem_euclid(360.0);
                *speed += *acceleration * dt;
            }
        }

        if let Some(lifespan) = lifespan {
            lifespan.elapsed_secs += dt;
            if lifespan.elapsed_secs >= lifespan.total_secs {
                expired.push(entity);
            }
        }
    }
}
