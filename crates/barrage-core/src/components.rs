//! ECS components for hecs bullet entities.
//!
//! Components are plain data structs with no game logic; systems in the
//! sim crate mutate them. `Position` and `Velocity` from `types` are used
//! as components as well.

use serde::{Deserialize, Serialize};

use crate::config::TriggerConfig;
use crate::enums::{BulletType, RotationMode};

/// Identity and combat state of a bullet entity.
///
/// `active` mirrors the pool's checked-out/free split: a pooled handle that
/// has been released keeps its components but is skipped by every system
/// until it is re-issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub bullet_type: BulletType,
    /// Damage dealt on impact.
    pub damage: i32,
    /// Set once on the first near-miss; never re-triggered while checked out.
    pub grazed: bool,
    /// Index of the owning emitter, `None` once detached.
    pub owner: Option<usize>,
    /// Checked out of the pool and live in the world.
    pub active: bool,
}

/// Scalar motion parameters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Kinematics {
    /// Applied along the current heading each tick (curved speed-up or
    /// slow-down along the flight path, not a force vector).
    pub acceleration: f32,
    /// Constant downward pull when set.
    pub gravity: bool,
}

/// Sprite orientation in degrees (0° = up, clockwise).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub angle_deg: f32,
}

/// In-flight rotation behavior. The mode itself mutates: a constant spin's
/// speed grows by its acceleration each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub mode: RotationMode,
}

/// Finite lifetime. Absent on bullets that live until they leave the field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifespan {
    pub elapsed_secs: f32,
    pub total_secs: f32,
}

impl Lifespan {
    pub fn new(total_secs: f32) -> Self {
        Self {
            elapsed_secs: 0.0,
            total_secs,
        }
    }
}

/// Zone-trigger state for bullets that reconfigure themselves when crossing
/// an effect zone boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerState {
    pub config: TriggerConfig,
    /// Whether a one-shot enter effect has fired for this checkout.
    pub enter_invoked: bool,
    /// Zone indices the bullet is currently inside.
    pub inside: Vec<u32>,
}

impl TriggerState {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            enter_invoked: false,
            inside: Vec::new(),
        }
    }
}
