//! Enumeration types used throughout the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bullet archetype tag. Pools are keyed by this, so two bullets with the
/// same tag are interchangeable once recycled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletType {
    #[default]
    Undefined,
    /// Player's default shot.
    PlayerShot,
    /// Player's homing needle shot.
    PlayerNeedle,
    BallSmall,
    BallLarge,
    StarSmall,
    StarLarge,
    Needle,
    Crystal,
}

/// How a bullet orients itself while in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum RotationMode {
    /// Keep whatever orientation the bullet spawned with.
    #[default]
    None,
    /// Keep the sprite's up axis (minus an angular offset) aligned with the
    /// direction of travel.
    FaceTravel { offset_deg: f32 },
    /// Spin at a constant (accelerating) rate, independent of travel.
    ConstantSpin {
        /// Degrees per second.
        speed: f32,
        /// Degrees per second per second, added to `speed` each tick.
        acceleration: f32,
    },
}

/// How an emitter picks its firing direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum AimMode {
    /// Fire at a stored angle (degrees, 0° = up, clockwise).
    Fixed { angle_deg: f32 },
    /// Recompute the direction toward the target every emission.
    /// The target defaults to the player when none is set.
    LockOn,
}

/// The shape of a single volley.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Pattern {
    /// One bullet along the aim direction.
    Linear,
    /// `count` bullets at even 360/count steps starting from the aim.
    Radial { count: u32 },
    /// `count` bullets inside a `wideness_deg` window centered on the aim.
    Arc { count: u32, wideness_deg: f32 },
    /// One bullet, jittered uniformly within ±spread_deg/2 of the aim.
    Spray { spread_deg: f32 },
}

/// Score pickup category handed to the spawn collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Ordinary point pickup.
    Score,
    /// Bonus pickup from a converted bullet or a phase transition.
    BonusScore,
    Power,
}

/// Named audio/animation cues. Fire-and-forget for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CueId {
    PhaseStart,
    PhaseEnd,
    BossHit,
    BossDeath,
    PlayerHit,
    Graze,
    Transition,
    Timeout,
}

/// Why a bullet was removed from play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposalReason {
    /// Finite lifespan ran out.
    LifespanExpired,
    /// Left the playfield (plus margin).
    OutOfBounds,
    /// Struck the player.
    HitPlayer,
    /// Struck the boss (player-side bullets routed through the pool).
    HitBoss,
    /// Swept at the end of an attack phase; converted to a score pickup.
    PhaseSweep,
}

/// Direction change applied to a bullet by a trigger effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionChange {
    /// Re-aim at the player instead of using `new_direction`.
    #[serde(default)]
    pub target_player: bool,
    /// Fixed direction (ignored when `target_player` is set).
    #[serde(default)]
    pub new_direction: Vec2,
    /// Also rotate the bullet sprite to the new heading.
    #[serde(default)]
    pub face_new_direction: bool,
}
