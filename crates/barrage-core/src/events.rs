//! Events emitted by the simulation for the reward/UI/audio collaborators.
//!
//! The engine accumulates these during a tick and drains them into the
//! snapshot. All of them are fire-and-forget: the core never waits on the
//! host to acknowledge one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{CueId, PickupKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Add (or, for penalties, subtract) points on the score display.
    ScoreAwarded { amount: i64 },
    /// Boss health bar fraction in [0, 1].
    HealthFraction { value: f32 },
    /// A new attack phase started; show its name.
    PhaseAnnounced { name: String },
    /// Start the phase timeout countdown display.
    CountdownStarted { seconds: f32 },
    /// The phase ended before its countdown expired.
    CountdownCancelled,
    /// Fire-and-forget audio/animation cue.
    Cue { cue: CueId },
    /// Ask the spawn collaborator to place a pickup.
    PickupSpawned { kind: PickupKind, position: Vec2 },
    /// The boss lost a life; `remaining` lives are left.
    LifeLost { remaining: u32 },
    /// The boss is defeated and the encounter is over.
    BossDefeated,
}
