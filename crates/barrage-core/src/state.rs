//! Encounter snapshot — the complete visible state handed to the host
//! after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::BulletType;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete simulation state for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub time: SimTime,
    /// Whether a boss encounter is currently running (read by the host's
    /// wave spawner to suppress ordinary enemies).
    pub active: bool,
    pub boss: Option<BossView>,
    /// Every live bullet on the field.
    pub bullets: Vec<BulletView>,
    /// Events raised during this tick, in order.
    pub events: Vec<GameEvent>,
    pub score: ScoreView,
}

/// Boss status for the health bar and phase display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossView {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub life: u32,
    pub max_life: u32,
    pub invulnerable: bool,
    pub position: Vec2,
    /// Name of the attack phase currently invoking, if any.
    pub phase_name: Option<String>,
    /// Seconds left on the phase's time budget, if it has one.
    pub phase_time_left: Option<f32>,
}

/// One live bullet, enough for the host to draw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub bullet_type: BulletType,
    pub position: Vec2,
    /// Sprite orientation in degrees (0° = up, clockwise).
    pub angle_deg: f32,
    pub grazed: bool,
}

/// Running score totals.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub total: i64,
    pub grazes: u32,
    pub pickups_spawned: u32,
    pub phases_cleared: u32,
}
