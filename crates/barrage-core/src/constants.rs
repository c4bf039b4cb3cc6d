//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Playfield ---

/// Half-width of the playfield (units). x spans [-HALF_WIDTH, HALF_WIDTH].
pub const PLAYFIELD_HALF_WIDTH: f32 = 8.0;

/// Half-height of the playfield (units). y spans [-HALF_HEIGHT, HALF_HEIGHT].
pub const PLAYFIELD_HALF_HEIGHT: f32 = 10.0;

/// Margin beyond the playfield edge before a bullet is disposed.
pub const OOB_MARGIN: f32 = 2.0;

// --- Kinematics ---

/// Gravity magnitude (units/s²), applied straight down when enabled.
pub const GRAVITY: f32 = 9.81;

// --- Scoring ---

/// Points for grazing a bullet (once per bullet).
pub const GRAZE_REWARD: i64 = 500;

/// Points for depleting one of the boss's lives.
pub const PHASE_CLEAR_REWARD: i64 = 10_000;

/// Points for defeating the boss outright.
pub const DEATH_REWARD: i64 = 50_000;

/// Points deducted when an attack phase times out.
pub const TIMEOUT_PENALTY: i64 = 5_000;

// --- Phase transitions ---

/// Seconds the boss stays invulnerable while a transition plays out.
pub const TRANSITION_INVULN_SECS: f32 = 2.0;

/// Bonus pickups scattered around the boss on a life-loss transition.
pub const TRANSITION_PICKUP_COUNT: u32 = 6;

/// Bonus pickups scattered on the death transition.
pub const DEATH_PICKUP_COUNT: u32 = 12;

/// Radius of the scatter circle for transition pickups.
pub const TRANSITION_PICKUP_RADIUS: f32 = 1.5;

// --- Pooling ---

/// Bullets pre-registered per bullet type used by an encounter.
pub const POOL_PREWARM_PER_TYPE: usize = 32;
