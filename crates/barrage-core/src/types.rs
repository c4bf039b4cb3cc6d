//! Fundamental geometric and simulation types.
//!
//! The playfield is 2D: x = right, y = up. Firing angles are measured in
//! degrees, 0° = straight up, increasing clockwise, so the unit direction
//! for an angle θ is `(sin θ, cos θ)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World position of an entity (playfield units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

/// Velocity of an entity (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f32 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Unit direction for a firing angle in degrees (0° = up, clockwise).
pub fn direction_from_degrees(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}

/// Firing angle in degrees (0° = up, clockwise) for a direction vector.
pub fn heading_degrees(dir: Vec2) -> f32 {
    dir.x.atan2(dir.y).to_degrees()
}

/// Rotate a vector clockwise by the given angle in degrees.
pub fn rotate_cw(v: Vec2, angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    let (s, c) = rad.sin_cos();
    Vec2::new(v.x * c + v.y * s, -v.x * s + v.y * c)
}
