//! Pattern geometry for BARRAGE.
//!
//! Pure functions that turn an aim configuration into concrete launch
//! directions. Plain data in, unit vectors out; no ECS dependency.

pub mod aim;
pub mod spread;

pub use barrage_core as core;
