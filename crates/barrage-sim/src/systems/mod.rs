//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus whatever engine state
//! they need. They do not own state.

pub mod cleanup;
pub mod effect_zone;
pub mod motion;
pub mod snapshot;
