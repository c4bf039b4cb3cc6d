//! Simulation engine for BARRAGE.
//!
//! Owns the hecs ECS world and the bullet pool, runs systems at a fixed
//! tick rate, and produces EncounterSnapshots for the host application.

pub mod boss;
pub mod emitter;
pub mod engine;
pub mod pool;
pub mod spellcard;
pub mod systems;

pub use barrage_core as core;
pub use engine::SimulationEngine;
