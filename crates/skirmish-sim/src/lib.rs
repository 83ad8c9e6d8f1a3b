//! Simulation engine for SKIRMISH.
//!
//! Owns the actor and particle pools, the event bus, and the loot world,
//! runs systems once per tick, and produces `SimSnapshot`s for the driver.

pub mod actor;
pub mod combat;
pub mod encounter;
pub mod engine;
pub mod event_bus;
pub mod loot;
pub mod particles;
pub mod pool;
pub mod registry;
pub mod systems;

pub use skirmish_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
