//! Per-tick passes over the engine's pools.
//!
//! Systems are plain functions over the state they touch. They do not own
//! state; everything lives in the registry, the player, and the pools.

pub mod ai;
pub mod knockback;
pub mod snapshot;
