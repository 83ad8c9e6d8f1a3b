//! Actor AI for SKIRMISH.
//!
//! Implements the per-actor melee state machine and the default
//! behavior profiles for each actor kind.

pub mod fsm;
pub mod profiles;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
