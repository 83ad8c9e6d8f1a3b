//! SKIRMISH headless driver.
//!
//! Wires the simulation engine to a fixed-rate game loop thread and a
//! scripted demo encounter that plays both sides of a fight.

pub mod demo;
pub mod game_loop;
pub mod state;

pub use skirmish_core as core;
