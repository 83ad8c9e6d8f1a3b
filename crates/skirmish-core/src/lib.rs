//! Core types and definitions for the SKIRMISH combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! handles, actor kinds, health and knockback components, events, commands,
//! snapshots, and tuning constants. It has no dependency on any runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod profile;
pub mod state;
pub mod types;

pub use glam::Vec3;
