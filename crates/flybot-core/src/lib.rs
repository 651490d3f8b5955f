//! Core types and definitions for the FLYBOT simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! poses, resource gauges, the cooldown gate, the tilt model, tuning,
//! commands, events and frame reports. It has no dependency on the ECS
//! or on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod cooldown;
pub mod enums;
pub mod events;
pub mod gauge;
pub mod state;
pub mod tilt;
pub mod tuning;
pub mod types;
