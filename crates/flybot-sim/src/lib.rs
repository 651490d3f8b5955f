//! Simulation engine for the Flybot arena.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces FrameReports for the host.

pub mod capability;
pub mod config;
pub mod engine;
pub mod shot;
pub mod systems;
pub mod world_setup;

pub use config::{ConfigError, SimConfig};
pub use engine::SimulationEngine;
pub use flybot_core as core;

#[cfg(test)]
mod tests;
