//! Headless host for the Flybot simulation.
//!
//! Runs the engine on a fixed-rate game-loop thread and hands each step's
//! replication events to a transport adapter.

pub mod game_loop;
pub mod state;
pub mod transport;
