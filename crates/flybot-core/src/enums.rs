//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Whether this simulation owns the game state or mirrors it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimRole {
    /// Applies damage, spawns shots and emits replication.
    #[default]
    Authority,
    /// Receives replicated fields for cosmetic use only.
    Observer,
}

/// Who may receive a replicated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Every remote observer of the pawn.
    Observers,
    /// Only the client that owns the pawn.
    Owner,
}

/// Why a shot attempt did nothing. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotRefusal {
    NotShooting,
    Cooldown,
    InsufficientPower,
    SpawnRefused,
}
