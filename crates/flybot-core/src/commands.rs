//! Player commands sent from input or the network to the simulation.
//!
//! Commands are queued and processed at the next step boundary, using that
//! step's `dt` for anything time-scaled.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::{PlayerId, Rotator};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Spawn a pawn for this player at a free player start.
    Join { player: PlayerId },
    /// Player disconnected; remove their pawn.
    Leave { player: PlayerId },

    // --- Flight ---
    /// Movement axes in the pawn's facing frame (x forward, y left, z up).
    Move { player: PlayerId, input: DVec3 },
    /// Rotation axes, scaled by the rotate scale and `dt`.
    Rotate { player: PlayerId, input: Rotator },
    ToggleFreeFly { player: PlayerId },
    /// Camera distance axis.
    AdjustCameraArm { player: PlayerId, axis: f64 },

    // --- Weapon ---
    /// Press (`true`) or release (`false`) the shoot input.
    SetShooting { player: PlayerId, shooting: bool },
}

impl PlayerCommand {
    pub fn player(&self) -> PlayerId {
        match self {
            PlayerCommand::Join { player }
            | PlayerCommand::Leave { player }
            | PlayerCommand::Move { player, .. }
            | PlayerCommand::Rotate { player, .. }
            | PlayerCommand::ToggleFreeFly { player }
            | PlayerCommand::AdjustCameraArm { player, .. }
            | PlayerCommand::SetShooting { player, .. } => *player,
        }
    }
}
