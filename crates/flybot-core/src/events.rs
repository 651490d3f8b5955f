//! Events emitted by the simulation for HUD, effects and replication.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::Visibility;
use crate::gauge::GaugeReading;
use crate::types::{PlayerId, ShotId};

/// Gameplay events for logging, effects and audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    PawnJoined {
        player: PlayerId,
        spawn_slot: Option<usize>,
    },
    PawnLeft {
        player: PlayerId,
    },
    ShotFired {
        player: PlayerId,
        shot: ShotId,
        position: DVec3,
    },
    /// A shot resolved against something damageable.
    ShotHit {
        shot: ShotId,
        instigator: PlayerId,
        target: PlayerId,
        /// Health change that actually landed.
        applied: f64,
    },
    /// Cosmetic hit effect; fired once per resolved contact.
    ImpactEffect {
        shot: ShotId,
        position: DVec3,
        orientation: DQuat,
    },
    /// A shot reached the end of its lifetime without contact.
    ShotExpired {
        shot: ShotId,
    },
    /// Health crossed to zero. Fired once per crossing.
    PawnEliminated {
        player: PlayerId,
        by: Option<PlayerId>,
    },
}

/// A gauge change for a specific player's HUD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudUpdate {
    pub player: PlayerId,
    pub reading: GaugeReading,
}

/// The complete set of fields mirrored to remote peers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field")]
pub enum ReplicatedField {
    Shooting { shooting: bool },
    Health { current: f64, max: f64 },
}

impl ReplicatedField {
    /// Shooting intent is visible to everyone; health only to its owner.
    pub fn visibility(&self) -> Visibility {
        match self {
            ReplicatedField::Shooting { .. } => Visibility::Observers,
            ReplicatedField::Health { .. } => Visibility::Owner,
        }
    }
}

/// One outward replication record, consumed by a transport adapter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplicationEvent {
    pub player: PlayerId,
    pub field: ReplicatedField,
    pub scope: Visibility,
}

impl ReplicationEvent {
    pub fn new(player: PlayerId, field: ReplicatedField) -> Self {
        Self {
            player,
            field,
            scope: field.visibility(),
        }
    }
}
