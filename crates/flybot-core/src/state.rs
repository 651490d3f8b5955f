//! Frame report: the outward view of the simulation after each step.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::SimRole;
use crate::events::{HudUpdate, ReplicationEvent, SimEvent};
use crate::types::{PlayerId, Rotator, ShotId, SimTime};

/// Everything produced by one `advance` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameReport {
    pub time: SimTime,
    pub role: SimRole,
    pub pawns: Vec<PawnView>,
    pub shots: Vec<ShotView>,
    pub events: Vec<SimEvent>,
    pub hud: Vec<HudUpdate>,
    pub replication: Vec<ReplicationEvent>,
}

impl FrameReport {
    pub fn pawn(&self, player: PlayerId) -> Option<&PawnView> {
        self.pawns.iter().find(|p| p.player == player)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PawnView {
    pub player: PlayerId,
    pub position: DVec3,
    pub rotation: Rotator,
    /// Visual body position (collision position plus bob).
    pub body_position: DVec3,
    pub tilt: f64,
    pub free_fly: bool,
    pub shooting: bool,
    pub health: f64,
    pub max_health: f64,
    pub power: f64,
    pub max_power: f64,
    pub camera_arm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotView {
    pub id: ShotId,
    pub instigator: PlayerId,
    pub position: DVec3,
    pub remaining_secs: f64,
}
