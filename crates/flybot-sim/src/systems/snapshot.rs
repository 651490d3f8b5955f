//! Snapshot system: queries the ECS world and builds the per-step FrameReport.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use flybot_core::components::{Pilot, Vitals};
use flybot_core::enums::SimRole;
use flybot_core::events::{HudUpdate, ReplicationEvent, SimEvent};
use flybot_core::state::{FrameReport, PawnView, ShotView};
use flybot_core::types::{Pose, SimTime};

use crate::shot::Shot;
use crate::systems::animation::body_pose;

/// Build a complete FrameReport from the current world state.
pub fn build_report(
    world: &World,
    time: &SimTime,
    role: SimRole,
    events: Vec<SimEvent>,
    hud: Vec<HudUpdate>,
    replication: Vec<ReplicationEvent>,
) -> FrameReport {
    FrameReport {
        time: *time,
        role,
        pawns: build_pawns(world),
        shots: build_shots(world),
        events,
        hud,
        replication,
    }
}

/// Pawn views, sorted by player for stable output.
fn build_pawns(world: &World) -> Vec<PawnView> {
    let mut pawns: Vec<PawnView> = world
        .query::<(&Pose, &Pilot, &Vitals)>()
        .iter()
        .map(|(_, (pose, pilot, vitals))| PawnView {
            player: pilot.player,
            position: pose.position,
            rotation: pose.rotator(),
            body_position: body_pose(pose, pilot).position,
            tilt: pilot.tilt.angle,
            free_fly: pilot.free_fly,
            shooting: pilot.shooting,
            health: vitals.health.current(),
            max_health: vitals.health.max(),
            power: vitals.power.current(),
            max_power: vitals.power.max(),
            camera_arm: pilot.camera_arm,
        })
        .collect();
    pawns.sort_by_key(|p| p.player);
    pawns
}

fn build_shots(world: &World) -> Vec<ShotView> {
    let mut shots: Vec<ShotView> = world
        .query::<(&Pose, &Shot)>()
        .iter()
        .map(|(_, (pose, shot))| ShotView {
            id: shot.id,
            instigator: shot.instigator_player,
            position: pose.position,
            remaining_secs: shot.remaining_secs,
        })
        .collect();
    shots.sort_by_key(|s| s.id);
    shots
}
