//! Cosmetic pawn animation: tilt relaxation and vertical bob.

use glam::{DQuat, DVec3};
use hecs::World;

use flybot_core::components::Pilot;
use flybot_core::tuning::PawnTuning;
use flybot_core::types::Pose;

/// Relax tilt toward the accumulated intent and refresh the bob offset.
pub fn run(world: &mut World, tuning: &PawnTuning, dt: f64, elapsed_secs: f64) {
    for (_entity, pilot) in world.query_mut::<&mut Pilot>() {
        pilot.tilt.update(dt, &tuning.tilt);
        pilot.bob_offset = tuning.bob.offset(elapsed_secs);
    }
}

/// Pose of the visual body: the collision pose raised by the bob along its
/// up axis and banked by the tilt around its forward axis.
pub fn body_pose(pose: &Pose, pilot: &Pilot) -> Pose {
    let position = pose.position + pose.up() * pilot.bob_offset;
    let bank = DQuat::from_axis_angle(DVec3::X, -pilot.tilt.angle.to_radians());
    Pose {
        position,
        orientation: (pose.orientation * bank).normalize(),
    }
}
