//! Movement controller: turns player input into pose changes.
//!
//! Called per command from the engine, with the current step's `dt`.
//! Rotation has two modes:
//! - locked flight adds the input to the world-frame rotator and clamps pitch,
//! - free flight applies the input in the pawn's local frame, unclamped.

use glam::DVec3;

use flybot_core::components::Pilot;
use flybot_core::constants::PITCH_LIMIT_DEG;
use flybot_core::tuning::PawnTuning;
use flybot_core::types::{normalize_axis, Pose, Rotator};

/// Fly along `input`, given in the pawn's facing frame.
pub fn move_pawn(pose: &mut Pose, pilot: &mut Pilot, tuning: &PawnTuning, input: DVec3, dt: f64) {
    let world_input = pose.rotate(input);
    pose.position += world_input * tuning.move_scale * tuning.move_speed * dt;
    pilot.tilt.on_move(input.y, tuning.move_scale, &tuning.tilt);
}

/// Turn by `input * rotate_scale * dt`.
pub fn rotate_pawn(pose: &mut Pose, pilot: &mut Pilot, tuning: &PawnTuning, input: Rotator, dt: f64) {
    let delta = input * (tuning.rotate_scale * dt);
    pilot.tilt.on_rotate(delta.yaw, &tuning.tilt);

    if pilot.free_fly {
        pose.orientation = (pose.orientation * delta.to_quat()).normalize();
    } else {
        let mut rot = pose.rotator() + delta;
        rot.pitch = rot.pitch.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
        rot.yaw = normalize_axis(rot.yaw);
        rot.roll = normalize_axis(rot.roll);
        pose.orientation = rot.to_quat();
    }
}

/// Flip between locked and free flight. Applies from the next rotation on.
pub fn toggle_free_fly(pilot: &mut Pilot) {
    pilot.free_fly = !pilot.free_fly;
}

/// Zoom the camera arm along a single axis, clamped to the configured range.
pub fn adjust_camera_arm(pilot: &mut Pilot, tuning: &PawnTuning, axis: f64, dt: f64) {
    let arm = &tuning.camera_arm;
    pilot.camera_arm = (pilot.camera_arm + axis * dt * arm.scale).clamp(arm.min, arm.max);
}
