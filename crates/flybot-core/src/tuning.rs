//! Gameplay tuning for pawns and shots.
//!
//! Keep this separate from runtime configuration (tick rate, seed, role).
//! Every field defaults to the matching constant in `constants.rs`, so a
//! config file only needs to name what it changes.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::tilt::{BobTuning, TiltTuning};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraArmTuning {
    pub length: f64,
    /// Length change per second at full input.
    pub scale: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for CameraArmTuning {
    fn default() -> Self {
        Self {
            length: CAMERA_ARM_LENGTH,
            scale: CAMERA_ARM_SCALE,
            min: CAMERA_ARM_MIN,
            max: CAMERA_ARM_MAX,
        }
    }
}

/// Tuning for a player-controlled pawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PawnTuning {
    pub max_health: f64,
    pub health_regen_rate: f64,
    pub max_power: f64,
    pub power_regen_rate: f64,

    pub move_scale: f64,
    pub move_speed: f64,
    pub rotate_scale: f64,
    pub collision_radius: f64,

    /// Minimum seconds between shots.
    pub shoot_interval: f64,
    /// Muzzle position in the body frame.
    pub shoot_offset: DVec3,

    pub tilt: TiltTuning,
    pub bob: BobTuning,
    pub camera_arm: CameraArmTuning,
}

impl Default for PawnTuning {
    fn default() -> Self {
        Self {
            max_health: PAWN_MAX_HEALTH,
            health_regen_rate: PAWN_HEALTH_REGEN_RATE,
            max_power: PAWN_MAX_POWER,
            power_regen_rate: PAWN_POWER_REGEN_RATE,
            move_scale: MOVE_SCALE,
            move_speed: MOVE_SPEED,
            rotate_scale: ROTATE_SCALE,
            collision_radius: PAWN_COLLISION_RADIUS,
            shoot_interval: SHOOT_INTERVAL,
            shoot_offset: DVec3::from_array(SHOOT_OFFSET),
            tilt: TiltTuning::default(),
            bob: BobTuning::default(),
            camera_arm: CameraArmTuning::default(),
        }
    }
}

/// Projectile class. The weapon reads `power_delta` from here on every attempt,
/// so different shot classes can cost different amounts of power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotClass {
    /// Applied to the target's health on hit (negative = damage).
    pub health_delta: f64,
    /// Applied to the shooter's power per shot (negative = cost).
    pub power_delta: f64,
    pub speed: f64,
    /// Seconds before an unresolved shot destroys itself.
    pub lifetime: f64,
    pub radius: f64,
}

impl Default for ShotClass {
    fn default() -> Self {
        Self {
            health_delta: SHOT_HEALTH_DELTA,
            power_delta: SHOT_POWER_DELTA,
            speed: SHOT_SPEED,
            lifetime: SHOT_LIFETIME,
            radius: SHOT_RADIUS,
        }
    }
}
