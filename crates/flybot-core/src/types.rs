//! Fundamental geometric and simulation types.
//!
//! World frame is right-handed: x = forward, y = left, z = up.
//! Positive yaw turns toward +y, positive pitch raises the nose and
//! positive roll lowers the +y side.

use std::ops::{Add, Mul};

use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Identifies the player that owns a pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Identifies a shot for reporting. Shots are short-lived; ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShotId(pub u64);

/// Euler orientation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotator {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Convert to a quaternion (yaw, then pitch, then roll, intrinsic).
    pub fn to_quat(self) -> DQuat {
        DQuat::from_euler(
            EulerRot::ZYX,
            self.yaw.to_radians(),
            -self.pitch.to_radians(),
            -self.roll.to_radians(),
        )
    }

    /// Decompose a quaternion. Pitch comes back in [-90, 90].
    pub fn from_quat(quat: DQuat) -> Self {
        let (yaw, pitch, roll) = quat.to_euler(EulerRot::ZYX);
        Self {
            pitch: -pitch.to_degrees(),
            yaw: yaw.to_degrees(),
            roll: -roll.to_degrees(),
        }
    }

    /// Wrap every axis into [-180, 180).
    pub fn normalized(self) -> Self {
        Self {
            pitch: normalize_axis(self.pitch),
            yaw: normalize_axis(self.yaw),
            roll: normalize_axis(self.roll),
        }
    }
}

impl Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator {
            pitch: self.pitch + rhs.pitch,
            yaw: self.yaw + rhs.yaw,
            roll: self.roll + rhs.roll,
        }
    }
}

impl Mul<f64> for Rotator {
    type Output = Rotator;

    fn mul(self, rhs: f64) -> Rotator {
        Rotator {
            pitch: self.pitch * rhs,
            yaw: self.yaw * rhs,
            roll: self.roll * rhs,
        }
    }
}

/// Wrap an angle in degrees into [-180, 180).
pub fn normalize_axis(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Position and orientation of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub orientation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: DVec3, rotation: Rotator) -> Self {
        Self {
            position,
            orientation: rotation.to_quat(),
        }
    }

    pub fn rotator(&self) -> Rotator {
        Rotator::from_quat(self.orientation)
    }

    /// Unit vector the actor is facing.
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::X
    }

    /// Unit vector pointing out of the actor's top.
    pub fn up(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Rotate a vector from the actor's local frame into the world frame.
    pub fn rotate(&self, local: DVec3) -> DVec3 {
        self.orientation * local
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed steps.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
