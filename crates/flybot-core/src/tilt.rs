//! Cosmetic tilt (banking) and vertical bob.
//!
//! Neither value feeds collision or gauges. The tilt accumulator holds
//! instantaneous steering intent: inputs push into it and it decays back
//! to zero. The visible angle then chases the accumulator:
//!
//! - `accumulated *= exp(-input_decay * dt)`
//! - `angle += (clamp(accumulated) - angle) * (1 - (1 - reset_scale)^(dt * 60))`
//!
//! Both laws are frame-rate independent and leave the state untouched at `dt = 0`.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltTuning {
    /// Bound on the visible angle (degrees).
    pub max: f64,
    pub move_scale: f64,
    pub rotate_scale: f64,
    pub reset_scale: f64,
    pub input_decay: f64,
}

impl Default for TiltTuning {
    fn default() -> Self {
        Self {
            max: TILT_MAX,
            move_scale: TILT_MOVE_SCALE,
            rotate_scale: TILT_ROTATE_SCALE,
            reset_scale: TILT_RESET_SCALE,
            input_decay: TILT_INPUT_DECAY,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltState {
    /// Visible bank angle (degrees), always within `±max`.
    pub angle: f64,
    /// Decaying steering intent.
    pub accumulated: f64,
}

impl TiltState {
    /// Lateral movement input. `move_scale` is the pawn's movement multiplier.
    pub fn on_move(&mut self, lateral: f64, move_scale: f64, tuning: &TiltTuning) {
        self.accumulated += lateral * tuning.move_scale * move_scale;
    }

    /// Yaw actually applied this step (degrees).
    pub fn on_rotate(&mut self, yaw_delta: f64, tuning: &TiltTuning) {
        self.accumulated += yaw_delta * tuning.rotate_scale;
    }

    pub fn update(&mut self, dt: f64, tuning: &TiltTuning) {
        if dt <= 0.0 {
            return;
        }

        let max = tuning.max.abs();
        let target = self.accumulated.clamp(-max, max);
        let keep = (1.0 - tuning.reset_scale.clamp(0.0, 1.0)).powf(dt * TILT_REFERENCE_HZ);
        self.angle += (target - self.angle) * (1.0 - keep);
        self.angle = self.angle.clamp(-max, max);

        self.accumulated *= (-tuning.input_decay.max(0.0) * dt).exp();
    }
}

/// Secondary vertical oscillation layered on the visual body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BobTuning {
    pub amplitude: f64,
    /// Hz.
    pub frequency: f64,
    /// Radians.
    pub phase: f64,
}

impl Default for BobTuning {
    fn default() -> Self {
        Self {
            amplitude: BOB_AMPLITUDE,
            frequency: BOB_FREQUENCY,
            phase: BOB_PHASE,
        }
    }
}

impl BobTuning {
    /// Vertical offset at simulation time `t` (seconds).
    pub fn offset(&self, t: f64) -> f64 {
        self.amplitude * (TAU * self.frequency * t + self.phase).sin()
    }
}
