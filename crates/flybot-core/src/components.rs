//! ECS components for hecs entities.
//!
//! Components are plain data. Per-tick logic lives in the sim crate's systems;
//! the only methods here are small constructors and the bounded-value
//! helpers owned by the gauge, gate and tilt types.

use serde::{Deserialize, Serialize};

use crate::cooldown::CooldownGate;
use crate::gauge::{GaugeKind, ResourceGauge};
use crate::tilt::TiltState;
use crate::tuning::{PawnTuning, ShotClass};
use crate::types::PlayerId;

/// Health and power of a pawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: ResourceGauge,
    pub power: ResourceGauge,
}

impl Vitals {
    pub fn from_tuning(tuning: &PawnTuning) -> Self {
        Self {
            health: ResourceGauge::new(
                GaugeKind::Health,
                tuning.max_health,
                tuning.health_regen_rate,
            ),
            power: ResourceGauge::new(GaugeKind::Power, tuning.max_power, tuning.power_regen_rate),
        }
    }
}

/// Controller state of a player pawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pilot {
    pub player: PlayerId,
    /// Rotations apply in the local frame with no pitch clamp.
    pub free_fly: bool,
    /// Shoot input held. Replicated to observers.
    pub shooting: bool,
    pub weapon: CooldownGate,
    pub shot_class: ShotClass,
    pub tilt: TiltState,
    /// Current vertical bob of the visual body.
    pub bob_offset: f64,
    pub camera_arm: f64,
    /// Index of the player start this pawn occupies, if any.
    pub spawn_slot: Option<usize>,
}

impl Pilot {
    pub fn new(player: PlayerId, tuning: &PawnTuning, shot_class: ShotClass) -> Self {
        Self {
            player,
            free_fly: false,
            shooting: false,
            weapon: CooldownGate::new(tuning.shoot_interval),
            shot_class,
            tilt: TiltState::default(),
            bob_offset: 0.0,
            camera_arm: tuning.camera_arm.length,
            spawn_slot: None,
        }
    }
}

/// Collision sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
}

/// Static scenery. Stops shots but cannot be damaged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle;

/// Health reached zero. The pawn is removed at the end of the step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Eliminated {
    pub by: Option<PlayerId>,
}
