//! Runtime configuration for a simulation run.
//!
//! [`SimConfig`] can be built in code or loaded from TOML. Missing keys fall
//! back to the compile-time defaults in `flybot_core::constants`, so a
//! minimal file can override just the values you care about:
//!
//! ```toml
//! seed = 7
//! role = "Observer"
//!
//! [pawn]
//! max_power = 40.0
//!
//! [shot]
//! power_delta = -2.5
//! ```

use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use flybot_core::constants::{DEFAULT_START_SEPARATION, TICK_RATE};
use flybot_core::enums::SimRole;
use flybot_core::tuning::{PawnTuning, ShotClass};
use flybot_core::types::Rotator;

/// A player start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPointDef {
    pub position: DVec3,
    #[serde(default)]
    pub rotation: Rotator,
}

/// Static scenery placed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleDef {
    pub position: DVec3,
    pub radius: f64,
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Steps per second used by `tick()`.
    pub tick_rate: u32,
    pub role: SimRole,
    pub pawn: PawnTuning,
    pub shot: ShotClass,
    pub spawn_points: Vec<SpawnPointDef>,
    pub obstacles: Vec<ObstacleDef>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let half = DEFAULT_START_SEPARATION / 2.0;
        Self {
            seed: 42,
            tick_rate: TICK_RATE,
            role: SimRole::Authority,
            pawn: PawnTuning::default(),
            shot: ShotClass::default(),
            // Two starts facing each other down the x axis.
            spawn_points: vec![
                SpawnPointDef {
                    position: DVec3::new(-half, 0.0, 0.0),
                    rotation: Rotator::ZERO,
                },
                SpawnPointDef {
                    position: DVec3::new(half, 0.0, 0.0),
                    rotation: Rotator::new(0.0, 180.0, 0.0),
                },
            ],
            obstacles: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Seconds per fixed step.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be at least 1"));
        }

        self.check_finite()?;

        let pawn = &self.pawn;
        if pawn.max_health <= 0.0 {
            return Err(ConfigError::invalid("pawn.max_health", "must be positive"));
        }
        if pawn.max_power < 0.0 {
            return Err(ConfigError::invalid("pawn.max_power", "must not be negative"));
        }
        if pawn.shoot_interval < 0.0 {
            return Err(ConfigError::invalid("pawn.shoot_interval", "must not be negative"));
        }
        if pawn.collision_radius < 0.0 {
            return Err(ConfigError::invalid("pawn.collision_radius", "must not be negative"));
        }
        if pawn.camera_arm.min > pawn.camera_arm.max {
            return Err(ConfigError::invalid("pawn.camera_arm", "min exceeds max"));
        }
        if !(0.0..=1.0).contains(&pawn.tilt.reset_scale) {
            return Err(ConfigError::invalid("pawn.tilt.reset_scale", "must be within 0..=1"));
        }

        let shot = &self.shot;
        if shot.lifetime <= 0.0 {
            return Err(ConfigError::invalid("shot.lifetime", "must be positive"));
        }
        if shot.radius < 0.0 {
            return Err(ConfigError::invalid("shot.radius", "must not be negative"));
        }
        // Firing never adds power.
        if shot.power_delta > 0.0 {
            return Err(ConfigError::invalid("shot.power_delta", "must not be positive"));
        }

        Ok(())
    }

    fn check_finite(&self) -> Result<(), ConfigError> {
        let pawn = &self.pawn;
        let shot = &self.shot;
        let scalars = [
            ("pawn.max_health", pawn.max_health),
            ("pawn.health_regen_rate", pawn.health_regen_rate),
            ("pawn.max_power", pawn.max_power),
            ("pawn.power_regen_rate", pawn.power_regen_rate),
            ("pawn.move_scale", pawn.move_scale),
            ("pawn.move_speed", pawn.move_speed),
            ("pawn.rotate_scale", pawn.rotate_scale),
            ("pawn.collision_radius", pawn.collision_radius),
            ("pawn.shoot_interval", pawn.shoot_interval),
            ("pawn.tilt.max", pawn.tilt.max),
            ("pawn.tilt.move_scale", pawn.tilt.move_scale),
            ("pawn.tilt.rotate_scale", pawn.tilt.rotate_scale),
            ("pawn.tilt.reset_scale", pawn.tilt.reset_scale),
            ("pawn.tilt.input_decay", pawn.tilt.input_decay),
            ("pawn.bob.amplitude", pawn.bob.amplitude),
            ("pawn.bob.frequency", pawn.bob.frequency),
            ("pawn.bob.phase", pawn.bob.phase),
            ("pawn.camera_arm.length", pawn.camera_arm.length),
            ("pawn.camera_arm.scale", pawn.camera_arm.scale),
            ("pawn.camera_arm.min", pawn.camera_arm.min),
            ("pawn.camera_arm.max", pawn.camera_arm.max),
            ("shot.health_delta", shot.health_delta),
            ("shot.power_delta", shot.power_delta),
            ("shot.speed", shot.speed),
            ("shot.lifetime", shot.lifetime),
            ("shot.radius", shot.radius),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        if !pawn.shoot_offset.is_finite() {
            return Err(ConfigError::invalid("pawn.shoot_offset", "must be finite"));
        }
        for spawn in &self.spawn_points {
            let r = spawn.rotation;
            if !spawn.position.is_finite() || ![r.pitch, r.yaw, r.roll].iter().all(|v| v.is_finite()) {
                return Err(ConfigError::invalid("spawn_points", "must be finite"));
            }
        }
        for obstacle in &self.obstacles {
            if !obstacle.position.is_finite() || !obstacle.radius.is_finite() {
                return Err(ConfigError::invalid("obstacles", "must be finite"));
            }
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        ConfigError::Invalid { field, reason }
    }
}
