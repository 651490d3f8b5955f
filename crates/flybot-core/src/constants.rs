//! Simulation constants and tuning defaults.
//!
//! These are the compile-time defaults behind `PawnTuning`, `ShotClass`
//! and `SimConfig`. A config file may override any of them at startup.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Health / power ---

pub const PAWN_MAX_HEALTH: f64 = 25.0;

/// Health does not regenerate by default.
pub const PAWN_HEALTH_REGEN_RATE: f64 = 0.0;

pub const PAWN_MAX_POWER: f64 = 25.0;

/// Power regained per second.
pub const PAWN_POWER_REGEN_RATE: f64 = 1.0;

// --- Movement ---

/// Multiplier applied to movement input.
pub const MOVE_SCALE: f64 = 1.0;

/// Flight speed at full input (units per second).
pub const MOVE_SPEED: f64 = 5000.0;

/// Multiplier applied to rotation input (degrees per second at full input).
pub const ROTATE_SCALE: f64 = 50.0;

/// Pitch limit in locked flight (degrees). Keeps the pawn from inverting.
pub const PITCH_LIMIT_DEG: f64 = 89.9;

/// Pawn collision sphere radius.
pub const PAWN_COLLISION_RADIUS: f64 = 100.0;

// --- Tilt ---

/// Maximum cosmetic bank angle (degrees).
pub const TILT_MAX: f64 = 15.0;

pub const TILT_MOVE_SCALE: f64 = 0.6;

pub const TILT_ROTATE_SCALE: f64 = 0.4;

/// Fraction of the remaining gap to the target tilt closed per reference frame.
pub const TILT_RESET_SCALE: f64 = 0.3;

/// Exponential decay rate of the tilt input accumulator (per second).
pub const TILT_INPUT_DECAY: f64 = 3.0;

/// Reference frame rate that `TILT_RESET_SCALE` is expressed against.
pub const TILT_REFERENCE_HZ: f64 = 60.0;

// --- Bobbing ---

/// Vertical bob frequency (Hz).
pub const BOB_FREQUENCY: f64 = 2.0;

/// Vertical bob amplitude (units).
pub const BOB_AMPLITUDE: f64 = 5.0;

/// Vertical bob phase offset (radians).
pub const BOB_PHASE: f64 = 0.0;

// --- Camera arm ---

pub const CAMERA_ARM_LENGTH: f64 = 600.0;

/// Arm length change per second at full input.
pub const CAMERA_ARM_SCALE: f64 = 2000.0;

pub const CAMERA_ARM_MIN: f64 = 0.0;

pub const CAMERA_ARM_MAX: f64 = 1000.0;

// --- Weapon ---

/// Minimum seconds between shots.
pub const SHOOT_INTERVAL: f64 = 0.2;

/// Muzzle offset in the body frame (x forward).
pub const SHOOT_OFFSET: [f64; 3] = [300.0, 0.0, 0.0];

// --- Shot ---

/// Health change applied on hit (negative = damage).
pub const SHOT_HEALTH_DELTA: f64 = -1.0;

/// Power change applied to the shooter per shot (negative = cost).
pub const SHOT_POWER_DELTA: f64 = -1.0;

/// Shot speed (units per second).
pub const SHOT_SPEED: f64 = 20_000.0;

/// Seconds before an unresolved shot destroys itself.
pub const SHOT_LIFETIME: f64 = 2.0;

/// Shot collision sphere radius.
pub const SHOT_RADIUS: f64 = 25.0;

// --- Arena ---

/// Distance between the two default player starts.
pub const DEFAULT_START_SEPARATION: f64 = 5000.0;
