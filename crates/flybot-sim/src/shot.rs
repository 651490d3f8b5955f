//! Projectile state and inbound contact events.

use std::sync::atomic::{AtomicBool, Ordering};

use glam::DVec3;

use flybot_core::tuning::ShotClass;
use flybot_core::types::{PlayerId, ShotId};

/// One-shot `Alive -> Resolved` latch.
///
/// The check and the set are a single atomic transition, so a contact that
/// re-enters delivery (or arrives from a physics substep) cannot win twice.
#[derive(Debug, Default)]
pub struct ContactLatch(AtomicBool);

impl ContactLatch {
    /// Claim the single contact. Returns true exactly once.
    pub fn try_resolve(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_resolved(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A live projectile.
#[derive(Debug)]
pub struct Shot {
    pub id: ShotId,
    pub class: ShotClass,
    /// Spawning pawn. Attribution only; never used to skip damage on others.
    pub instigator: hecs::Entity,
    pub instigator_player: PlayerId,
    pub velocity: DVec3,
    /// Position at the start of the last integration step (for swept tests).
    pub previous_position: DVec3,
    pub remaining_secs: f64,
    pub latch: ContactLatch,
}

impl Shot {
    pub fn health_delta(&self) -> f64 {
        self.class.health_delta
    }
}

/// A physical contact between a projectile and another actor.
///
/// Produced by the built-in overlap detector or by an external physics layer,
/// queued, and drained once at the start of the next step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub projectile: hecs::Entity,
    pub other: hecs::Entity,
    pub point: DVec3,
}
