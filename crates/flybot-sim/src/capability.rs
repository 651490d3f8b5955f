//! Capability interfaces checked at the weapon and contact boundaries.
//!
//! Targets are damageable if they carry `Vitals`; shots come from whatever
//! implements `ProjectileSpawner`. The engine's spawner writes into the hecs
//! world, tests substitute their own.

use glam::{DQuat, DVec3};
use hecs::{Entity, World};

use flybot_core::components::{Collider, Vitals};
use flybot_core::events::HudUpdate;
use flybot_core::gauge::{GaugeDelta, GaugeKind, GaugeReading, HudSink};
use flybot_core::tuning::ShotClass;
use flybot_core::types::{PlayerId, Pose, ShotId};

use crate::shot::{ContactLatch, Shot};

/// Anything that can take a health change from a shot.
pub trait Damageable {
    fn apply_damage(&mut self, delta: f64, hud: &mut dyn HudSink) -> GaugeDelta;
}

impl Damageable for Vitals {
    fn apply_damage(&mut self, delta: f64, hud: &mut dyn HudSink) -> GaugeDelta {
        self.health.apply(delta, hud)
    }
}

/// Who fired a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instigator {
    pub entity: Entity,
    pub player: PlayerId,
}

/// Handle to a spawned shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotHandle {
    pub entity: Entity,
    pub id: ShotId,
}

/// Creates projectiles. `None` means the spawn was refused (e.g. world teardown).
pub trait ProjectileSpawner {
    fn spawn(
        &mut self,
        class: &ShotClass,
        position: DVec3,
        orientation: DQuat,
        instigator: Instigator,
    ) -> Option<ShotHandle>;
}

/// HUD sink that tags readings with the owning player.
pub struct PlayerHud<'a> {
    pub player: PlayerId,
    pub out: &'a mut Vec<HudUpdate>,
}

impl HudSink for PlayerHud<'_> {
    fn on_gauge_changed(&mut self, kind: GaugeKind, current: f64, max: f64) {
        self.out.push(HudUpdate {
            player: self.player,
            reading: GaugeReading { kind, current, max },
        });
    }
}

/// Spawner backed by the hecs world.
///
/// Entities are reserved while the world is being queried and materialised
/// by [`WorldSpawner::flush`] once the borrow ends.
pub struct WorldSpawner<'w> {
    world: &'w World,
    next_shot_id: &'w mut u64,
    accepting: bool,
    pending: Vec<(Entity, (Pose, Collider, Shot))>,
}

impl<'w> WorldSpawner<'w> {
    pub fn new(world: &'w World, next_shot_id: &'w mut u64, accepting: bool) -> Self {
        Self {
            world,
            next_shot_id,
            accepting,
            pending: Vec::new(),
        }
    }

    /// Take the reserved shots so the caller can insert them.
    pub fn into_pending(self) -> Vec<(Entity, (Pose, Collider, Shot))> {
        self.pending
    }

    /// Insert every reserved shot into the world.
    pub fn flush(world: &mut World, pending: Vec<(Entity, (Pose, Collider, Shot))>) {
        for (entity, bundle) in pending {
            if world.insert(entity, bundle).is_err() {
                tracing::warn!(?entity, "reserved shot entity vanished before insert");
            }
        }
    }
}

impl ProjectileSpawner for WorldSpawner<'_> {
    fn spawn(
        &mut self,
        class: &ShotClass,
        position: DVec3,
        orientation: DQuat,
        instigator: Instigator,
    ) -> Option<ShotHandle> {
        if !self.accepting {
            return None;
        }

        let id = ShotId(*self.next_shot_id);
        *self.next_shot_id += 1;

        let entity = self.world.reserve_entity();
        let shot = Shot {
            id,
            class: *class,
            instigator: instigator.entity,
            instigator_player: instigator.player,
            velocity: orientation * DVec3::X * class.speed,
            previous_position: position,
            remaining_secs: class.lifetime,
            latch: ContactLatch::default(),
        };
        self.pending.push((
            entity,
            (
                Pose {
                    position,
                    orientation,
                },
                Collider {
                    radius: class.radius,
                },
                shot,
            ),
        ));

        Some(ShotHandle { entity, id })
    }
}
