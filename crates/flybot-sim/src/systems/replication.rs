//! Replication boundary.
//!
//! On the authority, [`diff`] compares each pawn's mirrored fields with what
//! was last sent and emits a [`ReplicationEvent`] per change. A pawn seen for
//! the first time emits every field once. On observers, [`apply`] writes an
//! inbound value back into the pawn without re-running any gameplay.

use std::collections::HashMap;

use hecs::{Entity, World};

use flybot_core::components::{Pilot, Vitals};
use flybot_core::events::{HudUpdate, ReplicatedField, ReplicationEvent};

/// Last values sent for one pawn.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Mirrored {
    shooting: bool,
    health: (f64, f64),
}

/// What remote peers have been told so far.
#[derive(Debug, Default)]
pub struct MirrorState {
    sent: HashMap<Entity, Mirrored>,
}

impl MirrorState {
    pub fn forget(&mut self, entity: Entity) {
        self.sent.remove(&entity);
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}

/// Emit events for every mirrored field that changed since the last call.
pub fn diff(world: &World, mirror: &mut MirrorState, out: &mut Vec<ReplicationEvent>) {
    let mut seen: Vec<Entity> = Vec::new();

    for (entity, (pilot, vitals)) in world.query::<(&Pilot, &Vitals)>().iter() {
        seen.push(entity);
        let now = Mirrored {
            shooting: pilot.shooting,
            health: (vitals.health.current(), vitals.health.max()),
        };
        let previous = mirror.sent.insert(entity, now);

        if previous.map_or(true, |p| p.shooting != now.shooting) {
            out.push(ReplicationEvent::new(
                pilot.player,
                ReplicatedField::Shooting {
                    shooting: now.shooting,
                },
            ));
        }
        if previous.map_or(true, |p| p.health != now.health) {
            out.push(ReplicationEvent::new(
                pilot.player,
                ReplicatedField::Health {
                    current: now.health.0,
                    max: now.health.1,
                },
            ));
        }
    }

    mirror.sent.retain(|entity, _| seen.contains(entity));
}

/// Write an inbound mirrored value into `entity`. Returns false if the pawn
/// is gone.
pub fn apply(world: &mut World, entity: Entity, field: ReplicatedField, hud: &mut Vec<HudUpdate>) -> bool {
    let Ok((pilot, vitals)) = world.query_one_mut::<(&mut Pilot, &mut Vitals)>(entity) else {
        return false;
    };

    match field {
        ReplicatedField::Shooting { shooting } => pilot.shooting = shooting,
        ReplicatedField::Health { current, max } => {
            vitals.health.set_mirrored(current, max);
            hud.push(HudUpdate {
                player: pilot.player,
                reading: vitals.health.reading(),
            });
        }
    }
    true
}
