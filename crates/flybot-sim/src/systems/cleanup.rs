//! Cleanup system: removes eliminated pawns and frees their player starts.

use std::collections::HashMap;

use hecs::{Entity, World};

use flybot_core::components::{Eliminated, Pilot};
use flybot_core::types::PlayerId;

use crate::world_setup::SpawnSlots;

/// Despawn every pawn marked `Eliminated`.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    pawns: &mut HashMap<PlayerId, Entity>,
    spawn_slots: &mut SpawnSlots,
) {
    despawn_buffer.clear();

    for (entity, (pilot, _eliminated)) in world.query_mut::<(&Pilot, &Eliminated)>() {
        if let Some(slot) = pilot.spawn_slot {
            spawn_slots.release(slot);
        }
        if pawns.get(&pilot.player) == Some(&entity) {
            pawns.remove(&pilot.player);
        }
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
