//! Entity spawn factories and player-start assignment.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flybot_core::components::{Collider, Obstacle, Pilot, Vitals};
use flybot_core::tuning::{PawnTuning, ShotClass};
use flybot_core::types::{PlayerId, Pose};

use crate::config::{ObstacleDef, SimConfig, SpawnPointDef};

/// Occupancy of the configured player starts.
#[derive(Debug, Clone, Default)]
pub struct SpawnSlots {
    occupants: Vec<Option<PlayerId>>,
}

impl SpawnSlots {
    pub fn new(count: usize) -> Self {
        Self {
            occupants: vec![None; count],
        }
    }

    pub fn free_count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_none()).count()
    }

    pub fn occupant(&self, slot: usize) -> Option<PlayerId> {
        self.occupants.get(slot).copied().flatten()
    }

    pub fn release(&mut self, slot: usize) {
        if let Some(occupant) = self.occupants.get_mut(slot) {
            *occupant = None;
        }
    }

    /// Pick a random free start for `player` and mark it taken.
    ///
    /// When every start is taken the player shares a random one (pawns always
    /// spawn, even overlapping). Returns `None` when no starts are configured.
    pub fn claim(&mut self, player: PlayerId, rng: &mut ChaCha8Rng) -> Option<(usize, bool)> {
        if self.occupants.is_empty() {
            return None;
        }

        let free: Vec<usize> = (0..self.occupants.len())
            .filter(|&i| self.occupants[i].is_none())
            .collect();

        if free.is_empty() {
            let shared = rng.gen_range(0..self.occupants.len());
            return Some((shared, false));
        }

        let slot = free[rng.gen_range(0..free.len())];
        self.occupants[slot] = Some(player);
        Some((slot, true))
    }
}

/// Place configured scenery.
pub fn setup_arena(world: &mut World, config: &SimConfig) {
    for obstacle in &config.obstacles {
        spawn_obstacle(world, obstacle);
    }
}

/// Spawn a pawn for `player` at `pose`, with full health and power.
pub fn spawn_pawn(
    world: &mut World,
    player: PlayerId,
    pose: Pose,
    tuning: &PawnTuning,
    shot_class: ShotClass,
    spawn_slot: Option<usize>,
) -> hecs::Entity {
    let mut pilot = Pilot::new(player, tuning, shot_class);
    pilot.spawn_slot = spawn_slot;

    world.spawn((
        pose,
        pilot,
        Vitals::from_tuning(tuning),
        Collider {
            radius: tuning.collision_radius,
        },
    ))
}

pub fn spawn_obstacle(world: &mut World, def: &ObstacleDef) -> hecs::Entity {
    world.spawn((
        Obstacle,
        Pose {
            position: def.position,
            ..Pose::default()
        },
        Collider { radius: def.radius },
    ))
}

/// Pose for a player start, or the origin when there is none.
pub fn start_pose(spawn_points: &[SpawnPointDef], slot: Option<usize>) -> Pose {
    slot.and_then(|s| spawn_points.get(s))
        .map(|sp| Pose::new(sp.position, sp.rotation))
        .unwrap_or_default()
}
