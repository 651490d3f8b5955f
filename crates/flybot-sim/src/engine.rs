//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands and
//! inbound contacts, runs all systems in a fixed order, and produces a
//! `FrameReport` per step. Completely headless, enabling deterministic testing.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use flybot_core::commands::PlayerCommand;
use flybot_core::components::{Pilot, Vitals};
use flybot_core::enums::SimRole;
use flybot_core::events::{HudUpdate, ReplicatedField, ReplicationEvent, SimEvent};
use flybot_core::state::FrameReport;
use flybot_core::types::{PlayerId, Pose, SimTime};

use crate::capability::WorldSpawner;
use crate::config::SimConfig;
use crate::shot::ContactEvent;
use crate::systems;
use crate::systems::replication::MirrorState;
use crate::world_setup::{self, SpawnSlots};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    contact_queue: VecDeque<ContactEvent>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    hud: Vec<HudUpdate>,
    replication: Vec<ReplicationEvent>,
    mirror: MirrorState,
    spawn_slots: SpawnSlots,
    pawns: HashMap<PlayerId, Entity>,
    next_shot_id: u64,
    accepting_spawns: bool,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world_setup::setup_arena(&mut world, &config);

        Self {
            world,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            contact_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            hud: Vec::new(),
            replication: Vec::new(),
            mirror: MirrorState::default(),
            spawn_slots: SpawnSlots::new(config.spawn_points.len()),
            pawns: HashMap::new(),
            next_shot_id: 0,
            accepting_spawns: true,
            config,
        }
    }

    /// Queue a player command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Deliver a contact from an external physics layer. Drained at the start
    /// of the next step.
    pub fn push_contact(&mut self, contact: ContactEvent) {
        self.contact_queue.push_back(contact);
    }

    /// Refuse all further projectile spawns (world teardown).
    pub fn begin_teardown(&mut self) {
        self.accepting_spawns = false;
    }

    /// Advance by one fixed step at the configured tick rate.
    pub fn tick(&mut self) -> FrameReport {
        let dt = self.config.dt();
        self.advance(dt)
    }

    /// Advance the simulation by `dt` seconds and return the resulting report.
    pub fn advance(&mut self, dt: f64) -> FrameReport {
        let dt = if dt < 0.0 {
            warn!(dt, "negative step clamped to zero");
            0.0
        } else {
            dt
        };

        systems::contact::run(
            &mut self.world,
            &mut self.contact_queue,
            self.config.role,
            &mut self.hud,
            &mut self.events,
            &mut self.despawn_buffer,
        );

        self.process_commands(dt);
        self.run_systems(dt);

        // Diff before cleanup so an eliminated pawn's owner sees health reach zero.
        if self.config.role == SimRole::Authority {
            systems::replication::diff(&self.world, &mut self.mirror, &mut self.replication);
        }
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.pawns,
            &mut self.spawn_slots,
        );
        self.time.advance(dt);

        systems::snapshot::build_report(
            &self.world,
            &self.time,
            self.config.role,
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.hud),
            std::mem::take(&mut self.replication),
        )
    }

    /// Write a mirrored value received from the authority. Observers only;
    /// returns false if the player has no pawn here.
    pub fn apply_replicated(&mut self, player: PlayerId, field: ReplicatedField) -> bool {
        debug_assert_eq!(self.config.role, SimRole::Observer);
        match self.pawns.get(&player) {
            Some(&entity) => systems::replication::apply(&mut self.world, entity, field, &mut self.hud),
            None => {
                debug!(player = player.0, "replicated value for unknown player dropped");
                false
            }
        }
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn role(&self) -> SimRole {
        self.config.role
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Entity of the pawn owned by `player`, if any.
    pub fn pawn(&self, player: PlayerId) -> Option<Entity> {
        self.pawns.get(&player).copied()
    }

    pub fn spawn_slots(&self) -> &SpawnSlots {
        &self.spawn_slots
    }

    /// Set a pawn's power directly (for tests).
    #[cfg(test)]
    pub fn set_power(&mut self, player: PlayerId, power: f64) {
        if let Some(entity) = self.pawn(player) {
            if let Ok(mut vitals) = self.world.get::<&mut Vitals>(entity) {
                let max = vitals.power.max();
                let regen = vitals.power.regen_rate();
                vitals.power = flybot_core::gauge::ResourceGauge::with_current(
                    flybot_core::gauge::GaugeKind::Power,
                    power,
                    max,
                    regen,
                );
            }
        }
    }

    /// Move a pawn directly (for tests).
    #[cfg(test)]
    pub fn place_pawn(&mut self, player: PlayerId, pose: Pose) {
        if let Some(entity) = self.pawn(player) {
            if let Ok(mut current) = self.world.get::<&mut Pose>(entity) {
                *current = pose;
            }
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self, dt: f64) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, dt);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand, dt: f64) {
        match command {
            PlayerCommand::Join { player } => self.join(player),
            PlayerCommand::Leave { player } => self.leave(player),
            other => {
                let player = other.player();
                let Some(&entity) = self.pawns.get(&player) else {
                    debug!(player = player.0, ?other, "command for unknown player dropped");
                    return;
                };
                let Ok((pose, pilot)) = self.world.query_one_mut::<(&mut Pose, &mut Pilot)>(entity) else {
                    return;
                };
                let tuning = &self.config.pawn;

                match other {
                    PlayerCommand::Move { input, .. } => {
                        systems::movement::move_pawn(pose, pilot, tuning, input, dt);
                    }
                    PlayerCommand::Rotate { input, .. } => {
                        systems::movement::rotate_pawn(pose, pilot, tuning, input, dt);
                    }
                    PlayerCommand::ToggleFreeFly { .. } => {
                        systems::movement::toggle_free_fly(pilot);
                    }
                    PlayerCommand::AdjustCameraArm { axis, .. } => {
                        systems::movement::adjust_camera_arm(pilot, tuning, axis, dt);
                    }
                    PlayerCommand::SetShooting { shooting, .. } => {
                        pilot.shooting = shooting;
                    }
                    PlayerCommand::Join { .. } | PlayerCommand::Leave { .. } => {}
                }
            }
        }
    }

    fn join(&mut self, player: PlayerId) {
        if self.pawns.contains_key(&player) {
            debug!(player = player.0, "join for player that already has a pawn ignored");
            return;
        }

        let claim = self.spawn_slots.claim(player, &mut self.rng);
        let start = claim.map(|(slot, _)| slot);
        let owned = claim.and_then(|(slot, owned)| owned.then_some(slot));
        let pose = world_setup::start_pose(&self.config.spawn_points, start);

        let entity = world_setup::spawn_pawn(
            &mut self.world,
            player,
            pose,
            &self.config.pawn,
            self.config.shot,
            owned,
        );
        self.pawns.insert(player, entity);

        if let Ok(vitals) = self.world.get::<&Vitals>(entity) {
            for reading in [vitals.health.reading(), vitals.power.reading()] {
                self.hud.push(HudUpdate { player, reading });
            }
        }

        info!(player = player.0, spawn_slot = ?start, shared = start.is_some() && owned.is_none(), "pawn joined");
        self.events.push(SimEvent::PawnJoined {
            player,
            spawn_slot: start,
        });
    }

    fn leave(&mut self, player: PlayerId) {
        let Some(entity) = self.pawns.remove(&player) else {
            debug!(player = player.0, "leave for unknown player dropped");
            return;
        };

        if let Ok(pilot) = self.world.get::<&Pilot>(entity) {
            if let Some(slot) = pilot.spawn_slot {
                self.spawn_slots.release(slot);
            }
        }
        let _ = self.world.despawn(entity);
        self.mirror.forget(entity);

        info!(player = player.0, "pawn left");
        self.events.push(SimEvent::PawnLeft { player });
    }

    /// Run all per-step systems in order.
    fn run_systems(&mut self, dt: f64) {
        let tuning = &self.config.pawn;
        let now = self.time.elapsed_secs + dt;

        systems::animation::run(&mut self.world, tuning, dt, now);
        systems::regen::run(&mut self.world, dt, &mut self.hud);

        // Observers only mirror the authority's shots.
        if self.config.role == SimRole::Authority {
            let mut spawner = WorldSpawner::new(&self.world, &mut self.next_shot_id, self.accepting_spawns);
            systems::weapon::run(
                &self.world,
                now,
                tuning,
                &mut spawner,
                &mut self.hud,
                &mut self.events,
            );
            let pending = spawner.into_pending();
            WorldSpawner::flush(&mut self.world, pending);
        }

        systems::projectile::run(&mut self.world, dt, &mut self.despawn_buffer, &mut self.events);
        systems::collision::run(&self.world, &mut self.contact_queue);
    }
}
