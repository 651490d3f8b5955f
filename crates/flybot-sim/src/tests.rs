//! Tests for the simulation engine, weapon loop, contact handling and config.

use glam::DVec3;
use hecs::{Entity, World};

use flybot_core::commands::PlayerCommand;
use flybot_core::components::{Pilot, Vitals};
use flybot_core::enums::{ShotRefusal, SimRole, Visibility};
use flybot_core::events::{ReplicatedField, SimEvent};
use flybot_core::gauge::{GaugeKind, NullHud};
use flybot_core::state::FrameReport;
use flybot_core::tuning::{PawnTuning, ShotClass};
use flybot_core::types::{PlayerId, Pose, Rotator};

use crate::capability::{Instigator, ProjectileSpawner, ShotHandle};
use crate::config::{ConfigError, ObstacleDef, SimConfig};
use crate::engine::SimulationEngine;
use crate::shot::{ContactEvent, ContactLatch, Shot};
use crate::systems::contact::{handle_contact, ContactOutcome};
use crate::systems::weapon::{try_shoot, ShotOutcome};

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

// ---- Helpers ----

/// Engine with both players joined, one step taken.
fn duel(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    engine.queue_commands([PlayerCommand::Join { player: P1 }, PlayerCommand::Join { player: P2 }]);
    engine.tick();
    engine
}

fn shot_entities(engine: &SimulationEngine) -> Vec<Entity> {
    engine
        .world()
        .query::<&Shot>()
        .iter()
        .map(|(entity, _)| entity)
        .collect()
}

fn count(report: &FrameReport, pred: impl Fn(&SimEvent) -> bool) -> usize {
    report.events.iter().filter(|e| pred(e)).count()
}

fn fired(report: &FrameReport) -> usize {
    count(report, |e| matches!(e, SimEvent::ShotFired { .. }))
}

/// Fire exactly one shot from P1 and stop shooting.
fn fire_once(engine: &mut SimulationEngine) -> Entity {
    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: true,
    });
    let report = engine.tick();
    assert_eq!(fired(&report), 1);
    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: false,
    });
    shot_entities(engine)[0]
}

struct StubSpawner {
    world: World,
    accept: bool,
    calls: usize,
}

impl StubSpawner {
    fn new(accept: bool) -> Self {
        Self {
            world: World::new(),
            accept,
            calls: 0,
        }
    }
}

impl ProjectileSpawner for StubSpawner {
    fn spawn(
        &mut self,
        _class: &ShotClass,
        _position: DVec3,
        _orientation: glam::DQuat,
        _instigator: Instigator,
    ) -> Option<ShotHandle> {
        self.calls += 1;
        if !self.accept {
            return None;
        }
        let entity = self.world.spawn(());
        Some(ShotHandle {
            entity,
            id: flybot_core::types::ShotId(self.calls as u64),
        })
    }
}

fn stub_pawn(power: f64) -> (Pilot, Vitals, Instigator) {
    let tuning = PawnTuning::default();
    let mut pilot = Pilot::new(P1, &tuning, ShotClass::default());
    pilot.shooting = true;
    let mut vitals = Vitals::from_tuning(&tuning);
    vitals.power = flybot_core::gauge::ResourceGauge::with_current(
        GaugeKind::Power,
        power,
        tuning.max_power,
        0.0,
    );
    let instigator = Instigator {
        entity: World::new().spawn(()),
        player: P1,
    };
    (pilot, vitals, instigator)
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = duel(config.clone());
    let mut engine_b = duel(config);

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_commands([
            PlayerCommand::SetShooting {
                player: P1,
                shooting: true,
            },
            PlayerCommand::SetShooting {
                player: P2,
                shooting: true,
            },
        ]);
    }

    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Reports diverged with same seed");
    }
}

#[test]
fn test_negative_dt_is_clamped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let report = engine.advance(-1.0);
    assert_eq!(report.time.tick, 1);
    assert_eq!(report.time.elapsed_secs, 0.0);
}

// ---- Sessions and spawn points ----

#[test]
fn test_spawn_points_not_shared_while_free() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([PlayerCommand::Join { player: P1 }, PlayerCommand::Join { player: P2 }]);
    let report = engine.tick();

    let slots: Vec<Option<usize>> = report
        .events
        .iter()
        .filter_map(|e| match e {
            SimEvent::PawnJoined { spawn_slot, .. } => Some(*spawn_slot),
            _ => None,
        })
        .collect();
    assert_eq!(slots.len(), 2);
    assert!(slots[0].is_some() && slots[1].is_some());
    assert_ne!(slots[0], slots[1], "Two pawns took the same start");
    assert_eq!(engine.spawn_slots().free_count(), 0);

    // A third pawn still spawns, sharing a start it does not own.
    engine.queue_command(PlayerCommand::Join { player: PlayerId(3) });
    engine.tick();
    let third = engine.pawn(PlayerId(3)).expect("third pawn spawned");
    assert_eq!(engine.world().get::<&Pilot>(third).unwrap().spawn_slot, None);

    engine.queue_command(PlayerCommand::Leave { player: P1 });
    let report = engine.tick();
    assert_eq!(count(&report, |e| matches!(e, SimEvent::PawnLeft { .. })), 1);
    assert!(engine.pawn(P1).is_none());
    assert_eq!(engine.spawn_slots().free_count(), 1);
}

#[test]
fn test_no_spawn_points_uses_origin() {
    let mut engine = SimulationEngine::new(SimConfig {
        spawn_points: Vec::new(),
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::Join { player: P1 });
    let report = engine.tick();
    let pawn = report.pawn(P1).unwrap();
    assert_eq!(pawn.position, DVec3::ZERO);
}

#[test]
fn test_join_reports_full_gauges() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Join { player: P1 });
    let report = engine.tick();

    let kinds: Vec<GaugeKind> = report
        .hud
        .iter()
        .filter(|u| u.player == P1)
        .map(|u| u.reading.kind)
        .collect();
    assert!(kinds.contains(&GaugeKind::Health));
    assert!(kinds.contains(&GaugeKind::Power));

    let pawn = report.pawn(P1).unwrap();
    assert_eq!(pawn.health, 25.0);
    assert_eq!(pawn.power, 25.0);
}

#[test]
fn test_unknown_player_commands_are_dropped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::Move {
            player: PlayerId(9),
            input: DVec3::X,
        },
        PlayerCommand::SetShooting {
            player: PlayerId(9),
            shooting: true,
        },
        PlayerCommand::Leave { player: PlayerId(9) },
    ]);
    let report = engine.tick();
    assert!(report.pawns.is_empty());
    assert!(report.events.is_empty());
}

// ---- Movement ----

#[test]
fn test_locked_flight_clamps_pitch() {
    let mut config = SimConfig::default();
    config.pawn.rotate_scale = 1.0;
    let mut engine = duel(config);

    for _ in 0..60 {
        engine.queue_command(PlayerCommand::Rotate {
            player: P1,
            input: Rotator::new(200.0, 0.0, 0.0),
        });
        engine.tick();
    }

    let entity = engine.pawn(P1).unwrap();
    let pose = *engine.world().get::<&Pose>(entity).unwrap();
    assert!(pose.rotator().pitch <= 89.9 + 1e-6, "pitch {}", pose.rotator().pitch);
    assert!(pose.rotator().pitch > 89.0);
    // Still nose-up, never flipped over the top.
    assert!(pose.up().z >= 0.0);
}

#[test]
fn test_free_fly_rotation_is_unclamped() {
    let mut config = SimConfig::default();
    config.pawn.rotate_scale = 1.0;
    let mut engine = duel(config);

    let entity = engine.pawn(P1).unwrap();
    engine.place_pawn(P1, Pose::default());
    engine.queue_command(PlayerCommand::ToggleFreeFly { player: P1 });
    engine.tick();

    for _ in 0..60 {
        engine.queue_command(PlayerCommand::Rotate {
            player: P1,
            input: Rotator::new(200.0, 0.0, 0.0),
        });
        engine.tick();
    }

    let pose = *engine.world().get::<&Pose>(entity).unwrap();
    // 200 degrees of pitch carries the nose over the top.
    assert!(pose.forward().x < -0.9, "forward {:?}", pose.forward());
}

#[test]
fn test_move_follows_facing() {
    let mut engine = duel(SimConfig::default());
    engine.place_pawn(P1, Pose::new(DVec3::ZERO, Rotator::new(0.0, 90.0, 0.0)));
    engine.queue_command(PlayerCommand::Move {
        player: P1,
        input: DVec3::X,
    });
    let report = engine.tick();

    let pawn = report.pawn(P1).unwrap();
    // 5000 units/s for one 60 Hz step, along +y.
    assert!((pawn.position.y - 5000.0 / 60.0).abs() < 1e-6);
    assert!(pawn.position.x.abs() < 1e-6);
}

#[test]
fn test_lateral_move_tilts_within_bounds() {
    let mut engine = duel(SimConfig::default());
    for _ in 0..120 {
        engine.queue_command(PlayerCommand::Move {
            player: P1,
            input: DVec3::Y,
        });
        let report = engine.tick();
        let tilt = report.pawn(P1).unwrap().tilt;
        assert!(tilt.abs() <= 15.0 + 1e-9);
    }

    let report = engine.tick();
    assert!(report.pawn(P1).unwrap().tilt.abs() > 1.0, "held lateral input should tilt");

    // Released input relaxes toward neutral.
    let mut last = engine.tick().pawn(P1).unwrap().tilt.abs();
    for _ in 0..600 {
        last = engine.tick().pawn(P1).unwrap().tilt.abs();
    }
    assert!(last < 0.01, "tilt {last} did not relax");
}

#[test]
fn test_camera_arm_is_clamped() {
    let mut engine = duel(SimConfig::default());
    for _ in 0..120 {
        engine.queue_command(PlayerCommand::AdjustCameraArm {
            player: P1,
            axis: 1.0,
        });
        engine.tick();
    }
    assert_eq!(engine.tick().pawn(P1).unwrap().camera_arm, 1000.0);

    for _ in 0..120 {
        engine.queue_command(PlayerCommand::AdjustCameraArm {
            player: P1,
            axis: -1.0,
        });
        engine.tick();
    }
    assert_eq!(engine.tick().pawn(P1).unwrap().camera_arm, 0.0);
}

// ---- Weapon loop ----

#[test]
fn test_power_gate_is_strict() {
    let mut spawner = StubSpawner::new(true);
    let tuning = PawnTuning::default();

    let (mut pilot, mut vitals, instigator) = stub_pawn(1.0);
    let outcome = try_shoot(
        0.0,
        &Pose::default(),
        &mut pilot,
        &mut vitals,
        &tuning,
        instigator,
        &mut spawner,
        &mut NullHud,
    );
    assert_eq!(outcome, ShotOutcome::Refused(ShotRefusal::InsufficientPower));
    assert_eq!(spawner.calls, 0);

    let (mut pilot, mut vitals, instigator) = stub_pawn(1.01);
    let outcome = try_shoot(
        0.0,
        &Pose::default(),
        &mut pilot,
        &mut vitals,
        &tuning,
        instigator,
        &mut spawner,
        &mut NullHud,
    );
    assert!(matches!(outcome, ShotOutcome::Fired { .. }));
    assert!((vitals.power.current() - 0.01).abs() < 1e-9);
}

#[test]
fn test_cooldown_gates_repeat_shots() {
    let mut spawner = StubSpawner::new(true);
    let tuning = PawnTuning::default();
    let (mut pilot, mut vitals, instigator) = stub_pawn(25.0);
    let pose = Pose::default();

    let mut shoot = |now: f64, pilot: &mut Pilot, vitals: &mut Vitals| {
        try_shoot(now, &pose, pilot, vitals, &tuning, instigator, &mut spawner, &mut NullHud)
    };

    assert!(matches!(shoot(0.0, &mut pilot, &mut vitals), ShotOutcome::Fired { .. }));
    assert_eq!(
        shoot(0.19, &mut pilot, &mut vitals),
        ShotOutcome::Refused(ShotRefusal::Cooldown)
    );
    assert!(matches!(shoot(0.2, &mut pilot, &mut vitals), ShotOutcome::Fired { .. }));

    pilot.shooting = false;
    assert_eq!(
        shoot(5.0, &mut pilot, &mut vitals),
        ShotOutcome::Refused(ShotRefusal::NotShooting)
    );
}

#[test]
fn test_refused_spawn_leaves_power_and_cooldown() {
    let mut spawner = StubSpawner::new(false);
    let tuning = PawnTuning::default();
    let (mut pilot, mut vitals, instigator) = stub_pawn(25.0);

    let outcome = try_shoot(
        0.0,
        &Pose::default(),
        &mut pilot,
        &mut vitals,
        &tuning,
        instigator,
        &mut spawner,
        &mut NullHud,
    );
    assert_eq!(outcome, ShotOutcome::Refused(ShotRefusal::SpawnRefused));
    assert_eq!(spawner.calls, 1);
    assert_eq!(vitals.power.current(), 25.0);
    assert_eq!(pilot.weapon.last_fired_at(), None);
}

#[test]
fn test_shot_leaves_from_muzzle_offset() {
    struct Recorder(Option<DVec3>);
    impl ProjectileSpawner for Recorder {
        fn spawn(
            &mut self,
            _class: &ShotClass,
            position: DVec3,
            _orientation: glam::DQuat,
            instigator: Instigator,
        ) -> Option<ShotHandle> {
            self.0 = Some(position);
            Some(ShotHandle {
                entity: instigator.entity,
                id: flybot_core::types::ShotId(0),
            })
        }
    }

    let tuning = PawnTuning::default();
    let (mut pilot, mut vitals, instigator) = stub_pawn(25.0);
    let pose = Pose::new(DVec3::new(10.0, 0.0, 0.0), Rotator::new(0.0, 90.0, 0.0));
    let mut recorder = Recorder(None);

    let outcome = try_shoot(0.0, &pose, &mut pilot, &mut vitals, &tuning, instigator, &mut recorder, &mut NullHud);

    let origin = recorder.0.unwrap();
    assert!((origin - DVec3::new(10.0, 300.0, 0.0)).length() < 1e-6, "origin {origin:?}");
    let ShotOutcome::Fired { origin: reported, .. } = outcome else {
        panic!("expected a shot, got {outcome:?}");
    };
    assert_eq!(reported, origin);
}

#[test]
fn test_shot_fired_event_reports_muzzle_position() {
    let mut engine = duel(SimConfig::default());
    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: true,
    });
    let report = engine.tick();

    let position = report
        .events
        .iter()
        .find_map(|e| match e {
            SimEvent::ShotFired { position, .. } => Some(*position),
            _ => None,
        })
        .unwrap();
    let shot = shot_entities(&engine)[0];
    let spawned_at = engine.world().get::<&Shot>(shot).unwrap().previous_position;
    let pawn_at = engine.world().get::<&Pose>(engine.pawn(P1).unwrap()).unwrap().position;

    assert!((position - spawned_at).length() < 1e-9, "event {position:?}, shot {spawned_at:?}");
    assert!((position - pawn_at).length() > 250.0, "Event should not report the pawn centre");
}

#[test]
fn test_held_trigger_fires_every_twelve_ticks() {
    let mut engine = duel(SimConfig::default());
    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: true,
    });

    let mut fired_at = Vec::new();
    for _ in 0..120 {
        let report = engine.tick();
        for event in &report.events {
            if let SimEvent::ShotFired { player: P1, .. } = event {
                fired_at.push(report.time.tick);
            }
        }
    }

    assert!(fired_at.len() >= 9, "only {} shots", fired_at.len());
    for pair in fired_at.windows(2) {
        assert_eq!(pair[1] - pair[0], 12, "shot ticks {fired_at:?}");
    }
}

#[test]
fn test_regen_runs_before_weapon() {
    let mut engine = duel(SimConfig::default());
    engine.set_power(P1, 1.0);
    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: true,
    });
    let report = engine.tick();

    // 1.0 alone fails the strict check; the step's regen makes it spendable.
    assert_eq!(fired(&report), 1);
    let power = report.pawn(P1).unwrap().power;
    assert!((power - 1.0 / 60.0).abs() < 1e-9, "power {power}");
}

#[test]
fn test_no_regen_refuses_last_unit() {
    let mut config = SimConfig::default();
    config.pawn.power_regen_rate = 0.0;
    let mut engine = duel(config);

    engine.set_power(P1, 1.0);
    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: true,
    });
    assert_eq!(fired(&engine.tick()), 0);

    engine.set_power(P1, 1.01);
    assert_eq!(fired(&engine.tick()), 1);
}

#[test]
fn test_teardown_refuses_spawns() {
    let mut engine = duel(SimConfig::default());
    engine.begin_teardown();
    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: true,
    });
    let report = engine.tick();

    assert_eq!(fired(&report), 0);
    assert!(shot_entities(&engine).is_empty());
    assert_eq!(report.pawn(P1).unwrap().power, 25.0);
    let entity = engine.pawn(P1).unwrap();
    assert_eq!(engine.world().get::<&Pilot>(entity).unwrap().weapon.last_fired_at(), None);
}

// ---- Contact handling ----

#[test]
fn test_one_shot_contact_applies_once() {
    let mut engine = duel(SimConfig::default());
    let shot = fire_once(&mut engine);
    let target = engine.pawn(P2).unwrap();

    let contact = ContactEvent {
        projectile: shot,
        other: target,
        point: DVec3::ZERO,
    };
    engine.push_contact(contact);
    engine.push_contact(contact);
    let report = engine.tick();

    assert_eq!(report.pawn(P2).unwrap().health, 24.0);
    assert_eq!(count(&report, |e| matches!(e, SimEvent::ShotHit { .. })), 1);
    assert_eq!(count(&report, |e| matches!(e, SimEvent::ImpactEffect { .. })), 1);
    assert!(!engine.world().contains(shot), "Shot should be destroyed");
}

#[test]
fn test_self_contact_is_discarded() {
    let mut engine = duel(SimConfig::default());
    let shot = fire_once(&mut engine);
    let shooter = engine.pawn(P1).unwrap();

    engine.push_contact(ContactEvent {
        projectile: shot,
        other: shooter,
        point: DVec3::ZERO,
    });
    let report = engine.tick();

    assert_eq!(report.pawn(P1).unwrap().health, 25.0);
    assert_eq!(count(&report, |e| matches!(e, SimEvent::ImpactEffect { .. })), 0);
    assert!(engine.world().contains(shot), "Shot should keep flying");

    // The same shot can still hit someone else.
    engine.push_contact(ContactEvent {
        projectile: shot,
        other: engine.pawn(P2).unwrap(),
        point: DVec3::ZERO,
    });
    let report = engine.tick();
    assert_eq!(report.pawn(P2).unwrap().health, 24.0);
}

#[test]
fn test_handle_contact_latches() {
    let mut world = World::new();
    let shooter = world.spawn(());
    let target = world.spawn(());
    let shot = Shot {
        id: flybot_core::types::ShotId(1),
        class: ShotClass::default(),
        instigator: shooter,
        instigator_player: P1,
        velocity: DVec3::X,
        previous_position: DVec3::ZERO,
        remaining_secs: 2.0,
        latch: ContactLatch::default(),
    };
    let mut vitals = Vitals::from_tuning(&PawnTuning::default());

    assert_eq!(
        handle_contact(&shot, shooter, Some(&mut vitals), true, &mut NullHud),
        ContactOutcome::SelfContact
    );
    assert!(!shot.latch.is_resolved());

    let first = handle_contact(&shot, target, Some(&mut vitals), true, &mut NullHud);
    assert!(matches!(first, ContactOutcome::Resolved { damage: Some(d) } if d.applied == -1.0));
    assert_eq!(
        handle_contact(&shot, target, Some(&mut vitals), true, &mut NullHud),
        ContactOutcome::AlreadyResolved
    );
    assert_eq!(vitals.health.current(), 24.0);
}

#[test]
fn test_observer_contact_never_damages() {
    let mut world = World::new();
    let shooter = world.spawn(());
    let target = world.spawn(());
    let shot = Shot {
        id: flybot_core::types::ShotId(1),
        class: ShotClass::default(),
        instigator: shooter,
        instigator_player: P1,
        velocity: DVec3::X,
        previous_position: DVec3::ZERO,
        remaining_secs: 2.0,
        latch: ContactLatch::default(),
    };
    let mut vitals = Vitals::from_tuning(&PawnTuning::default());

    let outcome = handle_contact(&shot, target, Some(&mut vitals), false, &mut NullHud);
    assert_eq!(outcome, ContactOutcome::Resolved { damage: None });
    assert_eq!(vitals.health.current(), 25.0);
}

#[test]
fn test_expired_shot_has_no_effect() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Join { player: P1 });
    engine.tick();
    fire_once(&mut engine);

    let mut expired = 0;
    for _ in 0..130 {
        let report = engine.tick();
        expired += count(&report, |e| matches!(e, SimEvent::ShotExpired { .. }));
        assert_eq!(count(&report, |e| matches!(e, SimEvent::ImpactEffect { .. })), 0);
        assert_eq!(count(&report, |e| matches!(e, SimEvent::ShotHit { .. })), 0);
    }
    assert_eq!(expired, 1);
    assert!(shot_entities(&engine).is_empty());
}

#[test]
fn test_obstacle_stops_shot_without_damage() {
    let mut config = SimConfig::default();
    config.obstacles.push(ObstacleDef {
        position: DVec3::ZERO,
        radius: 200.0,
    });
    let mut engine = duel(config);
    fire_once(&mut engine);

    let mut impacts = 0;
    let mut hits = 0;
    for _ in 0..60 {
        let report = engine.tick();
        impacts += count(&report, |e| matches!(e, SimEvent::ImpactEffect { .. }));
        hits += count(&report, |e| matches!(e, SimEvent::ShotHit { .. }));
    }
    assert_eq!(impacts, 1);
    assert_eq!(hits, 0);
    assert_eq!(engine.tick().pawn(P2).unwrap().health, 25.0);
}

#[test]
fn test_duel_ends_in_single_elimination() {
    let mut config = SimConfig::default();
    config.shot.health_delta = -5.0;
    let mut engine = duel(config);
    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: true,
    });

    let mut eliminations = Vec::new();
    let mut hits = 0;
    for _ in 0..600 {
        let report = engine.tick();
        hits += count(&report, |e| matches!(e, SimEvent::ShotHit { .. }));
        for event in &report.events {
            if let SimEvent::PawnEliminated { player, by } = event {
                eliminations.push((*player, *by));
            }
        }
    }

    assert_eq!(eliminations, vec![(P2, Some(P1))]);
    assert!(hits >= 5);
    assert!(engine.pawn(P2).is_none(), "Eliminated pawn should be removed");
    assert!(engine.pawn(P1).is_some());
    assert_eq!(engine.spawn_slots().free_count(), 1);
}

// ---- Replication ----

#[test]
fn test_replication_emits_on_join_and_change() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Join { player: P1 });
    let report = engine.tick();

    assert_eq!(report.replication.len(), 2);
    for event in &report.replication {
        match event.field {
            ReplicatedField::Shooting { shooting } => {
                assert!(!shooting);
                assert_eq!(event.scope, Visibility::Observers);
            }
            ReplicatedField::Health { current, max } => {
                assert_eq!((current, max), (25.0, 25.0));
                assert_eq!(event.scope, Visibility::Owner);
            }
        }
    }

    assert!(engine.tick().replication.is_empty(), "Nothing changed");

    engine.queue_command(PlayerCommand::SetShooting {
        player: P1,
        shooting: true,
    });
    let report = engine.tick();
    assert_eq!(report.replication.len(), 1);
    assert_eq!(report.replication[0].field, ReplicatedField::Shooting { shooting: true });
}

#[test]
fn test_replication_reports_damage_to_owner() {
    let mut engine = duel(SimConfig::default());
    let shot = fire_once(&mut engine);
    engine.tick();

    engine.push_contact(ContactEvent {
        projectile: shot,
        other: engine.pawn(P2).unwrap(),
        point: DVec3::ZERO,
    });
    let report = engine.tick();

    let health: Vec<_> = report
        .replication
        .iter()
        .filter(|r| matches!(r.field, ReplicatedField::Health { .. }))
        .collect();
    assert_eq!(health.len(), 1);
    assert_eq!(health[0].player, P2);
    assert_eq!(health[0].scope, Visibility::Owner);
}

#[test]
fn test_elimination_replicates_zero_health_to_owner() {
    let mut engine = duel(SimConfig {
        shot: ShotClass {
            health_delta: -25.0,
            ..Default::default()
        },
        ..Default::default()
    });
    let shot = fire_once(&mut engine);
    engine.tick();

    engine.push_contact(ContactEvent {
        projectile: shot,
        other: engine.pawn(P2).unwrap(),
        point: DVec3::ZERO,
    });
    let report = engine.tick();

    assert_eq!(count(&report, |e| matches!(e, SimEvent::PawnEliminated { player: P2, .. })), 1);
    let zeroed = report.replication.iter().any(|r| {
        r.player == P2
            && r.scope == Visibility::Owner
            && matches!(r.field, ReplicatedField::Health { current, .. } if current == 0.0)
    });
    assert!(zeroed, "replication {:?}", report.replication);
    assert!(engine.pawn(P2).is_none());
}

#[test]
fn test_observer_mirrors_without_gameplay() {
    let mut engine = duel(SimConfig {
        role: SimRole::Observer,
        ..Default::default()
    });

    assert!(engine.apply_replicated(P1, ReplicatedField::Shooting { shooting: true }));
    assert!(engine.apply_replicated(P2, ReplicatedField::Health { current: 7.0, max: 25.0 }));
    assert!(!engine.apply_replicated(PlayerId(9), ReplicatedField::Shooting { shooting: true }));

    let report = engine.tick();
    assert_eq!(fired(&report), 0, "Observers never spawn shots");
    assert!(report.replication.is_empty(), "Observers never emit replication");
    assert!(report.pawn(P1).unwrap().shooting);
    assert_eq!(report.pawn(P2).unwrap().health, 7.0);
    assert!(report
        .hud
        .iter()
        .any(|u| u.player == P2 && u.reading.kind == GaugeKind::Health && u.reading.current == 7.0));
}

// ---- Config ----

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let config = SimConfig::from_toml_str(
        r#"
        seed = 7
        role = "Observer"

        [pawn]
        max_power = 40.0

        [shot]
        power_delta = -2.5

        [[spawn_points]]
        position = [0.0, 100.0, 0.0]
        rotation = { yaw = 90.0 }
        "#,
    )
    .unwrap();

    assert_eq!(config.seed, 7);
    assert_eq!(config.role, SimRole::Observer);
    assert_eq!(config.pawn.max_power, 40.0);
    assert_eq!(config.pawn.max_health, 25.0);
    assert_eq!(config.shot.power_delta, -2.5);
    assert_eq!(config.shot.health_delta, -1.0);
    assert_eq!(config.tick_rate, 60);
    assert_eq!(config.spawn_points.len(), 1);
    assert_eq!(config.spawn_points[0].rotation.yaw, 90.0);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = SimConfig::from_toml_str("tick_rate = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "tick_rate", .. }));

    let err = SimConfig::from_toml_str("[pawn.camera_arm]\nmin = 10.0\nmax = 5.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "pawn.camera_arm", .. }));

    let err = SimConfig::from_toml_str("[shot]\nhealth_delta = nan").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "shot.health_delta", .. }));

    let err = SimConfig::from_toml_str("[pawn]\nshoot_interval = inf").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "pawn.shoot_interval", .. }));

    let err = SimConfig::from_toml_str("[shot]\npower_delta = 1.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "shot.power_delta", .. }));

    let err = SimConfig::from_toml_str("seed = \"nope\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = SimConfig::load("/nonexistent/flybot.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
