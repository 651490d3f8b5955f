//! Weapon loop: gate shots on the cooldown and on power, spawn, then pay.
//!
//! A shot fires only if the gate is open and power would stay strictly above
//! zero after paying the shot class's power cost. The cooldown and the power
//! debit are committed only once the spawner hands back a shot.

use glam::DVec3;
use hecs::World;
use tracing::debug;

use flybot_core::components::{Eliminated, Pilot, Vitals};
use flybot_core::enums::ShotRefusal;
use flybot_core::events::{HudUpdate, SimEvent};
use flybot_core::gauge::HudSink;
use flybot_core::tuning::PawnTuning;
use flybot_core::types::Pose;

use crate::capability::{Instigator, PlayerHud, ProjectileSpawner, ShotHandle};
use crate::systems::animation::body_pose;

/// Result of one shot attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    /// `origin` is the muzzle point the shot spawned at.
    Fired { handle: ShotHandle, origin: DVec3 },
    Refused(ShotRefusal),
}

/// Attempt one shot for a single pawn at time `now`.
#[allow(clippy::too_many_arguments)]
pub fn try_shoot(
    now: f64,
    pose: &Pose,
    pilot: &mut Pilot,
    vitals: &mut Vitals,
    tuning: &PawnTuning,
    instigator: Instigator,
    spawner: &mut dyn ProjectileSpawner,
    hud: &mut dyn HudSink,
) -> ShotOutcome {
    if !pilot.shooting {
        return ShotOutcome::Refused(ShotRefusal::NotShooting);
    }
    if !pilot.weapon.is_open(now) {
        return ShotOutcome::Refused(ShotRefusal::Cooldown);
    }

    let class = pilot.shot_class;
    let projected = vitals.power.current() + class.power_delta;
    if projected <= 0.0 {
        return ShotOutcome::Refused(ShotRefusal::InsufficientPower);
    }

    let body = body_pose(pose, pilot);
    let origin = body.position + body.rotate(tuning.shoot_offset);

    match spawner.spawn(&class, origin, body.orientation, instigator) {
        Some(handle) => {
            pilot.weapon.mark(now);
            vitals.power.apply(class.power_delta, hud);
            ShotOutcome::Fired { handle, origin }
        }
        None => ShotOutcome::Refused(ShotRefusal::SpawnRefused),
    }
}

/// Run the weapon loop for every live pawn.
pub fn run(
    world: &World,
    now: f64,
    tuning: &PawnTuning,
    spawner: &mut dyn ProjectileSpawner,
    hud: &mut Vec<HudUpdate>,
    events: &mut Vec<SimEvent>,
) {
    let mut query = world.query::<(&Pose, &mut Pilot, &mut Vitals, Option<&Eliminated>)>();
    for (entity, (pose, pilot, vitals, eliminated)) in query.iter() {
        if eliminated.is_some() {
            continue;
        }

        let player = pilot.player;
        let instigator = Instigator { entity, player };
        let mut player_hud = PlayerHud {
            player,
            out: &mut *hud,
        };

        match try_shoot(
            now,
            pose,
            pilot,
            vitals,
            tuning,
            instigator,
            spawner,
            &mut player_hud,
        ) {
            ShotOutcome::Fired { handle, origin } => {
                debug!(player = player.0, shot = handle.id.0, power = vitals.power.current(), "shot fired");
                events.push(SimEvent::ShotFired {
                    player,
                    shot: handle.id,
                    position: origin,
                });
            }
            ShotOutcome::Refused(ShotRefusal::SpawnRefused) => {
                debug!(player = player.0, "shot spawn refused");
            }
            ShotOutcome::Refused(_) => {}
        }
    }
}
