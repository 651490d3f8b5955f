//! Projectile contact handler.
//!
//! Drains the inbound contact queue once per step. For each contact the shot
//! goes `Alive -> Resolved` at most once: the first valid contact applies the
//! shot's health delta to a damageable target, fires the impact effect and
//! destroys the shot. Later contacts for the same shot are ignored.

use std::collections::VecDeque;

use hecs::{Entity, World};
use tracing::{debug, info};

use flybot_core::components::{Eliminated, Pilot, Vitals};
use flybot_core::enums::SimRole;
use flybot_core::events::{HudUpdate, SimEvent};
use flybot_core::gauge::{GaugeDelta, HudSink};
use flybot_core::types::Pose;

use crate::capability::{Damageable, PlayerHud};
use crate::shot::{ContactEvent, Shot};

/// What a single contact did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// The shot hit its own instigator; nothing happened and it stays alive.
    SelfContact,
    /// The shot was already resolved by an earlier contact.
    AlreadyResolved,
    /// This contact resolved the shot. `damage` is set when a target took it.
    Resolved { damage: Option<GaugeDelta> },
}

/// Resolve one contact against a shot.
///
/// `target` is the contacted actor's damageable capability, if it has one.
/// Observers pass `apply_damage = false`: they resolve and show effects but
/// never change health.
pub fn handle_contact(
    shot: &Shot,
    other: Entity,
    target: Option<&mut dyn Damageable>,
    apply_damage: bool,
    hud: &mut dyn HudSink,
) -> ContactOutcome {
    if other == shot.instigator {
        return ContactOutcome::SelfContact;
    }
    if !shot.latch.try_resolve() {
        return ContactOutcome::AlreadyResolved;
    }

    let damage = match target {
        Some(target) if apply_damage => Some(target.apply_damage(shot.health_delta(), hud)),
        _ => None,
    };
    ContactOutcome::Resolved { damage }
}

/// Drain the contact queue.
pub fn run(
    world: &mut World,
    queue: &mut VecDeque<ContactEvent>,
    role: SimRole,
    hud: &mut Vec<HudUpdate>,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let mut eliminated: Vec<(Entity, Eliminated)> = Vec::new();
    let apply_damage = role == SimRole::Authority;

    while let Some(contact) = queue.pop_front() {
        if !world.contains(contact.other) {
            continue;
        }
        let Ok(shot) = world.get::<&Shot>(contact.projectile) else {
            // Already destroyed (expired or resolved in an earlier step).
            continue;
        };

        let target_player = world.get::<&Pilot>(contact.other).ok().map(|p| p.player);
        let mut vitals = world.get::<&mut Vitals>(contact.other).ok();
        let mut sink = PlayerHud {
            player: target_player.unwrap_or(shot.instigator_player),
            out: &mut *hud,
        };
        let target = vitals.as_deref_mut().map(|v| v as &mut dyn Damageable);

        let outcome = handle_contact(&shot, contact.other, target, apply_damage, &mut sink);
        match outcome {
            ContactOutcome::SelfContact => {
                debug!(shot = shot.id.0, "shot touched its instigator; ignored");
            }
            ContactOutcome::AlreadyResolved => {
                debug!(shot = shot.id.0, "extra contact on resolved shot; ignored");
            }
            ContactOutcome::Resolved { damage } => {
                debug_assert!(
                    !despawn_buffer.contains(&contact.projectile),
                    "contact latch let a shot resolve twice"
                );

                if let (Some(delta), Some(target)) = (damage, target_player) {
                    info!(
                        shot = shot.id.0,
                        shooter = shot.instigator_player.0,
                        victim = target.0,
                        applied = delta.applied,
                        health = vitals.as_ref().map(|v| v.health.current()).unwrap_or_default(),
                        "shot hit"
                    );
                    events.push(SimEvent::ShotHit {
                        shot: shot.id,
                        instigator: shot.instigator_player,
                        target,
                        applied: delta.applied,
                    });

                    if delta.depleted {
                        info!(player = target.0, by = shot.instigator_player.0, "pawn eliminated");
                        events.push(SimEvent::PawnEliminated {
                            player: target,
                            by: Some(shot.instigator_player),
                        });
                        eliminated.push((
                            contact.other,
                            Eliminated {
                                by: Some(shot.instigator_player),
                            },
                        ));
                    }
                }

                let orientation = world
                    .get::<&Pose>(contact.projectile)
                    .map(|p| p.orientation)
                    .unwrap_or_default();
                events.push(SimEvent::ImpactEffect {
                    shot: shot.id,
                    position: contact.point,
                    orientation,
                });
                despawn_buffer.push(contact.projectile);
            }
        }
    }

    for (entity, marker) in eliminated {
        let _ = world.insert_one(entity, marker);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
