//! Projectile kinematics: straight-line flight and lifetime expiry.
//!
//! Expired shots are destroyed silently: no impact effect, no damage.

use hecs::{Entity, World};
use tracing::debug;

use flybot_core::events::SimEvent;
use flybot_core::types::Pose;

use crate::shot::Shot;

pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<SimEvent>) {
    despawn_buffer.clear();

    for (entity, (pose, shot)) in world.query_mut::<(&mut Pose, &mut Shot)>() {
        shot.previous_position = pose.position;
        pose.position += shot.velocity * dt;
        shot.remaining_secs -= dt;

        if shot.remaining_secs <= 0.0 {
            debug!(shot = shot.id.0, "shot expired");
            events.push(SimEvent::ShotExpired { shot: shot.id });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
