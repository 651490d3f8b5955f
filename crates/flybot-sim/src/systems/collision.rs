//! Built-in overlap detector.
//!
//! Sweeps each shot's last step against every non-shot collider and queues a
//! [`ContactEvent`] per overlap, nearest first. Detection does not filter
//! anything out (not even the instigator); deciding which contact counts is
//! the contact handler's job.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::{Entity, World};

use flybot_core::components::Collider;
use flybot_core::types::Pose;

use crate::shot::{ContactEvent, Shot};

/// First parameter `t` in `[0, 1]` at which the segment `from -> to` enters
/// the sphere, or `None` if it never does.
pub fn segment_sphere_entry(from: DVec3, to: DVec3, center: DVec3, radius: f64) -> Option<f64> {
    let d = to - from;
    let f = from - center;
    let c = f.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let a = d.length_squared();
    if a == 0.0 {
        return None;
    }

    let b = 2.0 * f.dot(d);
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }

    let t = (-b - disc.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

pub fn run(world: &World, queue: &mut VecDeque<ContactEvent>) {
    let targets: Vec<(Entity, DVec3, f64)> = world
        .query::<(&Pose, &Collider, Option<&Shot>)>()
        .iter()
        .filter(|(_, (_, _, shot))| shot.is_none())
        .map(|(entity, (pose, collider, _))| (entity, pose.position, collider.radius))
        .collect();

    let mut hits: Vec<(f64, ContactEvent)> = Vec::new();
    for (projectile, (pose, collider, shot)) in world.query::<(&Pose, &Collider, &Shot)>().iter() {
        hits.clear();
        for &(other, center, radius) in &targets {
            let reach = radius + collider.radius;
            if let Some(t) = segment_sphere_entry(shot.previous_position, pose.position, center, reach) {
                hits.push((
                    t,
                    ContactEvent {
                        projectile,
                        other,
                        point: shot.previous_position.lerp(pose.position, t),
                    },
                ));
            }
        }
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        queue.extend(hits.drain(..).map(|(_, contact)| contact));
    }
}
