//! ECS systems that operate on the simulation world each step.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. All state lives in components.

pub mod animation;
pub mod cleanup;
pub mod collision;
pub mod contact;
pub mod movement;
pub mod projectile;
pub mod regen;
pub mod replication;
pub mod snapshot;
pub mod weapon;
