//! Gauge regeneration. Runs before the weapon so regained power is spendable
//! in the same step.

use hecs::World;

use flybot_core::components::{Pilot, Vitals};
use flybot_core::events::HudUpdate;

pub fn run(world: &mut World, dt: f64, hud: &mut Vec<HudUpdate>) {
    for (_entity, (pilot, vitals)) in world.query_mut::<(&Pilot, &mut Vitals)>() {
        for gauge in [&mut vitals.health, &mut vitals.power] {
            if gauge.regenerate(dt) {
                hud.push(HudUpdate {
                    player: pilot.player,
                    reading: gauge.reading(),
                });
            }
        }
    }
}
