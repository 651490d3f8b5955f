//! Rate limiter for repeatable actions.

use serde::{Deserialize, Serialize};

/// Slack for summed fixed steps landing a hair under the interval
/// (twelve 1/60 s steps sum to slightly less than 0.2).
const CLOCK_EPSILON: f64 = 1e-9;

/// Permits an action at most once per `interval` seconds.
///
/// Callers must feed a non-decreasing clock; a rollback trips a debug assertion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CooldownGate {
    interval: f64,
    last_fired_at: Option<f64>,
}

impl CooldownGate {
    /// A gate that has never fired, and is therefore open.
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(0.0),
            last_fired_at: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn last_fired_at(&self) -> Option<f64> {
        self.last_fired_at
    }

    /// Whether an action at `now` would be permitted. Does not mutate.
    pub fn is_open(&self, now: f64) -> bool {
        match self.last_fired_at {
            None => true,
            Some(last) => {
                debug_assert!(now >= last, "cooldown clock went backwards: {now} < {last}");
                now - last + CLOCK_EPSILON >= self.interval
            }
        }
    }

    /// Record that the action happened at `now`.
    pub fn mark(&mut self, now: f64) {
        if let Some(last) = self.last_fired_at {
            debug_assert!(now >= last, "cooldown clock went backwards: {now} < {last}");
        }
        self.last_fired_at = Some(now);
    }

    /// Check and record in one step. Returns false (and changes nothing) while closed.
    pub fn try_fire(&mut self, now: f64) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.last_fired_at = Some(now);
        true
    }

    /// Seconds until the gate opens again (zero when open).
    pub fn remaining(&self, now: f64) -> f64 {
        match self.last_fired_at {
            None => 0.0,
            Some(_) if self.is_open(now) => 0.0,
            Some(last) => (self.interval - (now - last)).max(0.0),
        }
    }
}
