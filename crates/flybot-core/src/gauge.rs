//! Bounded resource gauges (health, power).
//!
//! Every write is clamped to `[0, max]`, so `current` can never be
//! observed outside that range.

use serde::{Deserialize, Serialize};

/// Which gauge a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GaugeKind {
    Health,
    Power,
}

/// A single gauge value as shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeReading {
    pub kind: GaugeKind,
    pub current: f64,
    pub max: f64,
}

/// Receives gauge changes for display. Fire-and-forget.
pub trait HudSink {
    fn on_gauge_changed(&mut self, kind: GaugeKind, current: f64, max: f64);
}

/// Sink that drops every notification.
pub struct NullHud;

impl HudSink for NullHud {
    fn on_gauge_changed(&mut self, _kind: GaugeKind, _current: f64, _max: f64) {}
}

impl HudSink for Vec<GaugeReading> {
    fn on_gauge_changed(&mut self, kind: GaugeKind, current: f64, max: f64) {
        self.push(GaugeReading { kind, current, max });
    }
}

/// Result of `ResourceGauge::apply`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeDelta {
    /// Change that actually landed after clamping.
    pub applied: f64,
    /// True only on the application that took the gauge from above zero to zero.
    pub depleted: bool,
}

impl GaugeDelta {
    pub const NONE: GaugeDelta = GaugeDelta {
        applied: 0.0,
        depleted: false,
    };

    /// True when the gauge was already saturated in the requested direction.
    pub fn saturated(&self) -> bool {
        self.applied == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceGauge {
    kind: GaugeKind,
    current: f64,
    max: f64,
    regen_rate: f64,
}

impl ResourceGauge {
    /// A full gauge. Negative `max` is treated as zero.
    pub fn new(kind: GaugeKind, max: f64, regen_rate: f64) -> Self {
        let max = max.max(0.0);
        Self {
            kind,
            current: max,
            max,
            regen_rate,
        }
    }

    /// A gauge starting at `current`, clamped into range.
    pub fn with_current(kind: GaugeKind, current: f64, max: f64, regen_rate: f64) -> Self {
        let mut gauge = Self::new(kind, max, regen_rate);
        gauge.current = current.clamp(0.0, gauge.max);
        gauge
    }

    pub fn kind(&self) -> GaugeKind {
        self.kind
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn regen_rate(&self) -> f64 {
        self.regen_rate
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn reading(&self) -> GaugeReading {
        GaugeReading {
            kind: self.kind,
            current: self.current,
            max: self.max,
        }
    }

    /// Add `regen_rate * dt`. Returns whether the value changed.
    pub fn regenerate(&mut self, dt: f64) -> bool {
        let before = self.current;
        self.current = (self.current + self.regen_rate * dt).clamp(0.0, self.max);
        self.current != before
    }

    /// Add `delta`, clamp, and notify the HUD if the value moved.
    pub fn apply(&mut self, delta: f64, hud: &mut dyn HudSink) -> GaugeDelta {
        let before = self.current;
        self.current = (self.current + delta).clamp(0.0, self.max);
        let applied = self.current - before;

        if applied != 0.0 {
            hud.on_gauge_changed(self.kind, self.current, self.max);
        }

        GaugeDelta {
            applied,
            depleted: before > 0.0 && self.current == 0.0,
        }
    }

    /// Overwrite from a replicated value. Observers only mirror; no events.
    pub fn set_mirrored(&mut self, current: f64, max: f64) {
        self.max = max.max(0.0);
        self.current = current.clamp(0.0, self.max);
    }
}
