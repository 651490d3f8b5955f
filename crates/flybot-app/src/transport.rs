//! Replication transport adapters.
//!
//! The engine only produces the outward `{field, scope}` list. A transport
//! decides how it leaves the process; here that is the log.

use flybot_core::enums::Visibility;
use flybot_core::events::ReplicationEvent;
use tracing::{debug, info, warn};

/// Consumes the replication events of one step.
pub trait ReplicationTransport: Send {
    fn publish(&mut self, tick: u64, events: &[ReplicationEvent]);
}

/// Writes every replication event to the log as JSON.
///
/// Owner-scoped fields go out at `debug`, observer-scoped ones at `info`.
#[derive(Debug, Default)]
pub struct LogTransport {
    published: u64,
}

impl LogTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events published so far.
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl ReplicationTransport for LogTransport {
    fn publish(&mut self, tick: u64, events: &[ReplicationEvent]) {
        for event in events {
            let payload = match serde_json::to_string(&event.field) {
                Ok(json) => json,
                Err(err) => {
                    warn!(%err, "failed to encode replication event");
                    continue;
                }
            };

            match event.scope {
                Visibility::Observers => {
                    info!(tick, player = event.player.0, scope = "observers", %payload, "replicate")
                }
                Visibility::Owner => {
                    debug!(tick, player = event.player.0, scope = "owner", %payload, "replicate")
                }
            }
            self.published += 1;
        }
    }
}

/// Collects events in memory.
impl ReplicationTransport for Vec<ReplicationEvent> {
    fn publish(&mut self, _tick: u64, events: &[ReplicationEvent]) {
        self.extend_from_slice(events);
    }
}
