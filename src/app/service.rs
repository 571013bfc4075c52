//! Application service — the hexagonal core.
//!
//! [`Controller`] owns the actuator registry, the per-actuator state store,
//! and the deadline scheduler.  All I/O flows through port traits injected
//! at call sites, so the entire request→apply→revert path runs under test
//! with mock adapters.
//!
//! ```text
//!  InboundRequest ──▶ ┌──────────────────────────┐ ──▶ response bytes
//!                     │        Controller         │
//!      OutputPort ◀───│ registry · store · clock  │───▶ LogPort
//!                     └──────────────────────────┘
//! ```

use log::info;

use crate::deadline::DeadlineScheduler;
use crate::http::request::InboundRequest;
use crate::http::router;
use crate::registry::{Actuator, ActuatorRegistry};
use crate::store::StateStore;

use super::ports::{LogPort, OutputPort};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The domain core: dispatches requests, tracks actuator state, and runs
/// the auto-revert scan.
pub struct Controller {
    registry: ActuatorRegistry,
    store: StateStore,
    scheduler: DeadlineScheduler,
}

impl Controller {
    /// Register `descriptors` and drive every output to its off level.
    pub fn new(descriptors: &[Actuator], out: &mut impl OutputPort) -> Self {
        let registry = ActuatorRegistry::new(descriptors, out);
        let store = StateStore::new(registry.len());
        info!("controller ready, {} device(s) registered", registry.len());
        Self {
            registry,
            store,
            scheduler: DeadlineScheduler::new(),
        }
    }

    /// Dispatch one assembled request; returns the response to write back.
    pub fn handle_request(
        &mut self,
        req: &InboundRequest,
        now_ms: u64,
        out: &mut impl OutputPort,
        sink: &mut impl LogPort,
    ) -> Vec<u8> {
        router::route(req, &self.registry, &mut self.store, now_ms, out, sink)
    }

    /// One auto-revert scan.  Runs unconditionally every outer-loop pass.
    pub fn check_deadlines(&mut self, now_ms: u64, out: &mut impl OutputPort, sink: &mut impl LogPort) {
        self.scheduler
            .tick(&self.registry, &mut self.store, now_ms, out, sink);
    }

    pub fn device_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &ActuatorRegistry {
        &self.registry
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
