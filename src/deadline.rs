//! Deadline scheduler — reverts timed actuators when their duration elapses.
//!
//! Invoked once per outer-loop pass, unconditionally.  The reference
//! deployment declares a 1-second scan interval in configuration but never
//! gates on it; that behaviour is preserved here (the config field exists
//! but the scan runs every tick — see `SystemConfig::status_check_interval_ms`).

use crate::app::ports::{LogPort, OutputPort};
use crate::registry::ActuatorRegistry;
use crate::store::StateStore;

/// Scans the state store in registration order and reverts every actuator
/// whose deadline has passed.  Reverting clears the deadline, so a given
/// expiry fires exactly once.
pub struct DeadlineScheduler;

impl Default for DeadlineScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self
    }

    /// One scan.  Reverts are independent; the order among simultaneously
    /// expired actuators carries no meaning.
    pub fn tick(
        &self,
        registry: &ActuatorRegistry,
        store: &mut StateStore,
        now_ms: u64,
        out: &mut impl OutputPort,
        sink: &mut impl LogPort,
    ) {
        for (idx, actuator) in registry.iter() {
            if let Some(deadline) = store.deadline(idx) {
                if now_ms >= deadline {
                    store.revert(idx, actuator, out, sink);
                }
            }
        }
    }
}
