//! Actuator state store — the mutable side of the registry.
//!
//! Holds the last commanded output level, the active flag, and the optional
//! auto-revert deadline for every registered actuator.  All writes to the
//! physical outputs funnel through [`StateStore::apply`] and
//! [`StateStore::revert`], so an actuator can never end up in a state that a
//! single apply could not have produced.

use heapless::Vec;

use crate::app::ports::{LogPort, OutputPort};
use crate::error::CommandError;
use crate::logsink::LogLevel;
use crate::registry::{Actuator, Capability, MAX_ACTUATORS};

// ───────────────────────────────────────────────────────────────
// Actions
// ───────────────────────────────────────────────────────────────

/// Internal action vocabulary after wire-format translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Set a proportional output to a percentage (0–100).
    Power,
    /// Set a binary output on (non-zero) or off (zero).
    State,
}

impl Action {
    /// Parse the translated action string.  Both the canonical and the
    /// long-form spellings used by older companion builds are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "power" | "set_power" => Some(Self::Power),
            "state" | "set_state" => Some(Self::State),
            _ => None,
        }
    }
}

/// Map a 0–100 % command onto the 8-bit driver domain, rounding to nearest.
pub fn percent_to_duty(percent: u8) -> u8 {
    ((u32::from(percent) * 255 + 50) / 100) as u8
}

// ───────────────────────────────────────────────────────────────
// Per-actuator state
// ───────────────────────────────────────────────────────────────

/// Mutable state of one actuator.
///
/// Invariants (maintained by `apply`/`revert`):
/// - `current_value` is the last value written to the driver (0–255 for
///   proportional channels, 0/1 for binary ones).
/// - `deadline_ms` is present iff the producing command carried both a
///   positive value and a positive duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActuatorState {
    pub current_value: u8,
    pub is_active: bool,
    pub deadline_ms: Option<u64>,
}

// ───────────────────────────────────────────────────────────────
// Store
// ───────────────────────────────────────────────────────────────

/// One [`ActuatorState`] slot per registered actuator, indexed by
/// registration order.
pub struct StateStore {
    states: Vec<ActuatorState, MAX_ACTUATORS>,
}

impl StateStore {
    /// All-zero state for `count` actuators (matching registry bring-up,
    /// which drives every output to its off level).
    pub fn new(count: usize) -> Self {
        let mut states = Vec::new();
        for _ in 0..count.min(MAX_ACTUATORS) {
            // Capacity is MAX_ACTUATORS, same as the registry's.
            let _ = states.push(ActuatorState::default());
        }
        Self { states }
    }

    /// Apply one command to `actuator` (registry slot `idx`).
    ///
    /// On success the driver has been written, the state slot updated, and
    /// an `info` event emitted (best-effort).  Returns the driver-domain
    /// value that was written.
    pub fn apply(
        &mut self,
        idx: usize,
        actuator: &Actuator,
        action: Action,
        value: i32,
        duration_ms: u32,
        now_ms: u64,
        out: &mut impl OutputPort,
        sink: &mut impl LogPort,
    ) -> Result<u8, CommandError> {
        let applied = match action {
            Action::Power => {
                if actuator.capability != Capability::Proportional {
                    return Err(CommandError::UnsupportedAction);
                }
                let percent = value.clamp(0, 100) as u8;
                let duty = percent_to_duty(percent);
                out.write_pwm(actuator.channel, duty);
                sink.log(
                    LogLevel::Info,
                    &format!(
                        "device {} PWM set to {}% ({}/255)",
                        actuator.name, percent, duty
                    ),
                    "device_control",
                );
                duty
            }
            Action::State => {
                if actuator.capability != Capability::Binary {
                    return Err(CommandError::UnsupportedAction);
                }
                let high = value > 0;
                out.write_digital(actuator.channel, high);
                sink.log(
                    LogLevel::Info,
                    &format!(
                        "device {} state set to {}",
                        actuator.name,
                        if high { "on" } else { "off" }
                    ),
                    "device_control",
                );
                u8::from(high)
            }
        };

        if let Some(state) = self.states.get_mut(idx) {
            state.current_value = applied;
            state.is_active = value > 0;
            state.deadline_ms = if duration_ms > 0 && value > 0 {
                Some(now_ms + u64::from(duration_ms))
            } else {
                None
            };
        }
        Ok(applied)
    }

    /// Force `actuator` to its off level and clear any pending deadline.
    /// Emitted as a timer-driven revert.
    pub fn revert(
        &mut self,
        idx: usize,
        actuator: &Actuator,
        out: &mut impl OutputPort,
        sink: &mut impl LogPort,
    ) {
        match actuator.capability {
            Capability::Proportional => out.write_pwm(actuator.channel, 0),
            Capability::Binary => out.write_digital(actuator.channel, false),
        }
        if let Some(state) = self.states.get_mut(idx) {
            state.current_value = 0;
            state.is_active = false;
            state.deadline_ms = None;
        }
        sink.log(
            LogLevel::Info,
            &format!("device {} timed off", actuator.name),
            "timer_task",
        );
    }

    pub fn state(&self, idx: usize) -> Option<&ActuatorState> {
        self.states.get(idx)
    }

    pub fn deadline(&self, idx: usize) -> Option<u64> {
        self.states.get(idx).and_then(|s| s.deadline_ms)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
