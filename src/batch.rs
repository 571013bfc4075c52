//! Command batch — wire format, name translation, and interpretation.
//!
//! The companion service posts batches shaped as
//! `{"id": "...", "ts": ..., "cmds": [{"dev", "act", "val", "dur"}, ...]}`.
//! Every field is defaulted: a missing or null field reads as empty/zero
//! rather than failing the whole batch.  Commands execute independently —
//! one bad command never aborts its neighbours — and the response reports
//! how many actually reached an output.

use log::info;
use serde::Deserialize;

use crate::app::ports::{LogPort, OutputPort};
use crate::logsink::LogLevel;
use crate::registry::ActuatorRegistry;
use crate::store::{Action, StateStore};

// ───────────────────────────────────────────────────────────────
// Wire format
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CommandBatch {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ts: u64,
    #[serde(default)]
    pub cmds: Vec<WireCommand>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireCommand {
    #[serde(default)]
    pub dev: String,
    #[serde(default)]
    pub act: String,
    #[serde(default)]
    pub val: i32,
    #[serde(default)]
    pub dur: u32,
}

// ───────────────────────────────────────────────────────────────
// Translation
// ───────────────────────────────────────────────────────────────

/// Map a short wire device name to the registry name.  Names that are not
/// in the table pass through unchanged, so batches may also use registry
/// names directly; resolution is ultimately the registry's job.
pub fn translate_device(wire: &str) -> &str {
    match wire {
        "pump1" => "inflate_pump_1",
        "pump2" => "inflate_pump_2",
        "pump3" => "exhaust_pump_1",
        "pump4" => "exhaust_pump_2",
        "valve1" => "valve_1",
        "valve2" => "valve_2",
        other => other,
    }
}

/// Resolve a wire action to the internal vocabulary.  The short spellings
/// come from the companion service; the long forms are accepted directly.
pub fn resolve_action(wire: &str) -> Option<Action> {
    match wire {
        "setPwr" => Some(Action::Power),
        "setSt" => Some(Action::State),
        other => Action::parse(other),
    }
}

// ───────────────────────────────────────────────────────────────
// Interpreter
// ───────────────────────────────────────────────────────────────

/// Execute every command in the batch against the registry and state store.
/// Returns the number of commands that reached an output.  Failures are
/// reported per command through the sink and skipped.
pub fn execute_batch(
    batch: &CommandBatch,
    registry: &ActuatorRegistry,
    store: &mut StateStore,
    now_ms: u64,
    out: &mut impl OutputPort,
    sink: &mut impl LogPort,
) -> usize {
    info!(
        "batch '{}' (ts {}): {} command(s)",
        batch.id,
        batch.ts,
        batch.cmds.len()
    );

    let mut executed = 0;
    for cmd in &batch.cmds {
        let device = translate_device(&cmd.dev);
        let Some((idx, actuator)) = registry.lookup(device) else {
            sink.log(
                LogLevel::Error,
                &format!("unknown device: {}", cmd.dev),
                "device_control",
            );
            continue;
        };
        let Some(action) = resolve_action(&cmd.act) else {
            sink.log(
                LogLevel::Error,
                &format!("unknown action '{}' for device {}", cmd.act, device),
                "device_control",
            );
            continue;
        };
        match store.apply(idx, actuator, action, cmd.val, cmd.dur, now_ms, out, sink) {
            Ok(_) => executed += 1,
            Err(err) => {
                sink.log(
                    LogLevel::Error,
                    &format!("device {}: {}", device, err),
                    "device_control",
                );
            }
        }
    }
    executed
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
