//! Request dispatch.
//!
//! Routing precedence, checked in order:
//! 1. `POST /api/commands` — parse and execute a command batch.
//! 2. `GET /api/status` — liveness probe.
//! 3. `OPTIONS` on any path — CORS preflight.
//! 4. Everything else — plain-text 404, with the offending request line
//!    (truncated) reported through the sink.
//!
//! The router is pure dispatch over an already-assembled request; it owns
//! no sockets and no timing.

use crate::app::ports::{LogPort, OutputPort};
use crate::batch::{self, CommandBatch};
use crate::http::request::{InboundRequest, Method};
use crate::http::response;
use crate::logsink::LogLevel;
use crate::registry::ActuatorRegistry;
use crate::store::StateStore;

/// Longest request-line prefix quoted in unmatched-request reports.
const REQUEST_LINE_REPORT_LEN: usize = 30;

/// Dispatch one request; returns the full response bytes to write back.
pub fn route(
    req: &InboundRequest,
    registry: &ActuatorRegistry,
    store: &mut StateStore,
    now_ms: u64,
    out: &mut impl OutputPort,
    sink: &mut impl LogPort,
) -> Vec<u8> {
    match (req.method(), req.path()) {
        (Some(Method::Post), "/api/commands") => {
            handle_commands(req, registry, store, now_ms, out, sink)
        }
        (Some(Method::Get), "/api/status") => response::status(registry.len()),
        (Some(Method::Options), _) => response::preflight(),
        _ => {
            let line: String = req
                .head
                .request_line
                .chars()
                .take(REQUEST_LINE_REPORT_LEN)
                .collect();
            sink.log(
                LogLevel::Warn,
                &format!("unmatched request: {line}"),
                "http",
            );
            response::not_found()
        }
    }
}

fn handle_commands(
    req: &InboundRequest,
    registry: &ActuatorRegistry,
    store: &mut StateStore,
    now_ms: u64,
    out: &mut impl OutputPort,
    sink: &mut impl LogPort,
) -> Vec<u8> {
    let body = req.body_text();
    // The payload starts at the first brace; anything before it is noise.
    let Some(start) = body.find('{') else {
        sink.log(LogLevel::Error, "no JSON found in request", "json_parse");
        return response::bad_request("No JSON found");
    };

    // Deserialize the first JSON document and tolerate trailing garbage,
    // matching the lenient behaviour the companion service relies on.
    let mut de = serde_json::Deserializer::from_str(&body[start..]);
    let parsed: Result<CommandBatch, _> = serde::Deserialize::deserialize(&mut de);
    match parsed {
        Ok(cmd_batch) => {
            let executed =
                batch::execute_batch(&cmd_batch, registry, store, now_ms, out, sink);
            response::command_result(executed)
        }
        Err(err) => {
            sink.log(
                LogLevel::Error,
                &format!("JSON parse error: {err}"),
                "json_parse",
            );
            response::bad_request(&format!("JSON Parse Error: {err}"))
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
