//! Streaming request reader.
//!
//! Two layers:
//! - [`RequestAssembler`] — a pure state machine fed arbitrary byte chunks,
//!   `ReadingHeaders → ReadingBody → Complete`.  A single socket read may
//!   deliver part of a header line, the whole head plus some body, or one
//!   byte; the assembler doesn't care.
//! - [`RequestReader`] — pumps a [`Transport`] into the assembler under the
//!   two independent timeout budgets (header phase, body phase), sleeping
//!   briefly between empty polls.
//!
//! A header-phase timeout abandons the request outright (no response can be
//! formed without a request line).  A body-phase timeout hands the partial
//! body onward as-is — the JSON parser is the validation layer.

use log::debug;

use crate::app::ports::TimePort;
use crate::error::ReadPhase;
use crate::http::request::{InboundRequest, Method, RequestHead};
use crate::http::transport::Transport;

// ───────────────────────────────────────────────────────────────
// Assembler
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    ReadingHeaders,
    ReadingBody,
    Complete,
}

/// Incremental request parser.  Bytes in, structured request out.
pub struct RequestAssembler {
    phase: Phase,
    /// Current (incomplete) header line, sans the terminating `\n`.
    line: Vec<u8>,
    request_line_seen: bool,
    head: RequestHead,
    body: Vec<u8>,
}

impl Default for RequestAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestAssembler {
    pub fn new() -> Self {
        Self {
            phase: Phase::ReadingHeaders,
            line: Vec::new(),
            request_line_seen: false,
            head: RequestHead::default(),
            body: Vec::new(),
        }
    }

    /// Feed a chunk.  Transitions phases as boundaries are crossed; bytes
    /// past the declared body length are ignored.
    pub fn feed(&mut self, data: &[u8]) {
        for &byte in data {
            match self.phase {
                Phase::ReadingHeaders => self.feed_header_byte(byte),
                Phase::ReadingBody => {
                    if self.body.len() < self.head.content_length {
                        self.body.push(byte);
                    }
                    if self.body.len() >= self.head.content_length {
                        self.phase = Phase::Complete;
                    }
                }
                Phase::Complete => return,
            }
        }
    }

    fn feed_header_byte(&mut self, byte: u8) {
        if byte != b'\n' {
            self.line.push(byte);
            return;
        }
        let line = String::from_utf8_lossy(&self.line).into_owned();
        self.line.clear();

        // A line that is empty (or a lone CR) terminates the head.
        if line.is_empty() || line == "\r" {
            self.phase = if self.head.method == Some(Method::Post) && self.head.content_length > 0
            {
                Phase::ReadingBody
            } else {
                Phase::Complete
            };
            return;
        }

        if self.request_line_seen {
            self.head.parse_header_line(&line);
        } else {
            self.head.parse_request_line(&line);
            self.request_line_seen = true;
        }
    }

    pub fn headers_done(&self) -> bool {
        self.phase != Phase::ReadingHeaders
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Consume the assembler.  Valid once the head is complete; a short
    /// body (phase timeout, early disconnect) is passed through untouched.
    pub fn finish(self) -> InboundRequest {
        InboundRequest {
            head: self.head,
            body: self.body,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Reader
// ───────────────────────────────────────────────────────────────

/// Outcome of servicing one accepted connection.
#[derive(Debug)]
pub enum ReadOutcome {
    /// Head complete; body present as far as the client delivered it.
    Complete(InboundRequest),
    /// A phase budget expired with the head still incomplete.
    TimedOut(ReadPhase),
    /// Peer vanished before the head completed.
    Disconnected,
}

/// Polls a connection into a complete request under per-phase budgets.
pub struct RequestReader {
    header_timeout_ms: u32,
    body_timeout_ms: u32,
    poll_sleep_ms: u32,
}

impl RequestReader {
    pub fn new(header_timeout_ms: u32, body_timeout_ms: u32, poll_sleep_ms: u32) -> Self {
        Self {
            header_timeout_ms,
            body_timeout_ms,
            poll_sleep_ms,
        }
    }

    /// Read one request.  Blocks the cooperative loop for at most
    /// `header_timeout_ms + body_timeout_ms` — the accepted latency bound
    /// for deadline scans and log retries.
    pub fn read_request(
        &self,
        conn: &mut impl Transport,
        clock: &impl TimePort,
    ) -> ReadOutcome {
        let mut asm = RequestAssembler::new();
        let mut buf = [0u8; 64];

        // ── Header phase ──────────────────────────────────────
        let deadline = clock.now_ms() + u64::from(self.header_timeout_ms);
        while !asm.headers_done() {
            if clock.now_ms() >= deadline {
                debug!("request head incomplete after {}ms", self.header_timeout_ms);
                return ReadOutcome::TimedOut(ReadPhase::Headers);
            }
            match conn.read(&mut buf) {
                Ok(0) => clock.sleep_ms(self.poll_sleep_ms),
                Ok(n) => asm.feed(&buf[..n]),
                Err(_) => return ReadOutcome::Disconnected,
            }
        }

        // ── Body phase ────────────────────────────────────────
        // One byte per read: the WiFi stack trickles body bytes and a
        // larger read offers no benefit at these sizes.
        let deadline = clock.now_ms() + u64::from(self.body_timeout_ms);
        let mut byte = [0u8; 1];
        while !asm.is_complete() {
            if clock.now_ms() >= deadline {
                debug!("body short after {}ms, continuing with partial", self.body_timeout_ms);
                break;
            }
            match conn.read(&mut byte) {
                Ok(0) => clock.sleep_ms(self.poll_sleep_ms),
                Ok(_) => asm.feed(&byte),
                // Disconnect mid-body: partial body is still interpreted.
                Err(_) => break,
            }
        }

        ReadOutcome::Complete(asm.finish())
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
