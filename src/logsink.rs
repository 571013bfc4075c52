//! Remote log sink — best-effort delivery to the collector on the AP subnet.
//!
//! Delivery policy:
//! - `error`/`warn` transmit immediately, unconditionally.
//! - `info`/`debug` transmit only if the minimum interval has elapsed since
//!   the last successful non-urgent send; otherwise the event is dropped
//!   (never queued).
//! - A failed transmission parks its payload in a single pending slot that
//!   [`RemoteLogger::retry_pending`] retries once per outer-loop tick.  A
//!   newer failure overwrites the slot — at most the most recent failure is
//!   remembered.

use serde::Serialize;

use crate::app::ports::LogTransport;

// ───────────────────────────────────────────────────────────────
// Levels
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Urgent levels bypass the rate limiter.
    pub fn is_urgent(self) -> bool {
        matches!(self, Self::Error | Self::Warn)
    }
}

// ───────────────────────────────────────────────────────────────
// Wire format
// ───────────────────────────────────────────────────────────────

/// Payload posted to the collector.  Field order matters to nobody, but
/// mirrors what the companion service's ingest endpoint documents.
#[derive(Debug, Serialize)]
struct LogRecord<'a> {
    timestamp: u64,
    level: &'a str,
    message: &'a str,
    category: &'a str,
}

/// Strip non-printable bytes from a message before serialization.
///
/// Printable ASCII and the whitespace escapes `\n` `\r` `\t` survive; every
/// other control byte is dropped.  JSON escaping of quotes and backslashes
/// is left to the serializer.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|&c| ('\u{20}'..='\u{7e}').contains(&c) || c == '\n' || c == '\r' || c == '\t')
        .collect()
}

// ───────────────────────────────────────────────────────────────
// Logger
// ───────────────────────────────────────────────────────────────

/// Rate-limited transmitter with a one-deep retry slot.
pub struct RemoteLogger {
    /// Serialized payload of the most recent failed send, awaiting retry.
    pending: Option<String>,
    /// Tick of the last *successful* non-urgent send; `None` until one lands.
    last_sent_ms: Option<u64>,
    min_interval_ms: u32,
}

impl RemoteLogger {
    pub fn new(min_interval_ms: u32) -> Self {
        Self {
            pending: None,
            last_sent_ms: None,
            min_interval_ms,
        }
    }

    /// Record one event.  Never blocks beyond the transport's own bounded
    /// connect timeout and never propagates failure to the caller.
    pub fn log(
        &mut self,
        level: LogLevel,
        message: &str,
        category: &str,
        now_ms: u64,
        net: &mut impl LogTransport,
    ) {
        if !level.is_urgent() && !self.interval_elapsed(now_ms) {
            return; // Dropped, not queued.
        }

        let clean = sanitize(message);
        let record = LogRecord {
            timestamp: now_ms,
            level: level.as_str(),
            message: &clean,
            category,
        };
        let Ok(payload) = serde_json::to_string(&record) else {
            return;
        };

        match net.send(&payload) {
            Ok(()) => {
                if !level.is_urgent() {
                    self.last_sent_ms = Some(now_ms);
                }
            }
            Err(_) => {
                // Last-write-wins: a newer failure supersedes the old one.
                self.pending = Some(payload);
            }
        }
    }

    /// One retry attempt for the pending slot.  Call once per loop tick.
    pub fn retry_pending(&mut self, net: &mut impl LogTransport) {
        if let Some(payload) = self.pending.take() {
            if net.send(&payload).is_err() {
                self.pending = Some(payload);
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn interval_elapsed(&self, now_ms: u64) -> bool {
        match self.last_sent_ms {
            None => true,
            Some(t) => now_ms.saturating_sub(t) >= u64::from(self.min_interval_ms),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    struct FakeCollector {
        reachable: bool,
        sent: Vec<String>,
        attempts: usize,
    }

    impl FakeCollector {
        fn new(reachable: bool) -> Self {
            Self {
                reachable,
                sent: Vec::new(),
                attempts: 0,
            }
        }
    }

    impl LogTransport for FakeCollector {
        fn send(&mut self, payload: &str) -> Result<(), TransportError> {
            self.attempts += 1;
            if self.reachable {
                self.sent.push(payload.to_string());
                Ok(())
            } else {
                Err(TransportError::ConnectFailed)
            }
        }
    }

    #[test]
    fn info_within_interval_is_dropped() {
        let mut logger = RemoteLogger::new(1000);
        let mut net = FakeCollector::new(true);
        logger.log(LogLevel::Info, "first", "system", 0, &mut net);
        logger.log(LogLevel::Info, "second", "system", 500, &mut net);
        assert_eq!(net.attempts, 1, "second info inside the window must drop");
        logger.log(LogLevel::Info, "third", "system", 1000, &mut net);
        assert_eq!(net.attempts, 2);
    }

    #[test]
    fn error_always_transmits() {
        let mut logger = RemoteLogger::new(1000);
        let mut net = FakeCollector::new(true);
        logger.log(LogLevel::Info, "a", "system", 0, &mut net);
        logger.log(LogLevel::Error, "boom", "device_control", 100, &mut net);
        logger.log(LogLevel::Warn, "odd", "http", 200, &mut net);
        assert_eq!(net.attempts, 3);
    }

    #[test]
    fn failure_parks_payload_and_retry_clears_it() {
        let mut logger = RemoteLogger::new(1000);
        let mut net = FakeCollector::new(false);
        logger.log(LogLevel::Error, "lost", "system", 0, &mut net);
        assert!(logger.has_pending());

        // Collector still down: slot survives the retry.
        logger.retry_pending(&mut net);
        assert!(logger.has_pending());

        // Connectivity restored: one retry drains the slot.
        net.reachable = true;
        logger.retry_pending(&mut net);
        assert!(!logger.has_pending());
        assert_eq!(net.sent.len(), 1);
        assert!(net.sent[0].contains("\"lost\""));
    }

    #[test]
    fn newer_failure_overwrites_pending() {
        let mut logger = RemoteLogger::new(1000);
        let mut net = FakeCollector::new(false);
        logger.log(LogLevel::Error, "older", "system", 0, &mut net);
        logger.log(LogLevel::Error, "newer", "system", 10, &mut net);

        net.reachable = true;
        logger.retry_pending(&mut net);
        assert_eq!(net.sent.len(), 1);
        assert!(
            net.sent[0].contains("\"newer\""),
            "pending slot must hold only the most recent failure"
        );
    }

    #[test]
    fn payload_shape_and_sanitization() {
        let mut logger = RemoteLogger::new(1000);
        let mut net = FakeCollector::new(true);
        logger.log(
            LogLevel::Warn,
            "bad\u{1}byte\nkept",
            "http",
            42,
            &mut net,
        );
        let v: serde_json::Value = serde_json::from_str(&net.sent[0]).unwrap();
        assert_eq!(v["timestamp"], 42);
        assert_eq!(v["level"], "warn");
        assert_eq!(v["category"], "http");
        assert_eq!(v["message"], "badbyte\nkept");
    }

    #[test]
    fn sanitize_strips_control_bytes() {
        assert_eq!(sanitize("a\u{0}b\u{7}c"), "abc");
        assert_eq!(sanitize("tab\there"), "tab\there");
        assert_eq!(sanitize("quote\"slash\\"), "quote\"slash\\");
    }
}
