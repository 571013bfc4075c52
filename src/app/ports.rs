//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (output driver, sockets, clock) implement these traits.
//! The domain core consumes them via generics, so it never touches hardware
//! or `std::net` directly and the whole request→apply→revert path runs under
//! test with mocks.

use crate::error::TransportError;
use crate::logsink::LogLevel;

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → pins)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the abstract actuator-write capability.
///
/// `channel` is the opaque identity from the registry (a GPIO number on the
/// reference board).  Writes are fire-and-forget: the output stage has no
/// readback, so the state store is the single source of truth for the last
/// commanded level.
pub trait OutputPort {
    /// Drive a proportional channel with an 8-bit duty (0 = off).
    fn write_pwm(&mut self, channel: i32, duty: u8);

    /// Drive a binary channel HIGH or LOW.
    fn write_digital(&mut self, channel: i32, high: bool);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: domain → monotonic clock)
// ───────────────────────────────────────────────────────────────

/// Monotonic clock plus cooperative yielding.
///
/// All deadlines and timeout budgets in the firmware are expressed as
/// millisecond ticks from this port, which makes every timing contract
/// testable with a mock clock that advances on `sleep_ms`.
pub trait TimePort {
    /// Milliseconds since boot (monotonic).
    fn now_ms(&self) -> u64;

    /// Busy-wait replacement: yield for `ms` milliseconds.
    fn sleep_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Log transport port (driven adapter: domain → collector socket)
// ───────────────────────────────────────────────────────────────

/// One-shot outbound delivery of a serialized log payload.
///
/// Implementations open a short-lived connection to the collector, post the
/// payload, and close.  The connect timeout must be bounded well below the
/// HTTP body-read budget — a `log` call can happen mid-request.
pub trait LogTransport {
    fn send(&mut self, payload: &str) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Log port (driven adapter: domain → remote log sink)
// ───────────────────────────────────────────────────────────────

/// Structured logging seam consumed by the state store, batch interpreter,
/// and router.  The production adapter bundles the rate-limited remote
/// logger with its transport and clock; emission is best-effort and must
/// never fail the caller.
pub trait LogPort {
    fn log(&mut self, level: LogLevel, message: &str, category: &str);
}

/// A sink that drops everything.  Useful where a code path must not log
/// (e.g. registry bring-up before the network exists) and in tests.
pub struct NullLogPort;

impl LogPort for NullLogPort {
    fn log(&mut self, _level: LogLevel, _message: &str, _category: &str) {}
}
