//! Unified error types for the FishControl firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level control loop's error handling uniform.
//! All variants are `Copy` so they can be cheaply passed across the router and
//! batch interpreter without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A single device command could not be applied.
    Command(CommandError),
    /// An inbound HTTP request could not be read or parsed.
    Http(HttpError),
    /// A socket-level operation failed.
    Transport(TransportError),
    /// Peripheral or network initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Per-command errors
// ---------------------------------------------------------------------------

/// Failures scoped to one command within a batch.  They never abort the
/// batch: the interpreter logs them, skips the command, and continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Translated device name has no registry entry.
    UnknownDevice,
    /// The action is valid but the target actuator lacks the capability
    /// (e.g. a power command against a binary valve).
    UnsupportedAction,
    /// The action string maps to nothing the controller understands.
    UnknownAction,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDevice => write!(f, "unknown device"),
            Self::UnsupportedAction => write!(f, "unsupported action for capability"),
            Self::UnknownAction => write!(f, "unknown action"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// HTTP request errors
// ---------------------------------------------------------------------------

/// Which read phase a timeout occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPhase {
    Headers,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpError {
    /// Request body contained no `{` — nothing to hand to the JSON parser.
    NoJsonBody,
    /// The JSON batch failed to deserialize (surfaced to the client as 400).
    BatchParse,
    /// A read-phase timeout budget expired before the phase completed.
    Timeout(ReadPhase),
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoJsonBody => write!(f, "no JSON body found"),
            Self::BatchParse => write!(f, "batch JSON parse failed"),
            Self::Timeout(ReadPhase::Headers) => write!(f, "header read timed out"),
            Self::Timeout(ReadPhase::Body) => write!(f, "body read timed out"),
        }
    }
}

impl From<HttpError> for Error {
    fn from(e: HttpError) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Outbound connection to the log collector could not be established.
    ConnectFailed,
    /// A socket write failed mid-response.
    WriteFailed,
    /// A socket read returned a hard error.
    ReadFailed,
    /// The peer closed the connection.
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "connect failed"),
            Self::WriteFailed => write!(f, "write failed"),
            Self::ReadFailed => write!(f, "read failed"),
            Self::Closed => write!(f, "connection closed"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
