//! Transport abstraction — one accepted client connection as a byte stream.
//!
//! The underlying WiFi stack delivers data incrementally and reads must not
//! block: a `read` that finds nothing returns `Ok(0)` and the caller polls
//! again within its timeout budget.  Peer disconnect is a distinct,
//! typed condition (`TransportError::Closed`), never an empty read.

use crate::error::TransportError;

/// Byte-oriented client connection.
pub trait Transport {
    /// Read up to `buf.len()` bytes.  `Ok(0)` means no data is available
    /// *yet*; a closed peer yields `Err(TransportError::Closed)`.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;

    /// Write all of `data`.
    fn write(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), TransportError>;

    /// Whether the connection is still open from our side's perspective.
    fn is_open(&self) -> bool;
}
