//! TCP adapters — the HTTP listener and the collector log transport.
//!
//! Both sides use `std::net`, which ESP-IDF backs with lwIP BSD sockets,
//! so the same code serves on-device and on the host.  The listener and
//! every accepted connection are non-blocking: the single cooperative loop
//! must keep running deadline scans between reads.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use log::{debug, warn};

use crate::app::ports::LogTransport;
use crate::error::{Error, Result, TransportError};
use crate::http::transport::Transport;

// ───────────────────────────────────────────────────────────────
// Listener
// ───────────────────────────────────────────────────────────────

/// Non-blocking accept loop over the command API port.
pub struct HttpListener {
    listener: TcpListener,
}

impl HttpListener {
    pub fn bind(port: u16) -> Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))
            .map_err(|_| Error::Init("TCP listener bind failed"))?;
        listener
            .set_nonblocking(true)
            .map_err(|_| Error::Init("listener non-blocking mode failed"))?;
        Ok(Self { listener })
    }

    /// Local address, mainly for host tests binding port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.local_addr().ok()
    }

    /// One accept attempt.  `None` when no client is waiting.
    pub fn accept(&self) -> Option<TcpConnection> {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                if stream.set_nonblocking(true).is_err() {
                    warn!("could not set client socket non-blocking, dropping");
                    return None;
                }
                debug!("client connected from {}", peer);
                Some(TcpConnection { stream })
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => None,
            Err(e) => {
                warn!("accept failed: {}", e);
                None
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Connection
// ───────────────────────────────────────────────────────────────

/// One accepted client socket.  Dropping it closes the connection, which
/// is how every response ends (`Connection: close`).
pub struct TcpConnection {
    stream: TcpStream,
}

impl Transport for TcpConnection {
    fn read(&mut self, buf: &mut [u8]) -> std::result::Result<usize, TransportError> {
        match self.stream.read(buf) {
            // A zero-length read on a TCP socket means orderly shutdown.
            Ok(0) => Err(TransportError::Closed),
            Ok(n) => Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(0),
            Err(_) => Err(TransportError::ReadFailed),
        }
    }

    fn write(&mut self, data: &[u8]) -> std::result::Result<(), TransportError> {
        self.stream
            .write_all(data)
            .map_err(|_| TransportError::WriteFailed)
    }

    fn flush(&mut self) -> std::result::Result<(), TransportError> {
        self.stream.flush().map_err(|_| TransportError::WriteFailed)
    }

    fn is_open(&self) -> bool {
        // No portable liveness probe without reading; reads surface Closed.
        true
    }
}

// ───────────────────────────────────────────────────────────────
// Collector transport
// ───────────────────────────────────────────────────────────────

/// Short-lived outbound POST to the log collector.
///
/// Fire-and-forget: the payload is written and the socket dropped without
/// waiting for a response, keeping the worst case at one bounded connect
/// timeout — a send can happen mid-request.
pub struct CollectorTransport {
    addr: SocketAddr,
    connect_timeout: Duration,
}

impl CollectorTransport {
    pub fn new(host: &str, port: u16, connect_timeout_ms: u32) -> Result<Self> {
        let addr = format!("{host}:{port}")
            .parse()
            .map_err(|_| Error::Config("collector address invalid"))?;
        Ok(Self {
            addr,
            connect_timeout: Duration::from_millis(u64::from(connect_timeout_ms)),
        })
    }
}

impl LogTransport for CollectorTransport {
    fn send(&mut self, payload: &str) -> std::result::Result<(), TransportError> {
        let mut stream = TcpStream::connect_timeout(&self.addr, self.connect_timeout)
            .map_err(|_| TransportError::ConnectFailed)?;
        let request = format!(
            "POST /api/arduino-logs HTTP/1.1\r\n\
             Host: {}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            self.addr,
            payload.len(),
            payload
        );
        stream
            .write_all(request.as_bytes())
            .map_err(|_| TransportError::WriteFailed)?;
        stream.flush().map_err(|_| TransportError::WriteFailed)
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
