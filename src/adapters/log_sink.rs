//! Remote sink adapter — binds the rate-limited logger to a transport and
//! clock, and mirrors every event to the local logger.
//!
//! The domain core logs through [`LogPort`] without knowing about sockets
//! or timestamps; this adapter supplies both.  Local mirroring goes to the
//! ESP-IDF logger (UART / USB-CDC in production, stderr on the host), so
//! events remain visible even when the collector is unreachable.

use log::{debug, error, info, warn};

use crate::app::ports::{LogPort, LogTransport, TimePort};
use crate::logsink::{LogLevel, RemoteLogger};

/// [`LogPort`] implementation over a collector transport and system clock.
pub struct RemoteSink<N: LogTransport, C: TimePort> {
    logger: RemoteLogger,
    net: N,
    clock: C,
}

impl<N: LogTransport, C: TimePort> RemoteSink<N, C> {
    pub fn new(min_interval_ms: u32, net: N, clock: C) -> Self {
        Self {
            logger: RemoteLogger::new(min_interval_ms),
            net,
            clock,
        }
    }

    /// One retry attempt for a previously failed send.  Called once per
    /// outer-loop pass.
    pub fn retry_pending(&mut self) {
        self.logger.retry_pending(&mut self.net);
    }

    pub fn has_pending(&self) -> bool {
        self.logger.has_pending()
    }

    fn mirror(level: LogLevel, message: &str, category: &str) {
        match level {
            LogLevel::Error => error!("[{}] {}", category, message),
            LogLevel::Warn => warn!("[{}] {}", category, message),
            LogLevel::Info => info!("[{}] {}", category, message),
            LogLevel::Debug => debug!("[{}] {}", category, message),
        }
    }
}

impl<N: LogTransport, C: TimePort> LogPort for RemoteSink<N, C> {
    fn log(&mut self, level: LogLevel, message: &str, category: &str) {
        Self::mirror(level, message, category);
        let now = self.clock.now_ms();
        self.logger.log(level, message, category, now, &mut self.net);
    }
}
