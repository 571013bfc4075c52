//! FishControl Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative serve loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareOutput   RemoteSink      SystemClock   HttpListener   │
//! │  (OutputPort)     (LogPort)       (TimePort)    (Transport)    │
//! │  wifi soft-AP     CollectorTransport (LogTransport)            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  Router · Batch interpreter · Store · Deadlines        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each loop pass: accept-and-serve at most one request, then the deadline
//! scan, then one log-retry attempt, then a short sleep.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod batch;
mod deadline;
mod error;
mod logsink;
mod pins;
mod registry;
mod store;

pub mod app;
mod adapters;
mod drivers;
pub mod http;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{debug, info, warn};

use adapters::hardware::HardwareOutput;
use adapters::log_sink::RemoteSink;
use adapters::tcp::{CollectorTransport, HttpListener};
use adapters::time::SystemClock;
use adapters::wifi::ApCredentials;
use app::ports::{LogPort, TimePort};
use app::service::Controller;
use config::SystemConfig;
use http::reader::{ReadOutcome, RequestReader};
use http::transport::Transport;
use logsink::LogLevel;
use registry::reference_descriptors;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  FishControl v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();

    // ── 2. Output peripherals ─────────────────────────────────
    if let Err(e) = drivers::output::init_outputs() {
        // Output init failure is critical — log and halt.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let mut out = HardwareOutput::new();
    let mut controller = Controller::new(&reference_descriptors(), &mut out);

    // ── 3. WiFi access point ──────────────────────────────────
    let creds = ApCredentials::new(config.ap_ssid.as_str(), config.ap_password.as_str())?;
    #[cfg(target_os = "espidf")]
    let _wifi = {
        let peripherals = esp_idf_svc::hal::peripherals::Peripherals::take()?;
        let sysloop = esp_idf_svc::eventloop::EspSystemEventLoop::take()?;
        let nvs = esp_idf_svc::nvs::EspDefaultNvsPartition::take()?;
        adapters::wifi::start_access_point(peripherals.modem, sysloop, nvs, &creds)?
    };
    #[cfg(not(target_os = "espidf"))]
    adapters::wifi::start_access_point(&creds)?;

    // ── 4. Remote log sink ────────────────────────────────────
    let collector = CollectorTransport::new(
        config.log_host.as_str(),
        config.log_port,
        config.log_connect_timeout_ms,
    )?;
    let mut sink = RemoteSink::new(config.log_min_interval_ms, collector, SystemClock::new());

    // ── 5. HTTP server ────────────────────────────────────────
    let server = HttpListener::bind(config.http_port)?;
    let reader = RequestReader::new(
        config.header_timeout_ms,
        config.body_timeout_ms,
        config.read_poll_sleep_ms,
    );
    let clock = SystemClock::new();

    sink.log(
        LogLevel::Info,
        &format!(
            "system ready, {} device(s), serving on port {}",
            controller.device_count(),
            config.http_port
        ),
        "system",
    );

    // ── 6. Serve loop ─────────────────────────────────────────
    loop {
        if let Some(mut conn) = server.accept() {
            match reader.read_request(&mut conn, &clock) {
                ReadOutcome::Complete(req) => {
                    let resp =
                        controller.handle_request(&req, clock.now_ms(), &mut out, &mut sink);
                    // The client may have gone away after an early disconnect
                    // or body timeout; its commands were applied regardless.
                    if conn.write(&resp).and_then(|()| conn.flush()).is_err() {
                        warn!("response write failed, client gone");
                    }
                }
                ReadOutcome::TimedOut(phase) => {
                    debug!("request abandoned ({phase:?} phase timeout)");
                }
                ReadOutcome::Disconnected => {
                    debug!("client disconnected before request completed");
                }
            }
        }

        // Deadline scan runs every pass, whether or not a request arrived.
        controller.check_deadlines(clock.now_ms(), &mut out, &mut sink);

        // One delivery attempt for a previously failed log send.
        sink.retry_pending();

        clock.sleep_ms(config.loop_sleep_ms);
    }
}
