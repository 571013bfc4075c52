//! System configuration parameters
//!
//! All tunable parameters for the FishControl controller: access-point
//! credentials, HTTP server timeout budgets, and the remote log collector
//! endpoint.  Defaults match the reference deployment.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- WiFi access point ---
    /// Soft-AP SSID advertised to the companion service.
    pub ap_ssid: heapless::String<32>,
    /// Soft-AP WPA2 passphrase.
    pub ap_password: heapless::String<64>,

    // --- HTTP server ---
    /// TCP port the command API listens on.
    pub http_port: u16,
    /// Budget for reading the request head, from first accept (milliseconds).
    pub header_timeout_ms: u32,
    /// Budget for reading the request body, from header completion (milliseconds).
    pub body_timeout_ms: u32,
    /// Sleep between body-read polls while waiting for bytes (milliseconds).
    pub read_poll_sleep_ms: u32,

    // --- Outer loop ---
    /// Sleep at the end of each outer loop pass (milliseconds).
    pub loop_sleep_ms: u32,
    /// Declared deadline-scan interval (milliseconds).  The scan actually
    /// runs every loop pass regardless; this value is retained for
    /// compatibility with the reference deployment's configuration.
    pub status_check_interval_ms: u32,

    // --- Remote log collector ---
    /// Collector host on the AP subnet.
    pub log_host: heapless::String<48>,
    /// Collector TCP port.
    pub log_port: u16,
    /// Minimum interval between non-urgent (info/debug) log sends (milliseconds).
    pub log_min_interval_ms: u32,
    /// Connect timeout for the log transport.  Must stay well under the
    /// body-read budget so logging inside a request can never starve it.
    pub log_connect_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // WiFi AP
            ap_ssid: heapless::String::try_from("FishControl_WiFi").unwrap_or_default(),
            ap_password: heapless::String::try_from("fish2025").unwrap_or_default(),

            // HTTP server
            http_port: 80,
            header_timeout_ms: 3000,
            body_timeout_ms: 2000,
            read_poll_sleep_ms: 1,

            // Outer loop
            loop_sleep_ms: 10,
            status_check_interval_ms: 1000,

            // Log collector
            log_host: heapless::String::try_from("192.168.4.2").unwrap_or_default(),
            log_port: 8080,
            log_min_interval_ms: 1000,
            log_connect_timeout_ms: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(!c.ap_ssid.is_empty());
        assert!(c.header_timeout_ms > 0);
        assert!(c.body_timeout_ms > 0);
        assert!(c.log_min_interval_ms > 0);
        assert!(c.loop_sleep_ms > 0);
    }

    #[test]
    fn log_connect_timeout_below_body_budget() {
        let c = SystemConfig::default();
        assert!(
            c.log_connect_timeout_ms * 4 <= c.body_timeout_ms,
            "log connect timeout must stay small relative to the body budget"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.ap_ssid, c2.ap_ssid);
        assert_eq!(c.header_timeout_ms, c2.header_timeout_ms);
        assert_eq!(c.log_port, c2.log_port);
    }
}
