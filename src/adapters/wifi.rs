//! WiFi soft-AP adapter.
//!
//! The controller is its own network: it brings up a WPA2 access point and
//! the companion service joins it.  The AP's gateway address (192.168.4.1
//! on ESP-IDF's default softap netif) is where the HTTP server listens; the
//! collector is expected at the first DHCP lease.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via
//!   `esp_idf_svc::wifi` in AP mode.
//! - **all other targets**: simulation stub for host-side tests; the HTTP
//!   server binds a loopback socket instead.

use log::info;

use crate::error::{Error, Result};

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<()> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(Error::Config("SSID must be 1-32 printable ASCII bytes"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    // WPA2-PSK bounds; an empty password would mean an open AP, which the
    // deployment never runs.
    if password.len() < 8 || password.len() > 64 {
        return Err(Error::Config("password must be 8-64 bytes for WPA2"));
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Soft-AP bring-up
// ───────────────────────────────────────────────────────────────

/// Validated AP credentials, ready for platform bring-up.
pub struct ApCredentials<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
}

impl<'a> ApCredentials<'a> {
    pub fn new(ssid: &'a str, password: &'a str) -> Result<Self> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        Ok(Self { ssid, password })
    }
}

/// Start the access point and keep the driver alive for the process
/// lifetime.  The returned handle must not be dropped while serving.
#[cfg(target_os = "espidf")]
pub fn start_access_point(
    modem: esp_idf_svc::hal::modem::Modem,
    sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
    nvs: esp_idf_svc::nvs::EspDefaultNvsPartition,
    creds: &ApCredentials<'_>,
) -> anyhow::Result<esp_idf_svc::wifi::EspWifi<'static>> {
    use esp_idf_svc::wifi::{AccessPointConfiguration, AuthMethod, Configuration, EspWifi};

    let mut wifi = EspWifi::new(modem, sysloop, Some(nvs))?;
    wifi.set_configuration(&Configuration::AccessPoint(AccessPointConfiguration {
        ssid: creds
            .ssid
            .try_into()
            .map_err(|_| anyhow::anyhow!("SSID too long for driver"))?,
        password: creds
            .password
            .try_into()
            .map_err(|_| anyhow::anyhow!("password too long for driver"))?,
        auth_method: AuthMethod::WPA2Personal,
        channel: 1,
        max_connections: 4,
        ..Default::default()
    }))?;
    wifi.start()?;
    info!("AP '{}' up, serving on 192.168.4.1", creds.ssid);
    Ok(wifi)
}

/// Host simulation: nothing to bring up, the server binds loopback.
#[cfg(not(target_os = "espidf"))]
pub fn start_access_point(creds: &ApCredentials<'_>) -> anyhow::Result<()> {
    info!("AP(sim): '{}' bring-up skipped, using loopback", creds.ssid);
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
