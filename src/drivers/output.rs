//! One-shot output peripheral initialization and raw write helpers.
//!
//! Configures GPIO directions and the LEDC timer/channels using raw
//! ESP-IDF sys calls. Called once from `main()` before the serve loop
//! starts. On non-espidf targets every write is a no-op.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot output initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

// ── Channel map ───────────────────────────────────────────────

/// Pump GPIOs in LEDC-channel order: pin `PUMP_PWM_GPIOS[n]` drives LEDC
/// channel `n` on timer 0.
pub const PUMP_PWM_GPIOS: [i32; 4] = [
    pins::INFLATE_PUMP_1_GPIO,
    pins::INFLATE_PUMP_2_GPIO,
    pins::EXHAUST_PUMP_1_GPIO,
    pins::EXHAUST_PUMP_2_GPIO,
];

/// Valve GPIOs, plain push-pull outputs.
pub const VALVE_GPIOS: [i32; 2] = [pins::VALVE_1_GPIO, pins::VALVE_2_GPIO];

/// LEDC channel for a pump GPIO, if the pin is one of the pump pins.
pub fn ledc_channel_for(gpio: i32) -> Option<u32> {
    PUMP_PWM_GPIOS
        .iter()
        .position(|&p| p == gpio)
        .map(|i| i as u32)
}

// ── Init ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_outputs() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the serve loop; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_ledc()?;
    }
    info!("hw_init: all outputs configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_outputs() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): output init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for &pin in &VALVE_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin, 0) };
    }
    info!("hw_init: valve GPIOs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: all pump channels (25 kHz, 8-bit).
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::PUMP_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed(ret));
    }

    for (ch, &gpio) in PUMP_PWM_GPIOS.iter().enumerate() {
        let ret = unsafe {
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel: ch as u32,
                timer_sel: ledc_timer_t_LEDC_TIMER_0,
                gpio_num: gpio,
                duty: 0,
                hpoint: 0,
                ..Default::default()
            })
        };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcInitFailed(ret));
        }
    }

    info!("hw_init: LEDC configured (pumps=CH0-3 @ 25kHz)");
    Ok(())
}

// ── Writes ────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty as u32);
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}
