//! Hardware adapter — bridges real outputs to the domain port traits.
//!
//! Implements [`OutputPort`] over the LEDC/GPIO write helpers in
//! [`crate::drivers::output`].  This is the only module in the system that
//! routes writes to actual pins.  On non-espidf targets the underlying
//! helpers are no-op simulation stubs.

use log::warn;

use crate::app::ports::OutputPort;
use crate::drivers::output;

/// Concrete adapter mapping registry channels (GPIO numbers) onto the
/// configured LEDC channels and plain GPIO writes.
pub struct HardwareOutput;

impl HardwareOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HardwareOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPort for HardwareOutput {
    fn write_pwm(&mut self, channel: i32, duty: u8) {
        match output::ledc_channel_for(channel) {
            Some(ledc_ch) => output::ledc_set(ledc_ch, duty),
            // Registry and pin map disagree; the write is dropped rather
            // than aimed at an unconfigured channel.
            None => warn!("no LEDC channel for GPIO {}, PWM write dropped", channel),
        }
    }

    fn write_digital(&mut self, channel: i32, high: bool) {
        output::gpio_write(channel, high);
    }
}
