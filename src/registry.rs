//! Actuator registry — the fixed table of controllable outputs.
//!
//! Each entry pairs a stable external name with the output channel it
//! drives and the capability that decides which commands it accepts.
//! The table is static after initialization; `lookup` has no side effects.

use heapless::Vec;
use log::info;

use crate::app::ports::OutputPort;
use crate::pins;

/// Upper bound on registered actuators (stack-allocated table).
pub const MAX_ACTUATORS: usize = 8;

/// What kind of write an actuator's output stage accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Graded output: a 0–100 % command mapped onto an 8-bit PWM duty.
    Proportional,
    /// On/off output: any non-zero command drives the pin HIGH.
    Binary,
}

/// One controllable output.  Immutable after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actuator {
    /// Stable external identifier, unique within the registry.
    pub name: &'static str,
    /// Opaque output-channel identity (GPIO number on the reference board).
    pub channel: i32,
    pub capability: Capability,
}

/// Fixed-size table of actuators, scanned in registration order.
pub struct ActuatorRegistry {
    actuators: Vec<Actuator, MAX_ACTUATORS>,
}

impl ActuatorRegistry {
    /// Build a registry from descriptors and drive every output to its
    /// safe/off level.
    pub fn new(descriptors: &[Actuator], out: &mut impl OutputPort) -> Self {
        let mut actuators = Vec::new();
        for a in descriptors {
            // Table capacity is a board-level constant; overflow here means
            // the descriptor list itself is wrong.
            if actuators.push(*a).is_err() {
                log::warn!("registry full, dropping '{}'", a.name);
                continue;
            }
            match a.capability {
                Capability::Proportional => out.write_pwm(a.channel, 0),
                Capability::Binary => out.write_digital(a.channel, false),
            }
            info!(
                "device {} (pin {}) initialized - {} mode",
                a.name,
                a.channel,
                match a.capability {
                    Capability::Proportional => "PWM",
                    Capability::Binary => "digital",
                }
            );
        }
        Self { actuators }
    }

    /// Find an actuator by its external name along with its registration
    /// index (the index keys the state table).
    pub fn lookup(&self, name: &str) -> Option<(usize, &Actuator)> {
        self.actuators
            .iter()
            .enumerate()
            .find(|(_, a)| a.name == name)
    }

    pub fn get(&self, idx: usize) -> Option<&Actuator> {
        self.actuators.get(idx)
    }

    pub fn len(&self) -> usize {
        self.actuators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actuators.is_empty()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Actuator)> {
        self.actuators.iter().enumerate()
    }
}

/// The six devices of the reference deployment.
pub fn reference_descriptors() -> [Actuator; 6] {
    [
        Actuator {
            name: "inflate_pump_1",
            channel: pins::INFLATE_PUMP_1_GPIO,
            capability: Capability::Proportional,
        },
        Actuator {
            name: "inflate_pump_2",
            channel: pins::INFLATE_PUMP_2_GPIO,
            capability: Capability::Proportional,
        },
        Actuator {
            name: "exhaust_pump_1",
            channel: pins::EXHAUST_PUMP_1_GPIO,
            capability: Capability::Proportional,
        },
        Actuator {
            name: "exhaust_pump_2",
            channel: pins::EXHAUST_PUMP_2_GPIO,
            capability: Capability::Proportional,
        },
        Actuator {
            name: "valve_1",
            channel: pins::VALVE_1_GPIO,
            capability: Capability::Binary,
        },
        Actuator {
            name: "valve_2",
            channel: pins::VALVE_2_GPIO,
            capability: Capability::Binary,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::OutputPort;

    struct RecordingOutput {
        writes: std::vec::Vec<(i32, u16)>,
    }

    impl OutputPort for RecordingOutput {
        fn write_pwm(&mut self, channel: i32, duty: u8) {
            self.writes.push((channel, duty as u16));
        }
        fn write_digital(&mut self, channel: i32, high: bool) {
            self.writes.push((channel, u16::from(high)));
        }
    }

    #[test]
    fn init_drives_every_output_off() {
        let mut out = RecordingOutput { writes: vec![] };
        let reg = ActuatorRegistry::new(&reference_descriptors(), &mut out);
        assert_eq!(reg.len(), 6);
        assert_eq!(out.writes.len(), 6);
        assert!(out.writes.iter().all(|&(_, v)| v == 0));
    }

    #[test]
    fn lookup_by_name() {
        let mut out = RecordingOutput { writes: vec![] };
        let reg = ActuatorRegistry::new(&reference_descriptors(), &mut out);
        let (idx, a) = reg.lookup("exhaust_pump_1").unwrap();
        assert_eq!(idx, 2);
        assert_eq!(a.channel, pins::EXHAUST_PUMP_1_GPIO);
        assert_eq!(a.capability, Capability::Proportional);
        assert!(reg.lookup("no_such_device").is_none());
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut out = RecordingOutput { writes: vec![] };
        let reg = ActuatorRegistry::new(&reference_descriptors(), &mut out);
        let names: std::vec::Vec<&str> = reg.iter().map(|(_, a)| a.name).collect();
        assert_eq!(
            names,
            [
                "inflate_pump_1",
                "inflate_pump_2",
                "exhaust_pump_1",
                "exhaust_pump_2",
                "valve_1",
                "valve_2"
            ]
        );
    }
}
