//! GPIO / peripheral pin assignments for the FishControl main board.
//!
//! Single source of truth — the registry and output driver reference this
//! module rather than hard-coding pin numbers.  Change a pin here and it
//! propagates everywhere.

// ---------------------------------------------------------------------------
// Air pumps (PWM speed control via LEDC)
// ---------------------------------------------------------------------------

/// Inflate pump 1 — LEDC PWM.
pub const INFLATE_PUMP_1_GPIO: i32 = 5;
/// Inflate pump 2 — LEDC PWM.
pub const INFLATE_PUMP_2_GPIO: i32 = 6;
/// Exhaust pump 1 — LEDC PWM.
pub const EXHAUST_PUMP_1_GPIO: i32 = 10;
/// Exhaust pump 2 — LEDC PWM.
pub const EXHAUST_PUMP_2_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Solenoid valves (digital on/off)
// ---------------------------------------------------------------------------

/// Valve 1 — digital output, HIGH = open.
pub const VALVE_1_GPIO: i32 = 2;
/// Valve 2 — digital output, HIGH = open.
pub const VALVE_2_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the pump motors (25 kHz — inaudible).
pub const PUMP_PWM_FREQ_HZ: u32 = 25_000;
