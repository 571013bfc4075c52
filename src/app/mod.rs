//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the controller: request
//! dispatch, actuator state tracking, and deadline-driven auto-revert.
//! All interaction with hardware and sockets happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod ports;
pub mod service;
