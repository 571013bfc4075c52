//! FishControl firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod batch;
pub mod config;
pub mod deadline;
pub mod error;
pub mod http;
pub mod logsink;
pub mod registry;
pub mod store;

pub mod pins;

// The adapter and driver modules compile on every target; the actual
// hardware implementations are guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;
