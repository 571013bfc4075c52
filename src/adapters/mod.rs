//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                       |
//! |------------|--------------|-----------------------------------|
//! | `hardware` | OutputPort   | ESP32 LEDC PWM, GPIO              |
//! | `log_sink` | LogPort      | Collector socket + local logger   |
//! | `tcp`      | Transport    | Accepted API client sockets       |
//! |            | LogTransport | Collector ingest endpoint         |
//! | `time`     | TimePort     | ESP32 system timer                |
//! | `wifi`     | —            | ESP-IDF WiFi soft-AP bring-up     |

pub mod hardware;
pub mod log_sink;
pub mod tcp;
pub mod time;
pub mod wifi;
