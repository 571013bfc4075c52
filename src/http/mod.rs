//! Minimal HTTP/1.1 server stack for the command API.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      HTTP Stack                            │
//! │                                                            │
//! │  ┌──────────┐   ┌───────────┐   ┌──────────────────────┐  │
//! │  │ Transport │──▶│  Reader   │──▶│  Router (dispatch)   │  │
//! │  │ (trait)   │   │ (timeout- │   │  → batch interpreter │  │
//! │  └──────────┘   │  budgeted) │   │  → status / CORS /   │  │
//! │                 └───────────┘   │    404 responders    │  │
//! │                                  └──────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deliberately tolerant rather than RFC-strict: the only clients are the
//! fixed companion service and its web UI.  Every response closes the
//! connection — there is no keep-alive.

pub mod reader;
pub mod request;
pub mod response;
pub mod router;
pub mod transport;
