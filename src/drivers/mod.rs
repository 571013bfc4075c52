//! Output drivers and hardware initialisation.

pub mod output;
