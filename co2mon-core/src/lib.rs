//! Board-agnostic core logic for the CO2 monitor
//!
//! This crate contains everything that does not depend on a specific
//! board or network stack:
//!
//! - The configuration table (network, access point, pins, timing,
//!   thresholds, LEDs, debug flags) and its validation
//! - Bounded credential fields with label-keyed write access
//! - The persisted credential record format
//! - Air-quality logic driven by the thresholds (classification,
//!   exposure integral, warm-up gate, averaging windows)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod air;
pub mod config;
pub mod record;

pub use config::{ConfigError, MonitorConfig};
