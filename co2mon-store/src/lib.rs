//! Configuration persistence for the CO2 monitor
//!
//! Loads the monitor configuration at startup by layering, on top of the
//! factory table:
//!
//! 1. A deployer TOML overlay (tunable timing, thresholds, LEDs, network)
//! 2. The provisioned credential record
//!
//! and writes both back when the provisioning flow or a deployer changes
//! them. Storage goes through [`co2mon_hal::ConfigStorage`].
//!
//! The crate is `no_std` but TOML parsing allocates, so the firmware must
//! provide a global allocator.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod loader;
pub mod overlay;

pub use loader::{ConfigStore, StoreError};
pub use overlay::{parse_overlay, ConfigOverlay, ParseError};
