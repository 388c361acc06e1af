//! co2mon Hardware Abstraction Layer
//!
//! This crate defines the storage abstraction the configuration layer
//! persists through, plus the board pin names used by the pin map. Chip
//! support stays outside: any flash that implements the
//! `embedded-storage-async` NOR traits can back the configuration store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  co2mon-store (load / save / erase)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  co2mon-hal (this crate - ConfigStorage)│
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  NorFlashStorage<F: NorFlash>           │
//! │  (sequential-storage key/value map)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`storage::ConfigStorage`] - Persistent key/value storage
//! - [`nor::NorFlashStorage`] - Wear-levelled storage over NOR flash
//! - [`pins`] - Wemos D1 mini pin names

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod nor;
pub mod pins;
pub mod storage;

// Re-export key items at crate root for convenience
pub use nor::NorFlashStorage;
pub use storage::{ConfigStorage, StorageError, StorageKey};
