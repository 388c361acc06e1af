//! Configuration types
//!
//! The monitor's configuration table. A single [`MonitorConfig`] is built
//! at startup and handed to the sensor, display, and publishing loops by
//! reference.

pub mod credentials;
pub mod error;
pub mod hardware;
pub mod monitor;
pub mod types;

pub use credentials::*;
pub use error::*;
pub use hardware::*;
pub use monitor::*;
pub use types::*;
