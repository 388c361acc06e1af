//! Air-quality logic
//!
//! Consumers of the threshold and timing configuration: reading
//! classification with LED colours, exposure integration, the sensor
//! warm-up gate, and averaging windows for uploads and the graph.

pub mod average;
pub mod exposure;
pub mod level;
pub mod warmup;

pub use average::WindowAverage;
pub use exposure::ExposureIntegral;
pub use level::Co2Level;
pub use warmup::WarmUp;
