//! CO2 exposure integral
//!
//! Tracks accumulated exposure in ppm·s during an episode of elevated
//! CO2. An episode starts when a reading reaches the low threshold and
//! ends when a reading drops back below it, which clears the integral.

use crate::config::ThresholdConfig;

/// Accumulated CO2 exposure
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExposureIntegral {
    /// Accumulated exposure (ppm·s)
    total: f32,
    /// Episode start threshold (ppm)
    low_ppm: f32,
    /// Exposure ceiling (ppm·s)
    max: f32,
}

impl ExposureIntegral {
    /// Create an integral using the configured low threshold and ceiling
    pub fn new(thresholds: &ThresholdConfig) -> Self {
        Self {
            total: 0.0,
            low_ppm: thresholds.co2_low_ppm,
            max: thresholds.co2_integral_max,
        }
    }

    /// Add a reading held for `dt_ms` milliseconds
    pub fn accumulate(&mut self, ppm: f32, dt_ms: u32) {
        if !ppm.is_finite() || ppm < self.low_ppm {
            self.total = 0.0;
            return;
        }
        self.total += ppm * (dt_ms as f32 / 1000.0);
    }

    /// Accumulated exposure (ppm·s)
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Fraction of the ceiling reached, clamped to 0.0..=1.0
    pub fn fraction(&self) -> f32 {
        (self.total / self.max).clamp(0.0, 1.0)
    }

    /// Whether the exposure ceiling has been reached
    pub fn is_exceeded(&self) -> bool {
        self.total >= self.max
    }

    /// Clear the accumulated exposure
    pub fn reset(&mut self) {
        self.total = 0.0;
    }
}
