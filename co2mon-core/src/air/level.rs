//! CO2 level classification

use smart_leds::{brightness, RGB8};

use crate::config::{LedStripConfig, ThresholdConfig};

/// Classified CO2 concentration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Co2Level {
    /// Below the low threshold
    Good,
    /// Between the low and high thresholds
    Elevated,
    /// At or above the high threshold
    High,
}

impl Co2Level {
    /// Classify a reading in ppm
    ///
    /// Returns `None` for a non-finite reading, e.g. from a failed sensor.
    pub fn classify(ppm: f32, thresholds: &ThresholdConfig) -> Option<Self> {
        if !ppm.is_finite() {
            return None;
        }
        let level = if ppm >= thresholds.co2_high_ppm {
            Co2Level::High
        } else if ppm >= thresholds.co2_low_ppm {
            Co2Level::Elevated
        } else {
            Co2Level::Good
        };
        Some(level)
    }

    /// Full-brightness indicator colour
    pub const fn color(self) -> RGB8 {
        match self {
            Co2Level::Good => RGB8 { r: 0, g: 255, b: 0 },
            Co2Level::Elevated => RGB8 { r: 255, g: 140, b: 0 },
            Co2Level::High => RGB8 { r: 255, g: 0, b: 0 },
        }
    }

    /// Colours for every LED on the strip, scaled by the strip brightness
    pub fn strip_colors(self, leds: &LedStripConfig) -> impl Iterator<Item = RGB8> {
        brightness(
            core::iter::repeat(self.color()).take(leds.count as usize),
            leds.brightness,
        )
    }
}
