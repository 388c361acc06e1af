//! Sensor warm-up gate

use crate::config::TimingConfig;

/// Rejects readings until the sensor has warmed up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WarmUp {
    required_ms: u32,
    elapsed_ms: u32,
}

impl WarmUp {
    /// Gate using the configured warm-up time
    pub fn new(timing: &TimingConfig) -> Self {
        Self::from_seconds(timing.warm_up_s)
    }

    pub fn from_seconds(seconds: u16) -> Self {
        Self {
            required_ms: seconds as u32 * 1000,
            elapsed_ms: 0,
        }
    }

    /// Update time tracking
    pub fn advance(&mut self, delta_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
    }

    pub fn is_warm(&self) -> bool {
        self.elapsed_ms >= self.required_ms
    }

    /// Whole seconds left, rounded up (for the countdown display)
    pub fn remaining_s(&self) -> u16 {
        let remaining_ms = self.required_ms.saturating_sub(self.elapsed_ms);
        remaining_ms.div_ceil(1000) as u16
    }

    /// Pass a reading through once warm
    pub fn accept<T>(&self, reading: T) -> Option<T> {
        self.is_warm().then_some(reading)
    }

    /// Start warming up again, e.g. after a sensor reset
    pub fn restart(&mut self) {
        self.elapsed_ms = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_opens_after_warm_up() {
        let mut gate = WarmUp::new(&TimingConfig::default());
        assert!(!gate.is_warm());
        assert_eq!(gate.remaining_s(), 30);
        assert_eq!(gate.accept(612.0), None);

        gate.advance(29_500);
        assert_eq!(gate.remaining_s(), 1);
        assert!(!gate.is_warm());

        gate.advance(500);
        assert!(gate.is_warm());
        assert_eq!(gate.remaining_s(), 0);
        assert_eq!(gate.accept(612.0), Some(612.0));
    }

    #[test]
    fn test_zero_warm_up_is_immediately_warm() {
        let gate = WarmUp::from_seconds(0);
        assert!(gate.is_warm());
        assert_eq!(gate.accept(1u16), Some(1));
    }

    #[test]
    fn test_restart_and_saturation() {
        let mut gate = WarmUp::from_seconds(10);
        gate.advance(u32::MAX);
        gate.advance(1000);
        assert!(gate.is_warm());

        gate.restart();
        assert!(!gate.is_warm());
        assert_eq!(gate.remaining_s(), 10);
    }
}
