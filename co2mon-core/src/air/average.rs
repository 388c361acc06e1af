//! Time-window averaging
//!
//! Uploads and graph points are the mean of all readings taken during a
//! fixed window (`data_average_s` and `graph_average_s`).

use crate::config::TimingConfig;

/// Mean of readings over a fixed time window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowAverage {
    window_ms: u32,
    elapsed_ms: u32,
    sum: f32,
    count: u32,
}

impl WindowAverage {
    pub fn new(window_s: u16) -> Self {
        Self {
            window_ms: window_s as u32 * 1000,
            elapsed_ms: 0,
            sum: 0.0,
            count: 0,
        }
    }

    /// Window between uploads
    pub fn for_uploads(timing: &TimingConfig) -> Self {
        Self::new(timing.data_average_s)
    }

    /// Window between graph points
    pub fn for_graph(timing: &TimingConfig) -> Self {
        Self::new(timing.graph_average_s)
    }

    /// Add a reading taken `dt_ms` after the previous one
    ///
    /// Returns the window mean once the window has elapsed and starts a
    /// new window. Time past the window boundary is carried into the new
    /// window so the cadence does not drift. Non-finite readings only
    /// advance time.
    pub fn push(&mut self, value: f32, dt_ms: u32) -> Option<f32> {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if value.is_finite() {
            self.sum += value;
            self.count += 1;
        }

        if self.elapsed_ms < self.window_ms {
            return None;
        }

        let mean = (self.count > 0).then(|| self.sum / self.count as f32);
        self.elapsed_ms = self.elapsed_ms.checked_rem(self.window_ms).unwrap_or(0);
        self.sum = 0.0;
        self.count = 0;
        mean
    }

    /// Readings collected in the current window
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Drop the current window
    pub fn clear(&mut self) {
        self.elapsed_ms = 0;
        self.sum = 0.0;
        self.count = 0;
    }
}
