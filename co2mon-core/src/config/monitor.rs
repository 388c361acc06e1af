//! Complete monitor configuration

use super::credentials::CredentialSet;
use super::error::ConfigError;
use super::hardware::{LedStripConfig, PinMap};
use super::types::{AccessPointConfig, DebugFlags, NetworkConfig, ThresholdConfig, TimingConfig};

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Complete monitor configuration
///
/// This is the top-level configuration structure. It is built once at
/// startup, validated, and then passed by reference to the sensor,
/// display, and publishing loops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    pub network: NetworkConfig,
    pub access_point: AccessPointConfig,
    pub pins: PinMap,
    pub leds: LedStripConfig,
    pub timing: TimingConfig,
    pub thresholds: ThresholdConfig,
    pub debug: DebugFlags,
    /// Number of CO2 sensors fitted
    pub sensor_count: u8,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            network: NetworkConfig::default(),
            access_point: AccessPointConfig::default(),
            pins: PinMap::default(),
            leds: LedStripConfig::default(),
            timing: TimingConfig::default(),
            thresholds: ThresholdConfig::default(),
            debug: DebugFlags::default(),
            sensor_count: 1,
        }
    }
}

impl MonitorConfig {
    /// The factory configuration table
    pub fn factory() -> Self {
        Self::default()
    }

    /// Provisioned credentials
    pub fn credentials(&self) -> &CredentialSet {
        &self.network.credentials
    }

    /// Mutable access for the provisioning flow
    pub fn credentials_mut(&mut self) -> &mut CredentialSet {
        &mut self.network.credentials
    }

    /// Check every invariant, returning the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.network.validate()?;
        self.access_point.validate()?;
        self.pins.validate()?;
        self.leds.validate()?;
        self.timing.validate()?;
        self.thresholds.validate()?;
        if self.sensor_count == 0 {
            return Err(ConfigError::NoSensors);
        }
        Ok(())
    }
}
