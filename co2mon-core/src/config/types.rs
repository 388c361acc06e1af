//! Configuration type definitions
//!
//! Network, access point, timing, threshold, and debug settings. Defaults
//! are the factory values the monitor ships with.

use heapless::String;

use super::credentials::CredentialSet;
use super::error::{ConfigError, Interval};

/// Maximum server host name length
pub const MAX_HOST_LEN: usize = 64;

/// Maximum access point SSID length (802.11 limit)
pub const MAX_SSID_LEN: usize = 32;

/// Maximum WPA2 passphrase length
pub const MAX_AP_PASS_LEN: usize = 63;

/// Minimum WPA2 passphrase length
pub const MIN_AP_PASS_LEN: usize = 8;

/// Adafruit IO MQTT broker
pub const DEFAULT_AIO_SERVER: &str = "io.adafruit.com";

/// MQTT over TLS
pub const DEFAULT_AIO_PORT: u16 = 8883;

/// Plain MQTT
pub const INSECURE_MQTT_PORT: u16 = 1883;

/// Cloud telemetry connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkConfig {
    /// MQTT broker host name
    pub server: String<MAX_HOST_LEN>,
    /// MQTT broker port
    pub port: u16,
    /// Provisioned credentials
    pub credentials: CredentialSet,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            server: String::try_from(DEFAULT_AIO_SERVER).unwrap_or_default(),
            port: DEFAULT_AIO_PORT,
            credentials: CredentialSet::default(),
        }
    }
}

impl NetworkConfig {
    /// Whether the configured port is the TLS port
    pub fn uses_tls(&self) -> bool {
        self.port == DEFAULT_AIO_PORT
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        Ok(())
    }
}

/// Provisioning access point settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccessPointConfig {
    pub ssid: String<MAX_SSID_LEN>,
    /// Empty for an open network
    pub password: String<MAX_AP_PASS_LEN>,
    /// Seconds the portal stays up without receiving parameters
    pub timeout_s: u16,
}

impl Default for AccessPointConfig {
    fn default() -> Self {
        Self {
            ssid: String::try_from("CO2MONITOR").unwrap_or_default(),
            password: String::try_from("password").unwrap_or_default(),
            timeout_s: 20,
        }
    }
}

impl AccessPointConfig {
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ssid.is_empty() {
            return Err(ConfigError::EmptyApSsid);
        }
        if !self.is_open() && self.password.len() < MIN_AP_PASS_LEN {
            return Err(ConfigError::InvalidApPassword);
        }
        if self.timeout_s == 0 {
            return Err(ConfigError::ZeroApTimeout);
        }
        Ok(())
    }
}

/// Sampling, publishing, and display intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Averaging window between uploads (seconds)
    pub data_average_s: u16,
    /// Averaging window between graph updates (seconds)
    pub graph_average_s: u16,
    /// Time between reading data and displaying new values (ms)
    pub display_update_ms: u32,
    /// Sensor warm-up before readings are trusted (seconds)
    pub warm_up_s: u16,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            data_average_s: 30,
            graph_average_s: 60,
            display_update_ms: 5000,
            warm_up_s: 30,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_average_s == 0 {
            return Err(ConfigError::ZeroInterval(Interval::DataAverage));
        }
        if self.graph_average_s == 0 {
            return Err(ConfigError::ZeroInterval(Interval::GraphAverage));
        }
        if self.display_update_ms == 0 {
            return Err(ConfigError::ZeroInterval(Interval::DisplayUpdate));
        }
        Ok(())
    }
}

/// CO2 classification thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdConfig {
    /// At or above this the air is classified high (ppm)
    pub co2_high_ppm: f32,
    /// Below this the air is classified good (ppm)
    pub co2_low_ppm: f32,
    /// Exposure ceiling (ppm·s); 1200 ppm for 30 min
    pub co2_integral_max: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            co2_high_ppm: 1400.0,
            co2_low_ppm: 800.0,
            co2_integral_max: 2_160_000.0,
        }
    }
}

impl ThresholdConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.co2_low_ppm)
            || !positive(self.co2_high_ppm)
            || !positive(self.co2_integral_max)
        {
            return Err(ConfigError::InvalidThreshold);
        }
        if self.co2_low_ppm >= self.co2_high_ppm {
            return Err(ConfigError::ThresholdOrder);
        }
        Ok(())
    }
}

/// Per-subsystem verbose logging switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebugFlags {
    pub graph: bool,
    pub mqtt: bool,
    pub encoder: bool,
    pub co2: bool,
    pub switch: bool,
    pub calibrate: bool,
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self {
            graph: true,
            mqtt: true,
            encoder: false,
            co2: true,
            switch: true,
            calibrate: true,
        }
    }
}

impl DebugFlags {
    /// All switches off
    pub const fn quiet() -> Self {
        Self {
            graph: false,
            mqtt: false,
            encoder: false,
            co2: false,
            switch: false,
            calibrate: false,
        }
    }

    /// Number of enabled switches
    pub fn enabled_count(&self) -> usize {
        [
            self.graph,
            self.mqtt,
            self.encoder,
            self.co2,
            self.switch,
            self.calibrate,
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}
