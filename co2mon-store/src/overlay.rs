//! TOML configuration overlay
//!
//! A deployer can change the tunable parts of the factory table without
//! rebuilding the firmware by storing a partial TOML document. Only the
//! keys present in the document are changed.
//!
//! ```toml
//! sensor_count = 1
//!
//! [network]
//! server = "io.adafruit.com"
//! port = 8883
//! username = "alice"
//! api_key = "aio_..."
//! feed_name = "office-co2"
//!
//! [access_point]
//! ssid = "CO2MONITOR"
//! password = "password"
//! timeout_s = 20
//!
//! [timing]
//! data_average_s = 30
//! graph_average_s = 60
//! display_update_ms = 5000
//! warm_up_s = 30
//!
//! [thresholds]
//! co2_high_ppm = 1400.0
//! co2_low_ppm = 800.0
//! co2_integral_max = 2160000.0
//!
//! [leds]
//! count = 5
//! brightness = 100
//! color_order = "grb"
//! speed = "khz800"
//!
//! [debug]
//! graph = true
//! mqtt = true
//! ```
//!
//! Unknown sections and keys are rejected so typos do not go unnoticed.
//! Pin assignments are fixed by the board and cannot be overlaid.

use core::fmt;

use heapless::String;
use serde::Deserialize;

use co2mon_core::config::{
    ColorOrder, ConfigError, CredentialField, LedSpeed, MonitorConfig, API_KEY_LEN,
    FEED_NAME_LEN, MAX_AP_PASS_LEN, MAX_HOST_LEN, MAX_SSID_LEN, USERNAME_LEN,
};

/// TOML parse error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(::toml::de::Error);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ParseError {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", defmt::Display2Format(&self.0))
    }
}

/// `[network]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkOverlay {
    pub server: Option<String<MAX_HOST_LEN>>,
    pub port: Option<u16>,
    pub username: Option<String<USERNAME_LEN>>,
    pub api_key: Option<String<API_KEY_LEN>>,
    pub feed_name: Option<String<FEED_NAME_LEN>>,
}

/// `[access_point]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessPointOverlay {
    pub ssid: Option<String<MAX_SSID_LEN>>,
    pub password: Option<String<MAX_AP_PASS_LEN>>,
    pub timeout_s: Option<u16>,
}

/// `[timing]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingOverlay {
    pub data_average_s: Option<u16>,
    pub graph_average_s: Option<u16>,
    pub display_update_ms: Option<u32>,
    pub warm_up_s: Option<u16>,
}

/// `[thresholds]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOverlay {
    pub co2_high_ppm: Option<f32>,
    pub co2_low_ppm: Option<f32>,
    pub co2_integral_max: Option<f32>,
}

/// `[leds]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedOverlay {
    pub count: Option<u8>,
    pub brightness: Option<u8>,
    pub color_order: Option<ColorOrder>,
    pub speed: Option<LedSpeed>,
}

/// `[debug]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebugOverlay {
    pub graph: Option<bool>,
    pub mqtt: Option<bool>,
    pub encoder: Option<bool>,
    pub co2: Option<bool>,
    pub switch: Option<bool>,
    pub calibrate: Option<bool>,
}

/// Parsed overlay document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverlay {
    pub sensor_count: Option<u8>,
    pub network: Option<NetworkOverlay>,
    pub access_point: Option<AccessPointOverlay>,
    pub timing: Option<TimingOverlay>,
    pub thresholds: Option<ThresholdOverlay>,
    pub leds: Option<LedOverlay>,
    pub debug: Option<DebugOverlay>,
}

/// Parse a TOML overlay document
pub fn parse_overlay(input: &str) -> Result<ConfigOverlay, ParseError> {
    ::toml::from_str(input).map_err(ParseError)
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl ConfigOverlay {
    /// True if the document sets nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the overlay on top of `config`
    ///
    /// The result is validated before it is committed; on error `config`
    /// is left unchanged.
    pub fn apply(&self, config: &mut MonitorConfig) -> Result<(), ConfigError> {
        let mut candidate = config.clone();

        replace(&mut candidate.sensor_count, self.sensor_count);

        if let Some(net) = &self.network {
            replace(&mut candidate.network.server, net.server.clone());
            replace(&mut candidate.network.port, net.port);
            let credentials = candidate.credentials_mut();
            if let Some(v) = &net.username {
                credentials.set(CredentialField::Username, v)?;
            }
            if let Some(v) = &net.api_key {
                credentials.set(CredentialField::ApiKey, v)?;
            }
            if let Some(v) = &net.feed_name {
                credentials.set(CredentialField::FeedName, v)?;
            }
        }

        if let Some(ap) = &self.access_point {
            replace(&mut candidate.access_point.ssid, ap.ssid.clone());
            replace(&mut candidate.access_point.password, ap.password.clone());
            replace(&mut candidate.access_point.timeout_s, ap.timeout_s);
        }

        if let Some(timing) = &self.timing {
            let t = &mut candidate.timing;
            replace(&mut t.data_average_s, timing.data_average_s);
            replace(&mut t.graph_average_s, timing.graph_average_s);
            replace(&mut t.display_update_ms, timing.display_update_ms);
            replace(&mut t.warm_up_s, timing.warm_up_s);
        }

        if let Some(thresholds) = &self.thresholds {
            let t = &mut candidate.thresholds;
            replace(&mut t.co2_high_ppm, thresholds.co2_high_ppm);
            replace(&mut t.co2_low_ppm, thresholds.co2_low_ppm);
            replace(&mut t.co2_integral_max, thresholds.co2_integral_max);
        }

        if let Some(leds) = &self.leds {
            let l = &mut candidate.leds;
            replace(&mut l.count, leds.count);
            replace(&mut l.brightness, leds.brightness);
            replace(&mut l.color_order, leds.color_order);
            replace(&mut l.speed, leds.speed);
        }

        if let Some(debug) = &self.debug {
            let d = &mut candidate.debug;
            replace(&mut d.graph, debug.graph);
            replace(&mut d.mqtt, debug.mqtt);
            replace(&mut d.encoder, debug.encoder);
            replace(&mut d.co2, debug.co2);
            replace(&mut d.switch, debug.switch);
            replace(&mut d.calibrate, debug.calibrate);
        }

        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}
