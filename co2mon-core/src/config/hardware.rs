//! Hardware configuration types
//!
//! Pin assignments for the peripherals on the monitor board and the
//! addressable LED strip settings.

use co2mon_hal::pins::{self, D1, D2, D3, D4, D5, D6, D7, D8};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Pin configuration with optional pull-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// ESP8266 GPIO number
    pub pin: u8,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self { pin, pull_up: true }
    }

    /// Board silkscreen label, if the GPIO is broken out
    pub fn label(&self) -> Option<&'static str> {
        pins::board_label(self.pin)
    }
}

/// Physical bus a pin belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusRole {
    /// Software serial link to the CO2 sensor
    SoftSerial,
    /// Software I2C for auxiliary sensors
    SensorBus,
    /// Rotary encoder with push button
    Encoder,
    /// OLED display I2C
    Display,
    /// Addressable LED data line
    LedStrip,
}

impl BusRole {
    /// Whether two roles may drive the same pin
    ///
    /// The sensor bus and the encoder are wired to the same two GPIOs and
    /// are never active at the same time.
    pub const fn may_share_with(self, other: BusRole) -> bool {
        matches!(
            (self, other),
            (BusRole::SensorBus, BusRole::Encoder) | (BusRole::Encoder, BusRole::SensorBus)
        )
    }
}

/// Serial TX/RX pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialPins {
    pub tx: PinConfig,
    pub rx: PinConfig,
}

/// I2C data/clock pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cPins {
    pub sda: PinConfig,
    pub scl: PinConfig,
}

/// Rotary encoder quadrature inputs and push switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderPins {
    pub a: PinConfig,
    pub b: PinConfig,
    pub push: PinConfig,
}

/// A single pin claimed by a bus signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub role: BusRole,
    /// Signal name, e.g. "sda"
    pub signal: &'static str,
    pub pin: PinConfig,
}

/// Number of pins in a [`PinMap`]
pub const PIN_COUNT: usize = 10;

/// Board pin map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    pub soft_serial: SerialPins,
    pub sensor_bus: I2cPins,
    pub encoder: EncoderPins,
    pub display: I2cPins,
    pub led_data: PinConfig,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            soft_serial: SerialPins {
                tx: PinConfig::new(D1),
                rx: PinConfig::new(D2),
            },
            sensor_bus: I2cPins {
                sda: PinConfig::with_pullup(D7),
                scl: PinConfig::with_pullup(D6),
            },
            encoder: EncoderPins {
                a: PinConfig::with_pullup(D7),
                b: PinConfig::with_pullup(D6),
                push: PinConfig::new(D8),
            },
            display: I2cPins {
                sda: PinConfig::with_pullup(D5),
                scl: PinConfig::with_pullup(D4),
            },
            led_data: PinConfig::new(D3),
        }
    }
}

impl PinMap {
    /// Every pin with the role and signal that claims it
    pub fn assignments(&self) -> [PinAssignment; PIN_COUNT] {
        let at = |role, signal, pin| PinAssignment { role, signal, pin };
        [
            at(BusRole::SoftSerial, "tx", self.soft_serial.tx),
            at(BusRole::SoftSerial, "rx", self.soft_serial.rx),
            at(BusRole::SensorBus, "sda", self.sensor_bus.sda),
            at(BusRole::SensorBus, "scl", self.sensor_bus.scl),
            at(BusRole::Encoder, "a", self.encoder.a),
            at(BusRole::Encoder, "b", self.encoder.b),
            at(BusRole::Encoder, "push", self.encoder.push),
            at(BusRole::Display, "sda", self.display.sda),
            at(BusRole::Display, "scl", self.display.scl),
            at(BusRole::LedStrip, "data", self.led_data),
        ]
    }

    /// Pins claimed by one role
    pub fn pins_for(&self, role: BusRole) -> impl Iterator<Item = PinAssignment> {
        self.assignments().into_iter().filter(move |a| a.role == role)
    }

    /// Check that every pin is usable, has any pull-up it asks for, and
    /// that no two signals collide
    pub fn validate(&self) -> Result<(), ConfigError> {
        let assignments = self.assignments();

        for a in &assignments {
            if !pins::is_usable_gpio(a.pin.pin) {
                return Err(ConfigError::InvalidPin {
                    role: a.role,
                    pin: a.pin,
                });
            }
            if a.pin.pull_up && !pins::has_pullup(a.pin.pin) {
                return Err(ConfigError::NoPullUp {
                    role: a.role,
                    pin: a.pin,
                });
            }
        }

        for (i, first) in assignments.iter().enumerate() {
            for second in &assignments[i + 1..] {
                if first.pin.pin != second.pin.pin {
                    continue;
                }
                if first.role == second.role {
                    return Err(ConfigError::DuplicatePin {
                        role: first.role,
                        pin: second.pin,
                    });
                }
                if !first.role.may_share_with(second.role) {
                    return Err(ConfigError::PinConflict {
                        first: first.role,
                        second: second.role,
                        pin: second.pin,
                    });
                }
            }
        }

        Ok(())
    }
}

/// LED colour byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum ColorOrder {
    Rgb,
    #[default]
    Grb,
}

/// LED data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum LedSpeed {
    Khz400,
    #[default]
    Khz800,
}

/// Addressable LED strip configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedStripConfig {
    /// Number of LEDs on the strip
    pub count: u8,
    /// Global brightness (0-255)
    pub brightness: u8,
    pub color_order: ColorOrder,
    pub speed: LedSpeed,
}

impl Default for LedStripConfig {
    fn default() -> Self {
        Self {
            count: 5,
            brightness: 100,
            color_order: ColorOrder::Grb,
            speed: LedSpeed::Khz800,
        }
    }
}

impl LedStripConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidLedCount);
        }
        Ok(())
    }
}
