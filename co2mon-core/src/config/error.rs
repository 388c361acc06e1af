//! Configuration errors

use super::credentials::CredentialField;
use super::hardware::{BusRole, PinConfig};

/// Timing interval that must be non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interval {
    DataAverage,
    GraphAverage,
    DisplayUpdate,
}

/// Configuration validation and write errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Value does not fit in the credential field
    TooLong {
        field: CredentialField,
        capacity: usize,
    },
    /// No credential field is registered under the label
    UnknownLabel,
    /// Pin is not a usable GPIO on the board
    InvalidPin { role: BusRole, pin: PinConfig },
    /// Pull-up requested on a GPIO without one
    NoPullUp { role: BusRole, pin: PinConfig },
    /// Same pin used twice within one bus role
    DuplicatePin { role: BusRole, pin: PinConfig },
    /// Same pin claimed by two roles that cannot share it
    PinConflict {
        first: BusRole,
        second: BusRole,
        pin: PinConfig,
    },
    /// `co2_low_ppm` is not below `co2_high_ppm`
    ThresholdOrder,
    /// Threshold is not a finite positive number
    InvalidThreshold,
    /// Interval is zero
    ZeroInterval(Interval),
    /// LED strip has no LEDs
    InvalidLedCount,
    /// Sensor count is zero
    NoSensors,
    /// Access point SSID is empty
    EmptyApSsid,
    /// Access point password is neither empty nor 8..=63 bytes
    InvalidApPassword,
    /// Access point timeout is zero
    ZeroApTimeout,
    /// Server host name is empty
    EmptyHost,
    /// Server port is zero
    ZeroPort,
}
