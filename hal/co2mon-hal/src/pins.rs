//! Wemos D1 mini pin names
//!
//! The monitor's pin map is written in terms of the silkscreen labels
//! (`D0`..`D8`). These constants resolve them to ESP8266 GPIO numbers.

/// GPIO16 (no interrupt, no PWM)
pub const D0: u8 = 16;
/// GPIO5
pub const D1: u8 = 5;
/// GPIO4
pub const D2: u8 = 4;
/// GPIO0 (boot strap, pulled up)
pub const D3: u8 = 0;
/// GPIO2 (boot strap, pulled up, on-board LED)
pub const D4: u8 = 2;
/// GPIO14
pub const D5: u8 = 14;
/// GPIO12
pub const D6: u8 = 12;
/// GPIO13
pub const D7: u8 = 13;
/// GPIO15 (boot strap, pulled down)
pub const D8: u8 = 15;
/// GPIO3 (UART0 RX)
pub const RX: u8 = 3;
/// GPIO1 (UART0 TX)
pub const TX: u8 = 1;

const LABELS: [(&str, u8); 11] = [
    ("D0", D0),
    ("D1", D1),
    ("D2", D2),
    ("D3", D3),
    ("D4", D4),
    ("D5", D5),
    ("D6", D6),
    ("D7", D7),
    ("D8", D8),
    ("RX", RX),
    ("TX", TX),
];

/// Check that a GPIO can be assigned to a peripheral
///
/// GPIO6..=11 drive the SPI flash and are never available.
pub const fn is_usable_gpio(gpio: u8) -> bool {
    matches!(gpio, 0..=5 | 12..=16)
}

/// Check that a GPIO has an internal pull-up
///
/// GPIO16 only has a pull-down.
pub const fn has_pullup(gpio: u8) -> bool {
    is_usable_gpio(gpio) && gpio != D0
}

/// Board label for a GPIO number, e.g. `13` -> `"D7"`
pub fn board_label(gpio: u8) -> Option<&'static str> {
    LABELS
        .iter()
        .find(|(_, pin)| *pin == gpio)
        .map(|(label, _)| *label)
}

/// GPIO number for a board label, e.g. `"D7"` -> `13`
pub fn from_label(label: &str) -> Option<u8> {
    LABELS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label))
        .map(|(_, pin)| *pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_resolve_both_ways() {
        for (label, gpio) in LABELS {
            assert_eq!(board_label(gpio), Some(label));
            assert_eq!(from_label(label), Some(gpio));
        }
        assert_eq!(from_label("d7"), Some(13));
        assert_eq!(from_label("D9"), None);
        assert_eq!(board_label(9), None);
    }

    #[test]
    fn test_flash_pins_unusable() {
        for gpio in 6..=11 {
            assert!(!is_usable_gpio(gpio));
        }
        assert!(!is_usable_gpio(17));
        for (_, gpio) in LABELS {
            assert!(is_usable_gpio(gpio));
        }
    }

    #[test]
    fn test_pullups() {
        assert!(has_pullup(D7));
        assert!(has_pullup(D3));
        assert!(!has_pullup(D0));
        assert!(!has_pullup(9));
    }
}
