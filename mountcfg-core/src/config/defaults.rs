//! The extended defaults layer
//!
//! The counterpart of the firmware's `Extended.config.h`: a value for every
//! recognized option the user file may omit, plus the schema version the
//! user file must be authored against. `PINMAP` has no sensible default and
//! `FileVersionConfig` asserts which schema the user file was written for,
//! so both must come from the user layer; the physical-pin options come
//! from the selected board's pin table.

use crate::board::PIN_OPTIONS;
use crate::config::layer::Layer;
use crate::types::{OptionValue, Switch};

/// Schema version user files must declare via `FileVersionConfig`
pub const FILE_VERSION: i64 = 6;

/// Recognized options that carry a default value
const DEFAULTED_OPTIONS: [&str; 19] = [
    "HOST_NAME",
    "SERIAL_A_BAUD_DEFAULT",
    "SERIAL_B_BAUD_DEFAULT",
    "AXIS1_DRIVER_MODEL",
    "AXIS1_STEPS_PER_DEGREE",
    "AXIS1_REVERSE",
    "AXIS1_LIMIT_MIN",
    "AXIS1_LIMIT_MAX",
    "AXIS2_DRIVER_MODEL",
    "AXIS2_STEPS_PER_DEGREE",
    "AXIS2_REVERSE",
    "AXIS2_LIMIT_MIN",
    "AXIS2_LIMIT_MAX",
    "MOUNT_TYPE",
    "SLEW_RATE_BASE_DESIRED",
    "TIME_LOCATION_SOURCE",
    "WIFI_ENABLED",
    "WIFI_SSID",
    "WIFI_PASSWORD",
];

/// Recognized options that must be supplied by the user layer
const REQUIRED_OPTIONS: [&str; 2] = ["PINMAP", "FileVersionConfig"];

/// Build the extended defaults layer.
pub fn extended_layer() -> Layer {
    let mut layer = Layer::new();

    layer.set("HOST_NAME", OptionValue::Text("OnStepX".to_string()));

    layer.set("SERIAL_A_BAUD_DEFAULT", OptionValue::Integer(9600));
    layer.set("SERIAL_B_BAUD_DEFAULT", OptionValue::Integer(9600));

    layer.set("AXIS1_DRIVER_MODEL", OptionValue::Token("TMC2209".to_string()));
    layer.set("AXIS1_STEPS_PER_DEGREE", OptionValue::Integer(12800));
    layer.set("AXIS1_REVERSE", OptionValue::Switch(Switch::Off));
    layer.set("AXIS1_LIMIT_MIN", OptionValue::Integer(-180));
    layer.set("AXIS1_LIMIT_MAX", OptionValue::Integer(180));

    layer.set("AXIS2_DRIVER_MODEL", OptionValue::Token("TMC2209".to_string()));
    layer.set("AXIS2_STEPS_PER_DEGREE", OptionValue::Integer(12800));
    layer.set("AXIS2_REVERSE", OptionValue::Switch(Switch::Off));
    layer.set("AXIS2_LIMIT_MIN", OptionValue::Integer(-90));
    layer.set("AXIS2_LIMIT_MAX", OptionValue::Integer(90));

    layer.set("MOUNT_TYPE", OptionValue::Token("GEM".to_string()));
    layer.set("SLEW_RATE_BASE_DESIRED", OptionValue::Float(1.0));
    layer.set("TIME_LOCATION_SOURCE", OptionValue::Token("OFF".to_string()));

    layer.set("WIFI_ENABLED", OptionValue::Switch(Switch::Off));
    layer.set("WIFI_SSID", OptionValue::Text("ONSTEP".to_string()));
    layer.set("WIFI_PASSWORD", OptionValue::Text("password".to_string()));

    layer
}

/// Iterate over every recognized option name: defaulted options, required
/// options, and the physical-pin options bound by the pin-map layer.
pub fn recognized_options() -> impl Iterator<Item = &'static str> {
    DEFAULTED_OPTIONS
        .into_iter()
        .chain(REQUIRED_OPTIONS)
        .chain(PIN_OPTIONS)
}

/// Check whether an option name is recognized by any layer.
pub fn is_recognized(name: &str) -> bool {
    recognized_options().any(|n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_layer_covers_exactly_the_defaulted_options() {
        let layer = extended_layer();
        assert_eq!(layer.len(), DEFAULTED_OPTIONS.len());
        for name in DEFAULTED_OPTIONS {
            assert!(layer.contains(name), "missing default for {}", name);
        }
    }

    #[test]
    fn test_required_options_have_no_default() {
        let layer = extended_layer();
        for name in REQUIRED_OPTIONS {
            assert!(!layer.contains(name), "{} must come from the user layer", name);
            assert!(is_recognized(name));
        }
    }

    #[test]
    fn test_pin_options_are_recognized_but_not_defaulted() {
        let layer = extended_layer();
        for name in PIN_OPTIONS {
            assert!(is_recognized(name));
            assert!(!layer.contains(name), "{} should come from the pin table", name);
        }
    }

    #[test]
    fn test_unknown_names_not_recognized() {
        assert!(!is_recognized("AXIS3_STEPS_PER_DEGREE"));
        assert!(!is_recognized("FOCUSER1_DRIVER_MODEL"));
    }

    #[test]
    fn test_default_values() {
        let layer = extended_layer();
        assert_eq!(layer.get_integer("SERIAL_A_BAUD_DEFAULT").unwrap(), 9600);
        assert_eq!(layer.get_float("AXIS1_LIMIT_MIN").unwrap(), -180.0);
        assert_eq!(layer.get_float("AXIS2_LIMIT_MAX").unwrap(), 90.0);
        assert_eq!(layer.get_token("MOUNT_TYPE").unwrap(), "GEM");
        assert!(!layer.get_switch("WIFI_ENABLED").unwrap().is_on());
    }
}
