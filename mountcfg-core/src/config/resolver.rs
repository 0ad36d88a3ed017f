//! The three-layer configuration resolver
//!
//! Resolution order: user layer > extended defaults > pin-map bindings.
//! Pure and one-shot: the same input layers always produce the same flat
//! output, and nothing here performs I/O.

use tracing::warn;

use crate::board::Pinmap;
use crate::config::defaults::{extended_layer, is_recognized, FILE_VERSION};
use crate::config::layer::Layer;
use crate::config::resolved::ResolvedConfig;
use crate::error::{ConfigError, Result};
use crate::types::OptionValue;

/// Policy for options no layer recognizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Unrecognized options fail resolution
    #[default]
    Strict,
    /// Unrecognized options are dropped with a warning
    Lenient,
}

/// Resolve a user layer against the extended defaults and the selected
/// board's pin map, with strict handling of unrecognized options.
pub fn resolve(user: &Layer) -> Result<ResolvedConfig> {
    resolve_with(user, Strictness::Strict)
}

/// Resolve with an explicit strictness policy.
///
/// Steps, in order: reject (or drop) unrecognized user options, merge the
/// defaults underneath the user layer, bind physical pins from the board
/// selected by `PINMAP`, gate on `FileVersionConfig`, verify every
/// recognized option is bound, then extract the typed configuration.
pub fn resolve_with(user: &Layer, strictness: Strictness) -> Result<ResolvedConfig> {
    let mut known = Layer::new();
    for (name, value) in user.iter() {
        if is_recognized(name) {
            known.set(name, value.clone());
        } else {
            match strictness {
                Strictness::Strict => {
                    return Err(ConfigError::UnrecognizedOption(name.to_string()))
                }
                Strictness::Lenient => {
                    warn!(option = name, "dropping unrecognized option");
                }
            }
        }
    }

    let mut merged = Layer::merge(&[&known, &extended_layer()]);

    // PINMAP and FileVersionConfig have no defaults; missing values surface
    // here as undefined-option errors.
    let pinmap: Pinmap = merged.get_token("PINMAP")?.parse()?;
    for (name, pin) in pinmap.pin_table().bindings() {
        if !known.contains(name) {
            merged.set(name, OptionValue::Integer(i64::from(pin)));
        }
    }

    let file_version = merged.get_integer("FileVersionConfig")?;
    if file_version != FILE_VERSION {
        return Err(ConfigError::VersionMismatch {
            found: file_version,
            expected: FILE_VERSION,
        });
    }

    for name in crate::config::defaults::recognized_options() {
        if !merged.contains(name) {
            return Err(ConfigError::UndefinedOption(name.to_string()));
        }
    }

    ResolvedConfig::from_layer(&merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DriverModel, MountType, Switch, TimeLocationSource};

    fn minimal_user() -> Layer {
        let mut user = Layer::new();
        user.set("PINMAP", OptionValue::Token("MaxESP4".to_string()));
        user.set("FileVersionConfig", OptionValue::Integer(FILE_VERSION));
        user
    }

    #[test]
    fn test_minimal_user_layer_resolves_to_defaults() {
        let config = resolve(&minimal_user()).unwrap();

        assert_eq!(config.host_name, "OnStepX");
        assert_eq!(config.serial.serial_a_baud, 9600);
        assert_eq!(config.serial.serial_b_baud, 9600);
        assert_eq!(config.mount.mount_type, MountType::Gem);
        assert_eq!(config.mount.slew_rate_base, 1.0);
        assert_eq!(config.mount.axis1.steps_per_degree, 12800);
        assert!(!config.mount.axis1.reverse);
        assert_eq!(config.mount.axis1.limit_min, -180.0);
        assert_eq!(config.mount.axis1.limit_max, 180.0);
        assert_eq!(config.mount.axis2.limit_min, -90.0);
        assert_eq!(config.mount.axis2.limit_max, 90.0);
        assert_eq!(config.file_version, FILE_VERSION);
    }

    #[test]
    fn test_user_override_precedence() {
        let mut user = minimal_user();
        user.set("AXIS1_STEPS_PER_DEGREE", OptionValue::Integer(6400));
        user.set("MOUNT_TYPE", OptionValue::Token("ALTAZM".to_string()));
        user.set("SERIAL_A_BAUD_DEFAULT", OptionValue::Integer(115200));

        let config = resolve(&user).unwrap();
        assert_eq!(config.mount.axis1.steps_per_degree, 6400);
        assert_eq!(config.mount.mount_type, MountType::AltAzm);
        assert_eq!(config.serial.serial_a_baud, 115200);
        // untouched options still come from the defaults layer
        assert_eq!(config.mount.axis2.steps_per_degree, 12800);
        assert_eq!(config.serial.serial_b_baud, 9600);
    }

    #[test]
    fn test_missing_pinmap_is_undefined_option() {
        let err = resolve(&Layer::new()).unwrap_err();
        assert!(matches!(err, ConfigError::UndefinedOption(name) if name == "PINMAP"));
    }

    #[test]
    fn test_undeclared_version_is_undefined_option() {
        // the user file must assert which schema it was authored against
        let mut user = Layer::new();
        user.set("PINMAP", OptionValue::Token("MaxESP4".to_string()));
        let err = resolve(&user).unwrap_err();
        assert!(matches!(err, ConfigError::UndefinedOption(name) if name == "FileVersionConfig"));
    }

    #[test]
    fn test_unknown_board_rejected() {
        let mut user = Layer::new();
        user.set("PINMAP", OptionValue::Token("MegaBoard9000".to_string()));
        let err = resolve(&user).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownToken { kind: "board", .. }));
    }

    #[test]
    fn test_version_mismatch_fails() {
        let mut user = minimal_user();
        user.set("FileVersionConfig", OptionValue::Integer(5));
        let err = resolve(&user).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionMismatch {
                found: 5,
                expected: FILE_VERSION
            }
        ));
    }

    #[test]
    fn test_unrecognized_option_strict_vs_lenient() {
        let mut user = minimal_user();
        user.set("AXIS3_STEPS_PER_DEGREE", OptionValue::Integer(1000));

        let err = resolve(&user).unwrap_err();
        assert!(matches!(err, ConfigError::UnrecognizedOption(_)));

        let config = resolve_with(&user, Strictness::Lenient).unwrap();
        assert!(config.namespace().get("AXIS3_STEPS_PER_DEGREE").is_none());
    }

    #[test]
    fn test_pinmap_binds_board_pins() {
        let config = resolve(&minimal_user()).unwrap();
        let table = Pinmap::MaxEsp4.pin_table();

        assert_eq!(config.pins.axis1_step, table.axis1_step);
        assert_eq!(config.pins.serial_b_rx, table.serial_b_rx);
        assert_eq!(
            config.namespace().get_integer("AXIS2_DIR_PIN").unwrap(),
            i64::from(table.axis2_dir)
        );
    }

    #[test]
    fn test_user_pin_override_beats_pin_table() {
        let mut user = minimal_user();
        user.set("STATUS_LED_PIN", OptionValue::Integer(5));

        let config = resolve(&user).unwrap();
        assert_eq!(config.pins.status_led, 5);
        // the rest still come from the board table
        assert_eq!(
            config.pins.axis1_step,
            Pinmap::MaxEsp4.pin_table().axis1_step
        );
    }

    #[test]
    fn test_changing_pinmap_changes_only_pin_bindings() {
        let mut user = minimal_user();
        let on_esp4 = resolve(&user).unwrap();

        user.set("PINMAP", OptionValue::Token("MiniPCB2".to_string()));
        let on_mini = resolve(&user).unwrap();

        assert_ne!(on_esp4.pins, on_mini.pins);
        assert_eq!(on_esp4.mount, on_mini.mount);
        assert_eq!(on_esp4.serial, on_mini.serial);
        assert_eq!(on_esp4.wifi, on_mini.wifi);
        assert_eq!(on_esp4.host_name, on_mini.host_name);

        // namespace-level check: only PINMAP and pin options may differ
        let pin_names = ResolvedConfig::pin_option_names();
        for (name, value) in on_esp4.namespace().iter() {
            if name == "PINMAP" || pin_names.iter().any(|p| *p == name) {
                continue;
            }
            assert_eq!(Some(value), on_mini.namespace().get(name), "option {}", name);
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut user = minimal_user();
        user.set("AXIS2_REVERSE", OptionValue::Switch(Switch::On));
        user.set("SLEW_RATE_BASE_DESIRED", OptionValue::Float(2.5));

        let first = resolve(&user).unwrap();
        let second = resolve(&user).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.namespace(), second.namespace());
    }

    #[test]
    fn test_original_example_header_resolves() {
        // the shipped Config.example.h, inline
        let src = r#"
            #define HOST_NAME                "OnStepX_Ctrl" // Hostname for this device
            #define PINMAP                        MaxESP4   // ESP32-S3 board
            #define SERIAL_A_BAUD_DEFAULT        115200     // USB serial
            #define SERIAL_B_BAUD_DEFAULT        9600       // Auxiliary serial
            #define AXIS1_DRIVER_MODEL            TMC2209
            #define AXIS1_STEPS_PER_DEGREE        12800
            #define AXIS1_REVERSE                 OFF
            #define AXIS1_LIMIT_MIN              -180
            #define AXIS1_LIMIT_MAX               180
            #define AXIS2_DRIVER_MODEL            TMC2209
            #define AXIS2_STEPS_PER_DEGREE        12800
            #define AXIS2_REVERSE                 OFF
            #define AXIS2_LIMIT_MIN               -90
            #define AXIS2_LIMIT_MAX                90
            #define MOUNT_TYPE                    GEM
            #define SLEW_RATE_BASE_DESIRED        2.0
            #define TIME_LOCATION_SOURCE          DS3231
            #define WIFI_ENABLED                  ON
            #define WIFI_SSID                     "OnStepX_AP"
            #define WIFI_PASSWORD                 "password"
            #define FileVersionConfig 6
            #include "Extended.config.h"
        "#;
        let user = Layer::from_header_str(src).unwrap();
        let config = resolve(&user).unwrap();

        assert_eq!(config.host_name, "OnStepX_Ctrl");
        assert_eq!(config.pinmap, Pinmap::MaxEsp4);
        assert_eq!(config.serial.serial_a_baud, 115200);
        assert_eq!(config.serial.serial_b_baud, 9600);
        assert_eq!(config.mount.mount_type, MountType::Gem);
        assert_eq!(config.mount.slew_rate_base, 2.0);
        assert_eq!(config.mount.axis1.driver_model, DriverModel::Tmc2209);
        assert_eq!(config.time_location_source, TimeLocationSource::Ds3231);
        assert!(config.wifi.enabled);
        assert_eq!(config.wifi.ssid, "OnStepX_AP");
        assert_eq!(config.file_version, 6);
    }

    #[test]
    fn test_header_off_token_for_time_location_source() {
        // OFF parses as a switch in the header dialect but is also a member
        // of the TIME_LOCATION_SOURCE token set
        let src = "\
            #define PINMAP MaxESP4\n\
            #define TIME_LOCATION_SOURCE OFF\n\
            #define FileVersionConfig 6\n";
        let user = Layer::from_header_str(src).unwrap();
        let config = resolve(&user).unwrap();
        assert_eq!(config.time_location_source, TimeLocationSource::Off);
    }

    #[test]
    fn test_toml_user_layer_resolves() {
        let src = r#"
            PINMAP = "MiniPCB2"
            MOUNT_TYPE = "FORK"
            AXIS1_REVERSE = true
            TIME_LOCATION_SOURCE = "GPS"
            FileVersionConfig = 6
        "#;
        let user = Layer::from_toml_str(src).unwrap();
        let config = resolve(&user).unwrap();

        assert_eq!(config.pinmap, Pinmap::MiniPcb2);
        assert_eq!(config.mount.mount_type, MountType::Fork);
        assert!(config.mount.axis1.reverse);
        assert_eq!(config.time_location_source, TimeLocationSource::Gps);
    }
}
