//! Core value types and enumerated tokens
//!
//! Every enumerated token the original firmware expresses as a bare
//! preprocessor identifier (driver models, mount topologies, time sources,
//! ON/OFF switches) is a closed Rust enum here. Unknown tokens are rejected
//! at parse time instead of silently accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Serial baud rates accepted for the command channels
pub const VALID_BAUD_RATES: [u32; 8] = [
    4800, 9600, 19200, 38400, 57600, 115200, 230400, 460800,
];

/// Check whether a baud rate is a member of the valid set.
pub fn is_valid_baud(baud: u32) -> bool {
    VALID_BAUD_RATES.contains(&baud)
}

/// An ON/OFF switch, the boolean idiom of the original configuration header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    /// True when the switch is ON.
    pub fn is_on(&self) -> bool {
        matches!(self, Switch::On)
    }
}

impl From<bool> for Switch {
    fn from(value: bool) -> Self {
        if value {
            Switch::On
        } else {
            Switch::Off
        }
    }
}

impl FromStr for Switch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ON" => Ok(Switch::On),
            "OFF" => Ok(Switch::Off),
            _ => Err(ConfigError::UnknownToken {
                kind: "switch",
                token: s.to_string(),
                valid: "ON, OFF",
            }),
        }
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Switch::On => write!(f, "ON"),
            Switch::Off => write!(f, "OFF"),
        }
    }
}

/// One configuration option value
///
/// A layer maps option names to these. `Token` carries enumerated
/// identifiers (board names, driver models, topologies) that are validated
/// against their closed sets during typed extraction; `Text` carries quoted
/// strings (hostnames, WiFi credentials).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Float(f64),
    Switch(Switch),
    Token(String),
    Text(String),
}

impl OptionValue {
    /// Kind name used in type-mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Integer(_) => "integer",
            OptionValue::Float(_) => "float",
            OptionValue::Switch(_) => "switch",
            OptionValue::Token(_) => "token",
            OptionValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Integer(v) => write!(f, "{}", v),
            OptionValue::Float(v) => write!(f, "{}", v),
            OptionValue::Switch(v) => write!(f, "{}", v),
            OptionValue::Token(v) => write!(f, "{}", v),
            OptionValue::Text(v) => write!(f, "\"{}\"", v),
        }
    }
}

/// Stepper driver model for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DriverModel {
    A4988,
    Drv8825,
    Lv8729,
    Tmc2130,
    Tmc2209,
    Tmc5160,
}

impl DriverModel {
    /// The configuration token for this driver.
    pub fn token(&self) -> &'static str {
        match self {
            DriverModel::A4988 => "A4988",
            DriverModel::Drv8825 => "DRV8825",
            DriverModel::Lv8729 => "LV8729",
            DriverModel::Tmc2130 => "TMC2130",
            DriverModel::Tmc2209 => "TMC2209",
            DriverModel::Tmc5160 => "TMC5160",
        }
    }
}

impl FromStr for DriverModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A4988" => Ok(DriverModel::A4988),
            "DRV8825" => Ok(DriverModel::Drv8825),
            "LV8729" => Ok(DriverModel::Lv8729),
            "TMC2130" => Ok(DriverModel::Tmc2130),
            "TMC2209" => Ok(DriverModel::Tmc2209),
            "TMC5160" => Ok(DriverModel::Tmc5160),
            _ => Err(ConfigError::UnknownToken {
                kind: "driver model",
                token: s.to_string(),
                valid: "A4988, DRV8825, LV8729, TMC2130, TMC2209, TMC5160",
            }),
        }
    }
}

impl fmt::Display for DriverModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Mount topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MountType {
    /// German equatorial mount
    Gem,
    /// Fork mount
    Fork,
    /// Altitude/azimuth mount
    AltAzm,
}

impl MountType {
    /// The configuration token for this topology.
    pub fn token(&self) -> &'static str {
        match self {
            MountType::Gem => "GEM",
            MountType::Fork => "FORK",
            MountType::AltAzm => "ALTAZM",
        }
    }
}

impl FromStr for MountType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GEM" => Ok(MountType::Gem),
            "FORK" => Ok(MountType::Fork),
            "ALTAZM" => Ok(MountType::AltAzm),
            _ => Err(ConfigError::UnknownToken {
                kind: "mount type",
                token: s.to_string(),
                valid: "GEM, FORK, ALTAZM",
            }),
        }
    }
}

impl fmt::Display for MountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Source for time and location data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeLocationSource {
    /// No external source
    Off,
    /// DS3231 I2C real-time clock
    Ds3231,
    /// DS3234 SPI real-time clock
    Ds3234,
    /// GPS receiver
    Gps,
    /// Network time (requires WiFi)
    Ntp,
}

impl TimeLocationSource {
    /// The configuration token for this source.
    pub fn token(&self) -> &'static str {
        match self {
            TimeLocationSource::Off => "OFF",
            TimeLocationSource::Ds3231 => "DS3231",
            TimeLocationSource::Ds3234 => "DS3234",
            TimeLocationSource::Gps => "GPS",
            TimeLocationSource::Ntp => "NTP",
        }
    }
}

impl FromStr for TimeLocationSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OFF" => Ok(TimeLocationSource::Off),
            "DS3231" => Ok(TimeLocationSource::Ds3231),
            "DS3234" => Ok(TimeLocationSource::Ds3234),
            "GPS" => Ok(TimeLocationSource::Gps),
            "NTP" => Ok(TimeLocationSource::Ntp),
            _ => Err(ConfigError::UnknownToken {
                kind: "time/location source",
                token: s.to_string(),
                valid: "OFF, DS3231, DS3234, GPS, NTP",
            }),
        }
    }
}

impl fmt::Display for TimeLocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_baud_rates() {
        assert!(is_valid_baud(9600));
        assert!(is_valid_baud(115200));
        assert!(!is_valid_baud(0));
        assert!(!is_valid_baud(12345));
    }

    #[test]
    fn test_switch_parsing() {
        assert_eq!(Switch::from_str("ON").unwrap(), Switch::On);
        assert_eq!(Switch::from_str("off").unwrap(), Switch::Off);
        assert!(Switch::from_str("MAYBE").is_err());
        assert!(Switch::On.is_on());
        assert!(!Switch::Off.is_on());
    }

    #[test]
    fn test_driver_model_parsing() {
        assert_eq!(DriverModel::from_str("TMC2209").unwrap(), DriverModel::Tmc2209);
        assert_eq!(DriverModel::from_str("drv8825").unwrap(), DriverModel::Drv8825);
        assert!(DriverModel::from_str("TMC9999").is_err());
        assert_eq!(DriverModel::Tmc5160.to_string(), "TMC5160");
    }

    #[test]
    fn test_mount_type_parsing() {
        assert_eq!(MountType::from_str("GEM").unwrap(), MountType::Gem);
        assert_eq!(MountType::from_str("altazm").unwrap(), MountType::AltAzm);
        assert!(MountType::from_str("DOBSONIAN").is_err());
    }

    #[test]
    fn test_time_location_source_parsing() {
        assert_eq!(
            TimeLocationSource::from_str("DS3231").unwrap(),
            TimeLocationSource::Ds3231
        );
        assert_eq!(
            TimeLocationSource::from_str("off").unwrap(),
            TimeLocationSource::Off
        );
        assert!(TimeLocationSource::from_str("SUNDIAL").is_err());
    }

    #[test]
    fn test_unknown_token_message_lists_valid_set() {
        let err = MountType::from_str("DOBSONIAN").unwrap_err();
        let msg = format!("{}", err);
        assert!(msg.contains("DOBSONIAN"));
        assert!(msg.contains("GEM, FORK, ALTAZM"));
    }

    #[test]
    fn test_option_value_display() {
        assert_eq!(OptionValue::Integer(-180).to_string(), "-180");
        assert_eq!(OptionValue::Float(2.5).to_string(), "2.5");
        assert_eq!(OptionValue::Switch(Switch::On).to_string(), "ON");
        assert_eq!(OptionValue::Token("TMC2209".to_string()).to_string(), "TMC2209");
        assert_eq!(
            OptionValue::Text("OnStepX_Ctrl".to_string()).to_string(),
            "\"OnStepX_Ctrl\""
        );
    }

    #[test]
    fn test_option_value_kinds() {
        assert_eq!(OptionValue::Integer(1).kind(), "integer");
        assert_eq!(OptionValue::Float(1.0).kind(), "float");
        assert_eq!(OptionValue::Switch(Switch::Off).kind(), "switch");
        assert_eq!(OptionValue::Token("GEM".into()).kind(), "token");
        assert_eq!(OptionValue::Text("x".into()).kind(), "text");
    }

    #[test]
    fn test_token_serialization() {
        assert_eq!(serde_json::to_string(&MountType::AltAzm).unwrap(), "\"ALTAZM\"");
        assert_eq!(
            serde_json::to_string(&DriverModel::Tmc2209).unwrap(),
            "\"TMC2209\""
        );
        assert_eq!(serde_json::to_string(&Switch::On).unwrap(), "\"ON\"");
    }
}
