//! Typed view of a fully resolved configuration
//!
//! Extraction narrows the flat merged namespace into typed structs and
//! applies every value constraint. Constraint violations are fatal; nothing
//! is clamped.

use serde::Serialize;

use crate::board::{Pinmap, PIN_OPTIONS};
use crate::config::layer::Layer;
use crate::error::{ConfigError, Result};
use crate::types::{is_valid_baud, DriverModel, MountType, TimeLocationSource, VALID_BAUD_RATES};

/// Configuration of one mount axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    /// Stepper driver model
    pub driver_model: DriverModel,
    /// Steps per degree of axis rotation
    pub steps_per_degree: u32,
    /// Reverse the axis direction
    pub reverse: bool,
    /// Lower travel limit, degrees
    pub limit_min: f64,
    /// Upper travel limit, degrees
    pub limit_max: f64,
}

impl AxisConfig {
    fn from_layer(layer: &Layer, axis: u8) -> Result<Self> {
        let opt = |suffix: &str| format!("AXIS{}_{}", axis, suffix);

        let driver_model: DriverModel = layer.get_token(&opt("DRIVER_MODEL"))?.parse()?;

        let steps = layer.get_integer(&opt("STEPS_PER_DEGREE"))?;
        if steps <= 0 || steps > i64::from(u32::MAX) {
            return Err(ConfigError::ConstraintViolation {
                option: opt("STEPS_PER_DEGREE"),
                reason: format!("must be a positive integer, got {}", steps),
            });
        }

        let reverse = layer.get_switch(&opt("REVERSE"))?.is_on();
        let limit_min = layer.get_float(&opt("LIMIT_MIN"))?;
        let limit_max = layer.get_float(&opt("LIMIT_MAX"))?;
        if limit_min >= limit_max {
            return Err(ConfigError::ConstraintViolation {
                option: opt("LIMIT_MIN"),
                reason: format!(
                    "limit min ({}) must be less than limit max ({})",
                    limit_min, limit_max
                ),
            });
        }

        Ok(Self {
            driver_model,
            steps_per_degree: steps as u32,
            reverse,
            limit_min,
            limit_max,
        })
    }
}

/// Mount topology, slew behavior and both axes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountProfile {
    /// Mount topology
    pub mount_type: MountType,
    /// Desired base slew rate, degrees/second
    pub slew_rate_base: f64,
    /// RA/Azm axis
    pub axis1: AxisConfig,
    /// Dec/Alt axis
    pub axis2: AxisConfig,
}

impl MountProfile {
    fn from_layer(layer: &Layer) -> Result<Self> {
        let mount_type: MountType = layer.get_token("MOUNT_TYPE")?.parse()?;

        let slew_rate_base = layer.get_float("SLEW_RATE_BASE_DESIRED")?;
        if !(slew_rate_base > 0.0) {
            return Err(ConfigError::ConstraintViolation {
                option: "SLEW_RATE_BASE_DESIRED".to_string(),
                reason: format!("must be a positive number, got {}", slew_rate_base),
            });
        }

        Ok(Self {
            mount_type,
            slew_rate_base,
            axis1: AxisConfig::from_layer(layer, 1)?,
            axis2: AxisConfig::from_layer(layer, 2)?,
        })
    }
}

/// Baud rates for the two serial command channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerialChannels {
    /// Channel A (primary/USB) baud rate
    pub serial_a_baud: u32,
    /// Channel B (auxiliary) baud rate
    pub serial_b_baud: u32,
}

impl SerialChannels {
    fn from_layer(layer: &Layer) -> Result<Self> {
        Ok(Self {
            serial_a_baud: Self::baud(layer, "SERIAL_A_BAUD_DEFAULT")?,
            serial_b_baud: Self::baud(layer, "SERIAL_B_BAUD_DEFAULT")?,
        })
    }

    fn baud(layer: &Layer, option: &str) -> Result<u32> {
        let raw = layer.get_integer(option)?;
        let baud = u32::try_from(raw).ok().filter(|b| is_valid_baud(*b));
        baud.ok_or_else(|| ConfigError::ConstraintViolation {
            option: option.to_string(),
            reason: format!("{} is not a valid baud rate (valid: {:?})", raw, VALID_BAUD_RATES),
        })
    }
}

/// WiFi access settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiConfig {
    /// WiFi enabled
    pub enabled: bool,
    /// Network SSID
    pub ssid: String,
    /// Network password
    pub password: String,
}

impl WifiConfig {
    fn from_layer(layer: &Layer) -> Result<Self> {
        let enabled = layer.get_switch("WIFI_ENABLED")?.is_on();
        let ssid = layer.get_text("WIFI_SSID")?.to_string();
        let password = layer.get_text("WIFI_PASSWORD")?.to_string();

        if enabled && ssid.is_empty() {
            return Err(ConfigError::ConstraintViolation {
                option: "WIFI_SSID".to_string(),
                reason: "must not be empty when WIFI_ENABLED is ON".to_string(),
            });
        }

        Ok(Self {
            enabled,
            ssid,
            password,
        })
    }
}

/// Physical pin bindings after resolution
///
/// Usually identical to the selected board's pin table, but the user layer
/// may override individual pins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPins {
    pub axis1_step: u8,
    pub axis1_dir: u8,
    pub axis1_enable: u8,
    pub axis2_step: u8,
    pub axis2_dir: u8,
    pub axis2_enable: u8,
    pub serial_b_rx: u8,
    pub serial_b_tx: u8,
    pub status_led: u8,
}

impl ResolvedPins {
    fn from_layer(layer: &Layer) -> Result<Self> {
        let pin = |option: &str| -> Result<u8> {
            let raw = layer.get_integer(option)?;
            u8::try_from(raw).map_err(|_| ConfigError::ConstraintViolation {
                option: option.to_string(),
                reason: format!("pin number must be 0-255, got {}", raw),
            })
        };

        Ok(Self {
            axis1_step: pin("AXIS1_STEP_PIN")?,
            axis1_dir: pin("AXIS1_DIR_PIN")?,
            axis1_enable: pin("AXIS1_ENABLE_PIN")?,
            axis2_step: pin("AXIS2_STEP_PIN")?,
            axis2_dir: pin("AXIS2_DIR_PIN")?,
            axis2_enable: pin("AXIS2_ENABLE_PIN")?,
            serial_b_rx: pin("SERIAL_B_RX_PIN")?,
            serial_b_tx: pin("SERIAL_B_TX_PIN")?,
            status_led: pin("STATUS_LED_PIN")?,
        })
    }
}

/// A fully resolved configuration
///
/// Typed fields for every recognized option, plus the flat resolved
/// namespace the firmware build would consume as constants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    /// Device hostname
    pub host_name: String,
    /// Selected board
    pub pinmap: Pinmap,
    /// Serial command channel baud rates
    pub serial: SerialChannels,
    /// Mount profile (topology, slew rate, both axes)
    pub mount: MountProfile,
    /// Time and location source
    pub time_location_source: TimeLocationSource,
    /// WiFi settings
    pub wifi: WifiConfig,
    /// Physical pin bindings
    pub pins: ResolvedPins,
    /// Schema version the user file declared
    pub file_version: i64,
    /// The flat resolved namespace
    namespace: Layer,
}

impl ResolvedConfig {
    /// Extract and validate a typed configuration from a fully merged layer.
    ///
    /// The layer must already contain a value for every recognized option;
    /// the resolver guarantees this before calling.
    pub(crate) fn from_layer(merged: &Layer) -> Result<Self> {
        let host_name = merged.get_text("HOST_NAME")?.to_string();
        if host_name.is_empty() {
            return Err(ConfigError::ConstraintViolation {
                option: "HOST_NAME".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let pinmap: Pinmap = merged.get_token("PINMAP")?.parse()?;
        let time_location_source: TimeLocationSource =
            merged.get_token("TIME_LOCATION_SOURCE")?.parse()?;

        Ok(Self {
            host_name,
            pinmap,
            serial: SerialChannels::from_layer(merged)?,
            mount: MountProfile::from_layer(merged)?,
            time_location_source,
            wifi: WifiConfig::from_layer(merged)?,
            pins: ResolvedPins::from_layer(merged)?,
            file_version: merged.get_integer("FileVersionConfig")?,
            namespace: merged.clone(),
        })
    }

    /// The flat resolved namespace: every recognized option bound to
    /// exactly one value.
    pub fn namespace(&self) -> &Layer {
        &self.namespace
    }

    /// The names of the physical-pin options (the part of the namespace a
    /// `PINMAP` change is allowed to touch).
    pub fn pin_option_names() -> &'static [&'static str] {
        &PIN_OPTIONS
    }
}
