//! Board pin-map definitions
//!
//! The `PINMAP` option selects one of the known controller boards. Each
//! board carries a static pin table binding the logical signal names the
//! firmware uses (step/dir/enable per axis, auxiliary serial, status LED)
//! to physical MCU pins. Selecting a different board changes only these
//! physical bindings, never mount geometry or behavior options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Names of the physical-pin options a pin table binds
pub const PIN_OPTIONS: [&str; 9] = [
    "AXIS1_STEP_PIN",
    "AXIS1_DIR_PIN",
    "AXIS1_ENABLE_PIN",
    "AXIS2_STEP_PIN",
    "AXIS2_DIR_PIN",
    "AXIS2_ENABLE_PIN",
    "SERIAL_B_RX_PIN",
    "SERIAL_B_TX_PIN",
    "STATUS_LED_PIN",
];

/// Known controller boards selectable via `PINMAP`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pinmap {
    /// MaxESP3 - ESP32 based controller
    #[serde(rename = "MaxESP3")]
    MaxEsp3,
    /// MaxESP4 - ESP32-S3 based controller
    #[serde(rename = "MaxESP4")]
    MaxEsp4,
    /// MiniPCB2 - compact Teensy based controller
    #[serde(rename = "MiniPCB2")]
    MiniPcb2,
    /// MaxPCB2 - full-size Teensy based controller
    #[serde(rename = "MaxPCB2")]
    MaxPcb2,
}

impl Pinmap {
    /// All known boards, in listing order.
    pub const ALL: [Pinmap; 4] = [
        Pinmap::MaxEsp3,
        Pinmap::MaxEsp4,
        Pinmap::MiniPcb2,
        Pinmap::MaxPcb2,
    ];

    /// The configuration token for this board.
    pub fn token(&self) -> &'static str {
        match self {
            Pinmap::MaxEsp3 => "MaxESP3",
            Pinmap::MaxEsp4 => "MaxESP4",
            Pinmap::MiniPcb2 => "MiniPCB2",
            Pinmap::MaxPcb2 => "MaxPCB2",
        }
    }

    /// The static pin table for this board.
    pub fn pin_table(&self) -> &'static PinTable {
        match self {
            Pinmap::MaxEsp3 => &MAX_ESP3,
            Pinmap::MaxEsp4 => &MAX_ESP4,
            Pinmap::MiniPcb2 => &MINI_PCB2,
            Pinmap::MaxPcb2 => &MAX_PCB2,
        }
    }
}

impl FromStr for Pinmap {
    type Err = ConfigError;

    /// Parse a board token, matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MAXESP3" => Ok(Pinmap::MaxEsp3),
            "MAXESP4" => Ok(Pinmap::MaxEsp4),
            "MINIPCB2" => Ok(Pinmap::MiniPcb2),
            "MAXPCB2" => Ok(Pinmap::MaxPcb2),
            _ => Err(ConfigError::UnknownToken {
                kind: "board",
                token: s.to_string(),
                valid: "MaxESP3, MaxESP4, MiniPCB2, MaxPCB2",
            }),
        }
    }
}

impl fmt::Display for Pinmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Physical pin assignments for one board
#[derive(Debug, Clone, Serialize)]
pub struct PinTable {
    /// Board name (matches the `PINMAP` token)
    pub name: &'static str,
    /// Microcontroller the board is built around
    pub mcu: &'static str,
    /// Axis 1 step pulse pin
    pub axis1_step: u8,
    /// Axis 1 direction pin
    pub axis1_dir: u8,
    /// Axis 1 driver enable pin
    pub axis1_enable: u8,
    /// Axis 2 step pulse pin
    pub axis2_step: u8,
    /// Axis 2 direction pin
    pub axis2_dir: u8,
    /// Axis 2 driver enable pin
    pub axis2_enable: u8,
    /// Auxiliary serial (channel B) receive pin
    pub serial_b_rx: u8,
    /// Auxiliary serial (channel B) transmit pin
    pub serial_b_tx: u8,
    /// Status LED pin
    pub status_led: u8,
}

impl PinTable {
    /// The pin bindings as (option name, pin) pairs, in `PIN_OPTIONS` order.
    pub fn bindings(&self) -> [(&'static str, u8); 9] {
        [
            ("AXIS1_STEP_PIN", self.axis1_step),
            ("AXIS1_DIR_PIN", self.axis1_dir),
            ("AXIS1_ENABLE_PIN", self.axis1_enable),
            ("AXIS2_STEP_PIN", self.axis2_step),
            ("AXIS2_DIR_PIN", self.axis2_dir),
            ("AXIS2_ENABLE_PIN", self.axis2_enable),
            ("SERIAL_B_RX_PIN", self.serial_b_rx),
            ("SERIAL_B_TX_PIN", self.serial_b_tx),
            ("STATUS_LED_PIN", self.status_led),
        ]
    }
}

static MAX_ESP3: PinTable = PinTable {
    name: "MaxESP3",
    mcu: "ESP32",
    axis1_step: 18,
    axis1_dir: 0,
    axis1_enable: 12,
    axis2_step: 27,
    axis2_dir: 26,
    axis2_enable: 4,
    serial_b_rx: 16,
    serial_b_tx: 17,
    status_led: 25,
};

static MAX_ESP4: PinTable = PinTable {
    name: "MaxESP4",
    mcu: "ESP32-S3",
    axis1_step: 33,
    axis1_dir: 21,
    axis1_enable: 14,
    axis2_step: 2,
    axis2_dir: 1,
    axis2_enable: 7,
    serial_b_rx: 44,
    serial_b_tx: 43,
    status_led: 38,
};

static MINI_PCB2: PinTable = PinTable {
    name: "MiniPCB2",
    mcu: "Teensy 3.2",
    axis1_step: 12,
    axis1_dir: 10,
    axis1_enable: 16,
    axis2_step: 6,
    axis2_dir: 4,
    axis2_enable: 21,
    serial_b_rx: 0,
    serial_b_tx: 1,
    status_led: 13,
};

static MAX_PCB2: PinTable = PinTable {
    name: "MaxPCB2",
    mcu: "Teensy 4.1",
    axis1_step: 20,
    axis1_dir: 21,
    axis1_enable: 9,
    axis2_step: 15,
    axis2_dir: 14,
    axis2_enable: 8,
    serial_b_rx: 28,
    serial_b_tx: 29,
    status_led: 33,
};
