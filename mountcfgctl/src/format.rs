//! Output formatting utilities for the CLI
//!
//! Provides table rendering with colors; JSON output goes straight through
//! `serde_json` in the handlers.

use colored::*;
use tabled::{settings::Style, Table, Tabled};

use mountcfg_core::{Layer, Pinmap, ResolvedConfig};

/// One-screen summary of a resolved configuration
pub fn format_summary(config: &ResolvedConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("Host: {}", config.host_name.cyan()));
    output.push('\n');
    output.push_str(&format!(
        "Board: {} ({})",
        config.pinmap.token().cyan(),
        config.pinmap.pin_table().mcu
    ));
    output.push('\n');
    output.push_str(&format!(
        "Mount: {}, slew {} deg/s",
        config.mount.mount_type.token().cyan(),
        config.mount.slew_rate_base.to_string().yellow()
    ));
    output.push('\n');
    output.push_str(&format!(
        "Serial: A {} baud, B {} baud",
        config.serial.serial_a_baud.to_string().yellow(),
        config.serial.serial_b_baud.to_string().yellow()
    ));
    output.push('\n');
    output.push_str(&format!(
        "WiFi: {}",
        if config.wifi.enabled {
            format!("enabled ({})", config.wifi.ssid).green().to_string()
        } else {
            "disabled".to_string()
        }
    ));

    output
}

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Option")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Render the flat resolved namespace as a table.
pub fn format_namespace(config: &ResolvedConfig) -> String {
    format_layer(config.namespace())
}

/// Render any layer as an Option/Value table.
pub fn format_layer(layer: &Layer) -> String {
    let rows: Vec<OptionRow> = layer
        .iter()
        .map(|(name, value)| OptionRow {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "Board")]
    board: &'static str,
    #[tabled(rename = "MCU")]
    mcu: &'static str,
    #[tabled(rename = "Axis1 S/D/E")]
    axis1: String,
    #[tabled(rename = "Axis2 S/D/E")]
    axis2: String,
    #[tabled(rename = "Serial B RX/TX")]
    serial_b: String,
    #[tabled(rename = "LED")]
    led: u8,
}

/// Render the known boards and their pin tables.
pub fn format_boards() -> String {
    let rows: Vec<BoardRow> = Pinmap::ALL
        .iter()
        .map(|board| {
            let t = board.pin_table();
            BoardRow {
                board: t.name,
                mcu: t.mcu,
                axis1: format!("{}/{}/{}", t.axis1_step, t.axis1_dir, t.axis1_enable),
                axis2: format!("{}/{}/{}", t.axis2_step, t.axis2_dir, t.axis2_enable),
                serial_b: format!("{}/{}", t.serial_b_rx, t.serial_b_tx),
                led: t.status_led,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
