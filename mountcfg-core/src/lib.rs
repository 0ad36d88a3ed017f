//! MountCfg Core Library
//!
//! Configuration model and layered resolver for mount controller firmware
//! builds. A user-authored configuration file (C-header `#define` style or
//! flat TOML) is merged with an extended defaults layer and a board pin-map
//! layer into one flat, validated constant namespace.
//!
//! This crate is used by the `mountcfgctl` command-line tool and can be
//! embedded in build tooling directly.

pub mod board;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use board::{PinTable, Pinmap};
pub use config::{
    extended_layer, recognized_options, resolve, resolve_with, Layer, ResolvedConfig, Strictness,
    FILE_VERSION,
};
pub use error::{ConfigError, Result};
pub use types::{DriverModel, MountType, OptionValue, Switch, TimeLocationSource};
