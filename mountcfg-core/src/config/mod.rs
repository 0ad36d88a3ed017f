//! Configuration layers and resolution
//!
//! # Architecture
//!
//! Resolution is a pure, one-shot transform over three layers:
//!
//! - the **user layer** ([`Layer`]), parsed from a `#define`-style header or
//!   flat TOML file;
//! - the **extended defaults layer** ([`extended_layer`]), supplying a value
//!   for every recognized option the user omitted;
//! - the **pin-map layer** (selected via the `PINMAP` option), binding the
//!   physical-pin options for the chosen board.
//!
//! [`resolve`] merges them with user-wins precedence, gates on the schema
//! version, and extracts a validated [`ResolvedConfig`].

mod defaults;
mod layer;
mod resolved;
mod resolver;

pub use defaults::{extended_layer, is_recognized, recognized_options, FILE_VERSION};
pub use layer::Layer;
pub use resolved::{AxisConfig, MountProfile, ResolvedConfig, ResolvedPins, SerialChannels, WifiConfig};
pub use resolver::{resolve, resolve_with, Strictness};
