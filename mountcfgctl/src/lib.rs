//! MountCfg CLI Library
//!
//! Command-line surface over `mountcfg-core`: validate and resolve user
//! configuration files, inspect the defaults layer and the known board pin
//! tables.

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;
