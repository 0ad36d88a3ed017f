//! Error types for configuration resolution
//!
//! Every error here is fatal: resolution happens once, before the firmware
//! build, and a bad configuration must stop the build rather than be clamped
//! or retried.

use thiserror::Error;

/// Core error type for configuration resolution
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A layer defines an option name the resolver does not recognize
    #[error("Unrecognized option: {0}")]
    UnrecognizedOption(String),

    /// A recognized option received no value from any layer
    #[error("Option {0} is not defined by any layer")]
    UndefinedOption(String),

    /// A value violates the option's declared constraint
    #[error("Invalid value for {option}: {reason}")]
    ConstraintViolation { option: String, reason: String },

    /// A value has the wrong kind for its option (e.g. string where an
    /// integer is expected)
    #[error("Type mismatch for {option}: expected {expected}, got {found}")]
    TypeMismatch {
        option: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The user file was authored against a different schema version
    #[error("Configuration file version {found} does not match expected version {expected}; the file must be migrated by hand")]
    VersionMismatch { found: i64, expected: i64 },

    /// An enumerated token not in its closed set
    #[error("Unknown {kind}: '{token}'. Valid options: {valid}")]
    UnknownToken {
        kind: &'static str,
        token: String,
        valid: &'static str,
    },

    /// Syntax errors in a user configuration file
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
