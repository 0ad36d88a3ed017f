//! A single configuration layer
//!
//! A layer is an ordered map from option name to value. User layers are
//! parsed from either the classic firmware header dialect (`#define NAME
//! VALUE` with `//` and `/* */` comments) or a flat TOML table.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, Result};
use crate::types::{OptionValue, Switch};

/// One layer of named option values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layer {
    values: BTreeMap<String, OptionValue>,
}

impl Layer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of options defined in this layer.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no options are defined.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get an option value by name.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Define an option. A later definition replaces an earlier one within
    /// the same layer, matching preprocessor redefinition behavior.
    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    /// Check whether an option is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over defined option names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge layers in precedence order: the first layer that defines an
    /// option wins, later layers only fill gaps. This is the explicit form
    /// of the preprocessor's define-if-not-already-defined idiom.
    pub fn merge(layers: &[&Layer]) -> Layer {
        let mut out = Layer::new();
        for layer in layers {
            for (name, value) in layer.iter() {
                if !out.contains(name) {
                    out.set(name, value.clone());
                }
            }
        }
        out
    }

    /// Load a layer from a file, dispatching on extension: `.h`, `.hpp` and
    /// `.hxx` parse as header dialect, anything else as TOML.
    pub fn from_path(path: &Path) -> Result<Layer> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("h") | Some("hpp") | Some("hxx") => Self::from_header_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Parse a layer from the firmware header dialect.
    ///
    /// Recognized content: `#define NAME VALUE` lines, `//` line comments,
    /// `/* */` block comments, and other preprocessor directives (which are
    /// skipped; `#include "Extended.config.h"` carries no options).
    pub fn from_header_str(src: &str) -> Result<Layer> {
        let mut layer = Layer::new();
        let mut in_block_comment = false;

        for (lineno, raw_line) in src.lines().enumerate() {
            let line = strip_comments(raw_line, &mut in_block_comment);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix("#define") {
                // preprocessor tokenization: the directive name must end here
                if !rest.starts_with(char::is_whitespace) {
                    return Err(ConfigError::Parse(format!(
                        "line {}: malformed #define directive",
                        lineno + 1
                    )));
                }
                let rest = rest.trim_start();
                let (name, value_src) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (rest, ""),
                };
                if !is_identifier(name) {
                    return Err(ConfigError::Parse(format!(
                        "line {}: invalid option name '{}'",
                        lineno + 1,
                        name
                    )));
                }
                if value_src.is_empty() {
                    return Err(ConfigError::Parse(format!(
                        "line {}: option {} has no value",
                        lineno + 1,
                        name
                    )));
                }
                let value = parse_header_value(value_src).map_err(|reason| {
                    ConfigError::Parse(format!("line {}: {}: {}", lineno + 1, name, reason))
                })?;
                layer.set(name, value);
            } else if line.starts_with('#') {
                // other preprocessor directives carry no options
                continue;
            } else {
                return Err(ConfigError::Parse(format!(
                    "line {}: unexpected content: {}",
                    lineno + 1,
                    line
                )));
            }
        }

        Ok(layer)
    }

    /// Parse a layer from a flat TOML table.
    ///
    /// Booleans map to ON/OFF switches; strings stay text and are narrowed
    /// to tokens or switches during typed extraction.
    pub fn from_toml_str(src: &str) -> Result<Layer> {
        let table: toml::Table = toml::from_str(src)?;
        let mut layer = Layer::new();

        for (name, value) in table {
            let value = match value {
                toml::Value::Integer(v) => OptionValue::Integer(v),
                toml::Value::Float(v) => OptionValue::Float(v),
                toml::Value::Boolean(v) => OptionValue::Switch(Switch::from(v)),
                toml::Value::String(v) => OptionValue::Text(v),
                other => {
                    return Err(ConfigError::Parse(format!(
                        "option {}: expected a scalar value, got {}",
                        name,
                        other.type_str()
                    )))
                }
            };
            layer.set(name, value);
        }

        Ok(layer)
    }

    // Typed accessors used by extraction. Missing options surface as
    // UndefinedOption, wrong kinds as TypeMismatch.

    /// Get an integer option.
    pub fn get_integer(&self, name: &str) -> Result<i64> {
        match self.require(name)? {
            OptionValue::Integer(v) => Ok(*v),
            other => Err(self.mismatch(name, "integer", other)),
        }
    }

    /// Get a float option; integers widen.
    pub fn get_float(&self, name: &str) -> Result<f64> {
        match self.require(name)? {
            OptionValue::Float(v) => Ok(*v),
            OptionValue::Integer(v) => Ok(*v as f64),
            other => Err(self.mismatch(name, "number", other)),
        }
    }

    /// Get an ON/OFF switch; `"ON"`/`"OFF"` strings and tokens are accepted
    /// so TOML layers can express switches as strings.
    pub fn get_switch(&self, name: &str) -> Result<Switch> {
        match self.require(name)? {
            OptionValue::Switch(v) => Ok(*v),
            OptionValue::Token(s) | OptionValue::Text(s) => Switch::from_str(s),
            other => Err(self.mismatch(name, "switch", other)),
        }
    }

    /// Get an enumerated token; quoted text is accepted so TOML layers can
    /// express tokens as strings, and ON/OFF switches yield their token text
    /// for sets that include them (e.g. TIME_LOCATION_SOURCE OFF).
    pub fn get_token(&self, name: &str) -> Result<&str> {
        match self.require(name)? {
            OptionValue::Token(s) | OptionValue::Text(s) => Ok(s),
            OptionValue::Switch(Switch::On) => Ok("ON"),
            OptionValue::Switch(Switch::Off) => Ok("OFF"),
            other => Err(self.mismatch(name, "token", other)),
        }
    }

    /// Get a string option.
    pub fn get_text(&self, name: &str) -> Result<&str> {
        match self.require(name)? {
            OptionValue::Text(s) | OptionValue::Token(s) => Ok(s),
            other => Err(self.mismatch(name, "string", other)),
        }
    }

    fn require(&self, name: &str) -> Result<&OptionValue> {
        self.get(name)
            .ok_or_else(|| ConfigError::UndefinedOption(name.to_string()))
    }

    fn mismatch(&self, name: &str, expected: &'static str, found: &OptionValue) -> ConfigError {
        ConfigError::TypeMismatch {
            option: name.to_string(),
            expected,
            found: found.kind(),
        }
    }
}

/// Strip `//` and `/* */` comments from one line, tracking block-comment
/// state across lines. Comment markers inside double-quoted strings are
/// left alone.
fn strip_comments(line: &str, in_block_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if *in_block_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block_comment = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            '/' if !in_string && chars.peek() == Some(&'/') => break,
            '/' if !in_string && chars.peek() == Some(&'*') => {
                chars.next();
                *in_block_comment = true;
            }
            _ => out.push(c),
        }
    }

    out
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse one header value: quoted string, ON/OFF switch, integer, float,
/// or bare token.
fn parse_header_value(src: &str) -> std::result::Result<OptionValue, String> {
    if let Some(rest) = src.strip_prefix('"') {
        return match rest.split_once('"') {
            Some((text, trailing)) if trailing.trim().is_empty() => {
                Ok(OptionValue::Text(text.to_string()))
            }
            Some((_, trailing)) => Err(format!("unexpected content after string: {}", trailing)),
            None => Err("unterminated string".to_string()),
        };
    }
    if src.eq_ignore_ascii_case("ON") {
        return Ok(OptionValue::Switch(Switch::On));
    }
    if src.eq_ignore_ascii_case("OFF") {
        return Ok(OptionValue::Switch(Switch::Off));
    }
    if let Ok(v) = src.parse::<i64>() {
        return Ok(OptionValue::Integer(v));
    }
    if let Ok(v) = src.parse::<f64>() {
        return Ok(OptionValue::Float(v));
    }
    if is_identifier(src) {
        return Ok(OptionValue::Token(src.to_string()));
    }
    Err(format!("cannot parse value '{}'", src))
}
