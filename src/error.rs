//! Error types for the particle field.
//!
//! The only thing that can go wrong before a field is running is its
//! configuration. A missing host container is not an error, see
//! [`ParticleField::initialize`](crate::ParticleField::initialize).

use std::fmt;
use wasm_bindgen::JsValue;

/// Errors produced while loading or validating a [`FieldConfig`](crate::FieldConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration JSON could not be parsed.
    Json(serde_json::Error),
    /// A palette or connection color is not a `#rgb`, `#rrggbb` or `#rrggbbaa` string.
    InvalidColor(String),
    /// A `{min, max}` range has `min > max` or a non-finite bound.
    InvalidRange(&'static str),
    /// A value that must be non-negative is negative or not finite.
    Negative(&'static str),
    /// A value is outside its allowed interval.
    OutOfRange(&'static str),
    /// Particles were requested with no colors to draw them in.
    EmptyPalette,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Failed to parse particle config: {}", e),
            ConfigError::InvalidColor(c) => write!(f, "Invalid color {:?}", c),
            ConfigError::InvalidRange(name) => write!(f, "Range {} must have finite min <= max", name),
            ConfigError::Negative(name) => write!(f, "{} must be a finite, non-negative number", name),
            ConfigError::OutOfRange(name) => write!(f, "{} is out of range", name),
            ConfigError::EmptyPalette => write!(f, "colors must not be empty when particleCount > 0"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<ConfigError> for JsValue {
    fn from(e: ConfigError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}
