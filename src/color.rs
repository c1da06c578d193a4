//! Hex color validation for stroke colors.
//!
//! Stroke colors travel as plain CSS hex strings so they can be handed to a
//! 2D context unchanged. [`HexColor`] guarantees the string parses as `#RGB`
//! or `#RRGGBB`; an unparseable value can never reach a persisted stroke,
//! including one deserialized from host storage.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a value is not a `#RGB` / `#RRGGBB` hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    Invalid(String),
}

/// Parse `#RGB` or `#RRGGBB` (leading `#` optional) into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let trimmed = raw.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2))?;
            let g = channel(&hex[1..2].repeat(2))?;
            let b = channel(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn channel(pair: &str) -> Option<u8> {
    match u8::from_str_radix(pair, 16) {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

/// A validated hex color string, always stored with a leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Validate `raw` and wrap it. Whitespace is trimmed and a missing `#` is added;
    /// the digits keep the caller's casing.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Invalid`] if `raw` is not a `#RGB` / `#RRGGBB` value.
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        if parse_hex_rgb(raw).is_none() {
            return Err(ColorError::Invalid(raw.to_owned()));
        }
        let trimmed = raw.trim();
        if trimmed.starts_with('#') {
            Ok(Self(trimmed.to_owned()))
        } else {
            Ok(Self(format!("#{trimmed}")))
        }
    }

    /// The color as a CSS string, e.g. `"#EF4444"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(crate::consts::PEN_COLOR_DEFAULT.to_owned())
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
