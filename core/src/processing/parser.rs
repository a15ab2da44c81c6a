use std::num::IntErrorKind;

use crate::prelude::FilterConfig;

/// Reasons a line fails to yield a reading.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("marker {0:?} not found")]
    MissingMarker(String),
    #[error("no integer in {0:?}")]
    InvalidNumber(String),
    #[error("value {0:?} is out of range")]
    Overflow(String),
}

/// Extracts the millimeter reading that follows the distance marker.
#[derive(Debug, Clone)]
pub struct LineParser {
    marker: String,
    unit_suffix: String,
}

impl LineParser {
    pub fn new(marker: impl Into<String>, unit_suffix: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            unit_suffix: unit_suffix.into(),
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.marker.clone(), config.unit_suffix.clone())
    }

    pub fn parse(&self, line: &str) -> Result<i32, ParseError> {
        let start = line
            .find(&self.marker)
            .ok_or_else(|| ParseError::MissingMarker(self.marker.clone()))?;
        let mut payload = &line[start + self.marker.len()..];

        if !self.unit_suffix.is_empty() {
            if let Some(end) = payload.find(&self.unit_suffix) {
                payload = &payload[..end];
            }
        }

        parse_integer_prefix(payload)
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

/// Leading whitespace, an optional sign, then as many digits as follow; anything after is ignored.
fn parse_integer_prefix(text: &str) -> Result<i32, ParseError> {
    let trimmed = text.trim_start_matches([' ', '\t', '\n', '\x0B', '\x0C', '\r']);
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digit_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();

    if digit_len == 0 {
        return Err(ParseError::InvalidNumber(text.to_string()));
    }

    let number = &trimmed[..sign_len + digit_len];
    number.parse::<i32>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ParseError::Overflow(number.to_string())
        }
        _ => ParseError::InvalidNumber(text.to_string()),
    })
}
