use std::fmt;
use serde::{Deserialize, Serialize};
use super::serde_helpers::{optional_string, string_or_number};
use crate::constants::DEFAULT_LINE_COLOR;

/// A line as published in `data_transport_line.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub name_eng: Option<String>,
    /// Service category, e.g. "BTS" or "MRT"
    #[serde(default, deserialize_with = "optional_string")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub line_color_hex: Option<String>,
}

impl LineRecord {
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name_eng.as_deref().or(self.name.as_deref())
    }

    /// Name for the filter list, falling back to `Line {id}`
    #[must_use]
    pub fn label(&self) -> String {
        self.display_name()
            .map_or_else(|| format!("Line {}", self.id), str::to_string)
    }

    #[must_use]
    pub fn color(&self) -> LineColor {
        LineColor::parse(self.line_color_hex.as_deref())
    }
}

/// A validated `#rrggbb` colour
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineColor(String);

impl LineColor {
    /// Accepts exactly `#` followed by six hex digits (surrounding whitespace
    /// ignored). Anything else yields the default colour.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(hex) if is_hex_color(hex) => Self(hex.to_string()),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LineColor {
    fn default() -> Self {
        Self(DEFAULT_LINE_COLOR.to_string())
    }
}

impl fmt::Display for LineColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].bytes().all(|b| b.is_ascii_hexdigit())
}
