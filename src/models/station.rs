use serde::{Deserialize, Serialize};
use super::serde_helpers::{optional_string, string_or_number};

/// A station as published in `data_transport_station.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub station_id: String,
    /// Primary-locale (Thai) name
    #[serde(default, deserialize_with = "optional_string")]
    pub name: Option<String>,
    /// Secondary-locale (English) name
    #[serde(default, deserialize_with = "optional_string")]
    pub name_eng: Option<String>,
    /// Id of the owning line
    #[serde(default, deserialize_with = "string_or_number")]
    pub transportation_id: String,
    #[serde(default, deserialize_with = "optional_string")]
    pub geo_lat: Option<String>,
    #[serde(default, deserialize_with = "optional_string")]
    pub geo_lng: Option<String>,
}

impl StationRecord {
    /// Name shown in titles: English when present, otherwise the primary name
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name_eng.as_deref().or(self.name.as_deref())
    }

    /// Primary-locale name, shown as a subtitle only when the English name
    /// took the title
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.name_eng.as_ref().and(self.name.as_deref())
    }

    /// Parsed latitude, `None` unless it is a finite number
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.geo_lat.as_deref().and_then(parse_coordinate)
    }

    /// Parsed longitude, `None` unless it is a finite number
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.geo_lng.as_deref().and_then(parse_coordinate)
    }
}

/// Parse a coordinate the way the browser's `parseFloat` does: skip leading
/// whitespace and read the longest numeric prefix. Only finite values are
/// returned.
#[must_use]
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}
