//! Text shown for a station: the map popup and the sidebar result row.

use std::fmt::Write;
use html_escape::encode_safe;
use crate::index::{IndexedStation, StationKey};

/// Everything a station popup displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    pub station_id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub line_name: String,
    pub service: Option<String>,
    pub latitude: String,
    pub longitude: String,
}

impl PopupContent {
    #[must_use]
    pub fn for_station(item: &IndexedStation) -> Self {
        let station = &item.station;
        Self {
            station_id: station.station_id.clone(),
            title: station.display_name().unwrap_or("Station").to_string(),
            subtitle: station.subtitle().map(str::to_string),
            line_name: item.line_label().to_string(),
            service: item.line.as_ref().and_then(|line| line.service.clone()),
            latitude: station.geo_lat.clone().unwrap_or_else(|| item.lat.to_string()),
            longitude: station.geo_lng.clone().unwrap_or_else(|| item.lng.to_string()),
        }
    }

    /// Label/value rows in display order; the service row only when known
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        let mut rows = vec![("Station ID", self.station_id.as_str()), ("Line", self.line_name.as_str())];
        if let Some(service) = &self.service {
            rows.push(("Service", service.as_str()));
        }
        rows.push(("Lat", self.latitude.as_str()));
        rows.push(("Lng", self.longitude.as_str()));
        rows
    }

    /// Popup markup handed to the map library. All dataset text is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div style="min-width: 220px;">"#);
        let _ = write!(
            html,
            r#"<div style="font-weight: 700; font-size: 14px;">{}</div>"#,
            encode_safe(&self.title)
        );
        match &self.subtitle {
            Some(subtitle) => {
                let _ = write!(
                    html,
                    r#"<div style="color:#6b7280; margin: 2px 0 8px;">{}</div>"#,
                    encode_safe(subtitle)
                );
            }
            None => html.push_str(r#"<div style="margin-top: 8px;"></div>"#),
        }

        html.push_str(r#"<div style="display:grid; gap:6px;">"#);
        for (label, value) in self.rows() {
            let _ = write!(
                html,
                r#"<div style="display:flex; gap:8px; justify-content:space-between;"><div style="color:#6b7280;">{label}</div><div style="font-variant-numeric: tabular-nums;">{}</div></div>"#,
                encode_safe(value)
            );
        }
        html.push_str("</div></div>");
        html
    }
}

/// One entry of the search results list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub key: StationKey,
    pub title: String,
    pub badge: String,
    pub subtitle: Option<String>,
    pub line_name: String,
}

impl ResultRow {
    #[must_use]
    pub fn for_station(item: &IndexedStation) -> Self {
        Self {
            key: item.key.clone(),
            title: item.station.display_name().unwrap_or_default().to_string(),
            badge: item.station.station_id.clone(),
            subtitle: item.station.subtitle().map(str::to_string),
            line_name: item.line_label().to_string(),
        }
    }
}
