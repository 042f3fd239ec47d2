//! Station index
//!
//! Joins stations to their lines, drops stations without usable coordinates
//! and precomputes the text each station is searched by. The index is built
//! once after loading and never mutated; everything downstream (search,
//! filters, the map) reads from the same snapshot.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use indexmap::IndexMap;
use crate::constants::UNKNOWN_LINE_LABEL;
use crate::models::{LineColor, LineRecord, StationRecord};
use crate::search::normalize_text;

/// `{station id}::{line id}`, unique within an index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationKey(String);

impl StationKey {
    #[must_use]
    pub fn new(station_id: &str, line_id: &str) -> Self {
        Self(format!("{station_id}::{line_id}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedStation {
    pub key: StationKey,
    pub station: StationRecord,
    /// `None` when no line carries the station's `transportationId`
    pub line: Option<Rc<LineRecord>>,
    pub lat: f64,
    pub lng: f64,
    pub search_text: String,
}

impl IndexedStation {
    /// Id of the owning line as given by the station, whether or not it resolved
    #[must_use]
    pub fn line_id(&self) -> &str {
        &self.station.transportation_id
    }

    #[must_use]
    pub fn color(&self) -> LineColor {
        self.line.as_ref().map(|line| line.color()).unwrap_or_default()
    }

    #[must_use]
    pub fn line_label(&self) -> &str {
        self.line
            .as_ref()
            .and_then(|line| line.display_name())
            .unwrap_or(UNKNOWN_LINE_LABEL)
    }
}

/// Counters collected while building the index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub input_stations: usize,
    pub indexed: usize,
    pub skipped_coordinates: usize,
    pub duplicate_keys: usize,
    pub duplicate_line_ids: usize,
}

/// Stations of one line, in index order
#[derive(Debug, Clone)]
pub struct LineGroup<'a> {
    pub line_id: &'a str,
    pub line: Option<&'a LineRecord>,
    pub color: LineColor,
    pub stations: Vec<&'a IndexedStation>,
}

/// One row of the line filter list
#[derive(Debug, Clone, PartialEq)]
pub struct LineSummary {
    pub id: String,
    pub label: String,
    pub service: Option<String>,
    pub color: LineColor,
    pub station_count: usize,
}

impl LineSummary {
    /// e.g. `BTS • 23 stations`
    #[must_use]
    pub fn subtitle(&self) -> String {
        match self.service.as_deref() {
            Some(service) => format!("{service} • {} stations", self.station_count),
            None => format!("{} stations", self.station_count),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    stations: Vec<IndexedStation>,
    positions: HashMap<StationKey, usize>,
    lines: IndexMap<String, Rc<LineRecord>>,
    stats: IndexStats,
}

impl StationIndex {
    /// Build the index from freshly loaded records.
    ///
    /// Stations keep their input order. A station is skipped when either
    /// coordinate is not a finite number, or when an earlier station already
    /// produced the same key. Lines sharing an id are resolved last-write-wins.
    #[must_use]
    pub fn build(stations: Vec<StationRecord>, lines: Vec<LineRecord>) -> Self {
        let mut stats = IndexStats {
            input_stations: stations.len(),
            ..IndexStats::default()
        };

        let mut line_map: IndexMap<String, Rc<LineRecord>> = IndexMap::with_capacity(lines.len());
        for line in lines {
            if line_map.insert(line.id.clone(), Rc::new(line)).is_some() {
                stats.duplicate_line_ids += 1;
            }
        }

        if stats.duplicate_line_ids > 0 {
            crate::log_warn!(
                "Line dataset repeats {} line id(s); the last record for each id wins",
                stats.duplicate_line_ids
            );
        }

        let mut indexed = Vec::with_capacity(stations.len());
        let mut positions = HashMap::with_capacity(stations.len());

        for station in stations {
            let (Some(lat), Some(lng)) = (station.latitude(), station.longitude()) else {
                stats.skipped_coordinates += 1;
                continue;
            };

            let key = StationKey::new(&station.station_id, &station.transportation_id);
            if positions.contains_key(&key) {
                stats.duplicate_keys += 1;
                continue;
            }

            let line = line_map.get(&station.transportation_id).cloned();
            let search_text = build_search_text(&station, line.as_deref());

            positions.insert(key.clone(), indexed.len());
            indexed.push(IndexedStation {
                key,
                station,
                line,
                lat,
                lng,
                search_text,
            });
        }

        stats.indexed = indexed.len();
        crate::log!(
            "Indexed {} of {} stations ({} without coordinates, {} duplicate keys)",
            stats.indexed,
            stats.input_stations,
            stats.skipped_coordinates,
            stats.duplicate_keys
        );

        Self {
            stations: indexed,
            positions,
            lines: line_map,
            stats,
        }
    }

    #[must_use]
    pub fn stations(&self) -> &[IndexedStation] {
        &self.stations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &StationKey) -> Option<&IndexedStation> {
        self.positions.get(key).map(|&i| &self.stations[i])
    }

    #[must_use]
    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Partition the stations by the line id they reference, groups ordered by
    /// first appearance. Stations whose line did not resolve still form a
    /// group of their own (drawn in the default colour).
    #[must_use]
    pub fn by_line(&self) -> Vec<LineGroup<'_>> {
        let mut groups: IndexMap<&str, LineGroup<'_>> = IndexMap::new();
        for item in &self.stations {
            groups
                .entry(item.line_id())
                .or_insert_with(|| LineGroup {
                    line_id: item.line_id(),
                    line: item.line.as_deref(),
                    color: item.color(),
                    stations: Vec::new(),
                })
                .stations
                .push(item);
        }
        groups.into_values().collect()
    }

    /// Lines that own at least one indexed station, sorted by service then id
    #[must_use]
    pub fn line_summaries(&self) -> Vec<LineSummary> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in &self.stations {
            *counts.entry(item.line_id()).or_default() += 1;
        }

        let mut summaries: Vec<LineSummary> = self
            .lines
            .values()
            .filter_map(|line| {
                let station_count = counts.get(line.id.as_str()).copied().unwrap_or(0);
                (station_count > 0).then(|| LineSummary {
                    id: line.id.clone(),
                    label: line.label(),
                    service: line.service.clone(),
                    color: line.color(),
                    station_count,
                })
            })
            .collect();

        summaries.sort_by(|a, b| {
            a.service
                .as_deref()
                .unwrap_or_default()
                .cmp(b.service.as_deref().unwrap_or_default())
                .then_with(|| a.id.cmp(&b.id))
        });
        summaries
    }
}

fn build_search_text(station: &StationRecord, line: Option<&LineRecord>) -> String {
    let fields = [
        Some(station.station_id.as_str()),
        station.name.as_deref(),
        station.name_eng.as_deref(),
        line.and_then(|l| l.name.as_deref()),
        line.and_then(|l| l.name_eng.as_deref()),
        line.and_then(|l| l.service.as_deref()),
    ];

    fields
        .into_iter()
        .flatten()
        .map(normalize_text)
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;

    pub(crate) fn station(id: &str, line_id: &str, lat: &str, lng: &str) -> StationRecord {
        StationRecord {
            station_id: id.to_string(),
            transportation_id: line_id.to_string(),
            geo_lat: Some(lat.to_string()),
            geo_lng: Some(lng.to_string()),
            ..StationRecord::default()
        }
    }

    pub(crate) fn line(id: &str, name: &str, service: &str, color: &str) -> LineRecord {
        LineRecord {
            id: id.to_string(),
            name_eng: Some(name.to_string()),
            service: Some(service.to_string()),
            line_color_hex: Some(color.to_string()),
            ..LineRecord::default()
        }
    }

    /// A small network: two lines sharing an interchange, plus an orphan
    pub(crate) fn sample_index() -> StationIndex {
        let mut siam = station("CEN", "1", "13.7456", "100.5341");
        siam.name = Some("สยาม".to_string());
        siam.name_eng = Some("Siam".to_string());

        let mut siam_silom = station("CEN", "2", "13.7456", "100.5341");
        siam_silom.name_eng = Some("Siam".to_string());

        let mut sala_daeng = station("S2", "2", "13.7285", "100.5343");
        sala_daeng.name_eng = Some("Sala Daeng".to_string());

        let mut asok = station("E4", "1", "13.7370", "100.5603");
        asok.name_eng = Some("Asok".to_string());

        let mut orphan = station("Z1", "99", "13.8", "100.6");
        orphan.name_eng = Some("Nowhere".to_string());

        StationIndex::build(
            vec![siam, sala_daeng, asok, siam_silom, orphan],
            vec![
                line("1", "Sukhumvit", "BTS", "#7fbf3f"),
                line("2", "Silom", "BTS", "#00695c"),
                line("3", "Blue", "MRT", "#1e4e9c"),
            ],
        )
    }

    #[test]
    fn test_scenario_valid_and_invalid_coordinates() {
        let lines = vec![LineRecord {
            id: "1".to_string(),
            name: Some("Sukhumvit".to_string()),
            line_color_hex: Some("#00ff00".to_string()),
            ..LineRecord::default()
        }];
        let stations = vec![station("A", "1", "13.7", "100.5"), station("B", "1", "NaN", "100.5")];

        let index = StationIndex::build(stations, lines);

        assert_eq!(index.len(), 1);
        let entry = &index.stations()[0];
        assert_eq!(entry.key.as_str(), "A::1");
        assert_eq!(entry.color().as_str(), "#00ff00");
        assert_eq!(entry.lat, 13.7);
        assert_eq!(entry.lng, 100.5);
        assert_eq!(index.stats().skipped_coordinates, 1);
    }

    #[test]
    fn test_non_finite_coordinates_are_excluded() {
        let stations = vec![
            station("A", "1", "13.7", "100.5"),
            station("B", "1", "13.7", "Infinity"),
            station("C", "1", "", "100.5"),
            station("D", "1", "abc", "xyz"),
            StationRecord {
                station_id: "E".to_string(),
                transportation_id: "1".to_string(),
                ..StationRecord::default()
            },
        ];

        let index = StationIndex::build(stations, Vec::new());

        assert_eq!(index.len(), 1);
        assert!(index.len() <= index.stats().input_stations);
        assert!(index.stations().iter().all(|s| s.lat.is_finite() && s.lng.is_finite()));
    }

    #[test]
    fn test_keys_are_unique() {
        let index = sample_index();
        let keys: HashSet<_> = index.stations().iter().map(|s| s.key.clone()).collect();
        assert_eq!(keys.len(), index.len());
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let mut first = station("A", "1", "1.0", "2.0");
        first.name_eng = Some("First".to_string());
        let mut second = station("A", "1", "3.0", "4.0");
        second.name_eng = Some("Second".to_string());

        let index = StationIndex::build(vec![first, second], Vec::new());

        assert_eq!(index.len(), 1);
        assert_eq!(index.stations()[0].station.name_eng.as_deref(), Some("First"));
        assert_eq!(index.stats().duplicate_keys, 1);
    }

    #[test]
    fn test_shared_station_gets_one_entry_per_line() {
        let index = sample_index();
        assert!(index.get(&StationKey::new("CEN", "1")).is_some());
        assert!(index.get(&StationKey::new("CEN", "2")).is_some());
        assert!(index.get(&StationKey::new("CEN", "3")).is_none());
    }

    #[test]
    fn test_orphan_station_has_no_line() {
        let index = sample_index();
        let orphan = index.get(&StationKey::new("Z1", "99")).expect("orphan is indexed");
        assert!(orphan.line.is_none());
        assert_eq!(orphan.line_label(), "Unknown line");
        assert_eq!(orphan.color().as_str(), crate::constants::DEFAULT_LINE_COLOR);
    }

    #[test]
    fn test_unnamed_line_label() {
        let unnamed = LineRecord {
            id: "7".to_string(),
            name: None,
            name_eng: None,
            service: Some("MRT".to_string()),
            line_color_hex: Some("#123456".to_string()),
        };
        let index = StationIndex::build(vec![station("P1", "7", "13.8", "100.5")], vec![unnamed]);
        let item = index.get(&StationKey::new("P1", "7")).expect("station is indexed");

        assert!(item.line.is_some());
        assert_eq!(item.line_label(), "Unknown line");
        assert_eq!(item.color().as_str(), "#123456");
    }

    #[test]
    fn test_input_order_is_preserved() {
        let index = sample_index();
        let keys: Vec<&str> = index.stations().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["CEN::1", "S2::2", "E4::1", "CEN::2", "Z1::99"]);
    }

    #[test]
    fn test_search_text() {
        let index = sample_index();
        let siam = index.get(&StationKey::new("CEN", "1")).expect("siam is indexed");
        assert_eq!(siam.search_text, "cen สยาม siam sukhumvit bts");

        let orphan = index.get(&StationKey::new("Z1", "99")).expect("orphan is indexed");
        assert_eq!(orphan.search_text, "z1 nowhere");
    }

    #[test]
    fn test_search_text_trims_fields() {
        let mut padded = station("  X9 ", "1", "1", "1");
        padded.name_eng = Some("  Mo Chit  ".to_string());
        let index = StationIndex::build(vec![padded], vec![line("1", " Sukhumvit ", "BTS", "#000000")]);
        assert_eq!(index.stations()[0].search_text, "x9 mo chit sukhumvit bts");
    }

    #[test]
    fn test_duplicate_line_ids_last_write_wins() {
        let lines = vec![line("1", "Old", "BTS", "#111111"), line("1", "New", "BTS", "#222222")];
        let index = StationIndex::build(vec![station("A", "1", "1", "1")], lines);

        assert_eq!(index.stations()[0].line_label(), "New");
        assert_eq!(index.stats().duplicate_line_ids, 1);
        assert_eq!(index.line_summaries().len(), 1);
    }

    #[test]
    fn test_by_line_groups_in_first_appearance_order() {
        let index = sample_index();
        let groups = index.by_line();

        let ids: Vec<&str> = groups.iter().map(|g| g.line_id).collect();
        assert_eq!(ids, vec!["1", "2", "99"]);

        let sukhumvit: Vec<&str> = groups[0].stations.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(sukhumvit, vec!["CEN::1", "E4::1"]);
        assert_eq!(groups[0].color.as_str(), "#7fbf3f");
        assert!(groups[2].line.is_none());

        let total: usize = groups.iter().map(|g| g.stations.len()).sum();
        assert_eq!(total, index.len());
    }

    #[test]
    fn test_line_summaries_skip_empty_lines_and_sort() {
        let index = sample_index();
        let summaries = index.line_summaries();

        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(summaries[0].station_count, 2);
        assert_eq!(summaries[0].subtitle(), "BTS • 2 stations");
    }

    #[test]
    fn test_line_summaries_sort_by_service_first() {
        let stations = vec![
            station("A", "1", "1", "1"),
            station("B", "2", "1", "1"),
            station("C", "3", "1", "1"),
        ];
        let lines = vec![
            line("1", "One", "MRT", "#000000"),
            line("2", "Two", "BTS", "#000000"),
            line("3", "Three", "ARL", "#000000"),
        ];
        let index = StationIndex::build(stations, lines);

        let ids: Vec<String> = index.line_summaries().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_summary_subtitle_without_service() {
        let summary = LineSummary {
            id: "1".to_string(),
            label: "Line 1".to_string(),
            service: None,
            color: LineColor::default(),
            station_count: 4,
        };
        assert_eq!(summary.subtitle(), "4 stations");
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = sample_index();
        let b = sample_index();
        assert_eq!(a.stations(), b.stations());
    }
}
