//! Viewer state: the index snapshot, the line filters and the map they drive.

use std::rc::Rc;
use crate::filter::FilterState;
use crate::index::{IndexedStation, StationIndex, StationKey};

/// What the viewer needs from a map
///
/// Implementations keep one layer per line id and one marker per station
/// key. Showing an already shown line (or hiding a hidden one) must be
/// harmless.
pub trait MapSurface {
    fn show_line(&mut self, line_id: &str);
    fn hide_line(&mut self, line_id: &str);
    /// Centre on the station and open its popup
    fn focus_station(&mut self, station: &IndexedStation);
}

pub struct Viewer<S> {
    index: Rc<StationIndex>,
    filters: FilterState,
    surface: S,
}

impl<S: MapSurface> Viewer<S> {
    /// Every line layer starts shown. Only lines listed in the filter panel
    /// get a flag; layers of unresolved line ids stay on permanently.
    pub fn new(index: Rc<StationIndex>, mut surface: S) -> Self {
        let filters = FilterState::new(index.line_summaries().into_iter().map(|summary| summary.id));
        for group in index.by_line() {
            surface.show_line(group.line_id);
        }
        Self {
            index,
            filters,
            surface,
        }
    }

    #[must_use]
    pub fn index(&self) -> &StationIndex {
        &self.index
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn set_line_visible(&mut self, line_id: &str, visible: bool) {
        if !self.filters.contains(line_id) {
            return;
        }
        self.filters.set_visible(line_id, visible);
        self.apply(line_id, visible);
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        self.filters.set_all(visible);
        let ids: Vec<String> = self.filters.line_ids().map(str::to_string).collect();
        for id in &ids {
            self.apply(id, visible);
        }
    }

    /// Make sure the station's line is shown, then focus the station.
    /// Returns `false` for a key that is not in the index.
    pub fn reveal(&mut self, key: &StationKey) -> bool {
        let index = Rc::clone(&self.index);
        let Some(item) = index.get(key) else {
            return false;
        };

        if !self.filters.is_visible(item.line_id()) {
            self.set_line_visible(item.line_id(), true);
        }
        self.surface.focus_station(item);
        true
    }

    fn apply(&mut self, line_id: &str, visible: bool) {
        if visible {
            self.surface.show_line(line_id);
        } else {
            self.surface.hide_line(line_id);
        }
    }
}
