/// Location of the station dataset, relative to the page
pub const STATIONS_PATH: &str = "data/data_transport_station.json";

/// Location of the line dataset, relative to the page
pub const LINES_PATH: &str = "data/data_transport_line.json";

/// Initial map centre (Bangkok)
pub const DEFAULT_CENTER: (f64, f64) = (13.7563, 100.5018);

pub const DEFAULT_ZOOM: f64 = 11.0;

/// Minimum zoom used when flying to a search result
pub const FOCUS_ZOOM: f64 = 14.0;

/// Duration of the fly-to animation in seconds
pub const FOCUS_DURATION_SECS: f64 = 0.6;

/// Colour used when a line has no valid `#rrggbb` colour
pub const DEFAULT_LINE_COLOR: &str = "#6ea8fe";

/// Upper bound on the candidates a single search collects
pub const MAX_SEARCH_CANDIDATES: usize = 80;

/// Number of search results rendered in the sidebar
pub const MAX_DISPLAYED_RESULTS: usize = 12;

pub const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const TILE_MAX_ZOOM: f64 = 19.0;

pub const MARKER_RADIUS: f64 = 6.0;
pub const MARKER_WEIGHT: f64 = 2.0;
pub const MARKER_FILL_OPACITY: f64 = 0.75;

/// Padding in pixels applied when fitting the map to all stations
pub const FIT_BOUNDS_PADDING: f64 = 30.0;

pub const UNKNOWN_LINE_LABEL: &str = "Unknown line";
