mod line;
mod serde_helpers;
mod station;

pub use line::{LineColor, LineRecord};
pub use station::{parse_coordinate, StationRecord};
