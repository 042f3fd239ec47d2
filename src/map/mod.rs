mod leaflet;

pub use leaflet::LeafletMap;
