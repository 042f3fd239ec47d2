use std::collections::HashMap;
use indexmap::IndexMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use crate::constants::{
    DEFAULT_CENTER, DEFAULT_ZOOM, FIT_BOUNDS_PADDING, FOCUS_DURATION_SECS, FOCUS_ZOOM,
    MARKER_FILL_OPACITY, MARKER_RADIUS, MARKER_WEIGHT, TILE_ATTRIBUTION, TILE_MAX_ZOOM, TILE_URL,
};
use crate::index::{IndexedStation, StationIndex, StationKey};
use crate::models::LineColor;
use crate::presentation::PopupContent;
use crate::viewer::MapSurface;

/// A Leaflet map with one layer group per line
///
/// Leaflet is expected on `window.L`; every call goes through
/// `js_sys::Reflect` so the crate carries no Leaflet bindings of its own.
pub struct LeafletMap {
    map: JsValue,
    layers: IndexMap<String, JsValue>,
    markers: HashMap<StationKey, JsValue>,
}

impl LeafletMap {
    /// Create the map inside `container` with the OpenStreetMap tile layer.
    ///
    /// # Errors
    ///
    /// Fails if Leaflet is not loaded or rejects a call.
    pub fn mount(container: &web_sys::HtmlElement) -> Result<Self, JsValue> {
        let l = leaflet()?;

        // L.map(container, { zoomControl: true }).setView([lat, lng], zoom)
        let map_options = object(&[("zoomControl", JsValue::TRUE)])?;
        let map = call(&l, "map", &[container, &map_options])?;
        let (lat, lng) = DEFAULT_CENTER;
        call(&map, "setView", &[&lat_lng(lat, lng), &JsValue::from_f64(DEFAULT_ZOOM)])?;

        // L.tileLayer(url, options).addTo(map)
        let tile_options = object(&[
            ("maxZoom", JsValue::from_f64(TILE_MAX_ZOOM)),
            ("attribution", JsValue::from_str(TILE_ATTRIBUTION)),
        ])?;
        let tiles = call(&l, "tileLayer", &[&JsValue::from_str(TILE_URL), &tile_options])?;
        call(&tiles, "addTo", &[&map])?;

        Ok(Self {
            map,
            layers: IndexMap::new(),
            markers: HashMap::new(),
        })
    }

    /// Build a layer group per line and a circle marker per station, then fit
    /// the view to all stations. Layers are created hidden; showing them is
    /// up to the caller.
    ///
    /// # Errors
    ///
    /// Fails if Leaflet is missing. Individual markers that Leaflet rejects
    /// are logged and skipped.
    pub fn render(&mut self, index: &StationIndex) -> Result<(), JsValue> {
        let l = leaflet()?;
        let bounds = js_sys::Array::new();

        for group in index.by_line() {
            let layer = call(&l, "layerGroup", &[])?;

            for item in &group.stations {
                match add_station_marker(&l, &layer, item, &group.color) {
                    Ok(marker) => {
                        self.markers.insert(item.key.clone(), marker);
                        bounds.push(&lat_lng(item.lat, item.lng));
                    }
                    Err(e) => leptos::logging::error!("Failed to add marker {}: {:?}", item.key, e),
                }
            }

            self.layers.insert(group.line_id.to_string(), layer);
        }

        crate::log!("Rendered {} markers in {} layers", self.markers.len(), self.layers.len());

        if bounds.length() > 0 {
            let padding = js_sys::Array::of2(
                &JsValue::from_f64(FIT_BOUNDS_PADDING),
                &JsValue::from_f64(FIT_BOUNDS_PADDING),
            );
            let options = object(&[("padding", padding.into())])?;
            call(&self.map, "fitBounds", &[&bounds, &options])?;
        }

        Ok(())
    }

    /// Recompute the map size after its container changed
    pub fn invalidate_size(&self) {
        if let Err(e) = call(&self.map, "invalidateSize", &[]) {
            leptos::logging::error!("Failed to invalidate map size: {:?}", e);
        }
    }

    fn try_focus(&self, station: &IndexedStation) -> Result<(), JsValue> {
        let current_zoom = call(&self.map, "getZoom", &[])?.as_f64().unwrap_or(DEFAULT_ZOOM);
        let options = object(&[("duration", JsValue::from_f64(FOCUS_DURATION_SECS))])?;
        call(
            &self.map,
            "flyTo",
            &[
                &lat_lng(station.lat, station.lng),
                &JsValue::from_f64(current_zoom.max(FOCUS_ZOOM)),
                &options,
            ],
        )?;

        if let Some(marker) = self.markers.get(&station.key) {
            call(marker, "openPopup", &[])?;
        }
        Ok(())
    }
}

impl MapSurface for LeafletMap {
    fn show_line(&mut self, line_id: &str) {
        let Some(layer) = self.layers.get(line_id) else { return };
        if let Err(e) = call(layer, "addTo", &[&self.map]) {
            leptos::logging::error!("Failed to show line {}: {:?}", line_id, e);
        }
    }

    fn hide_line(&mut self, line_id: &str) {
        let Some(layer) = self.layers.get(line_id) else { return };
        if let Err(e) = call(&self.map, "removeLayer", &[layer]) {
            leptos::logging::error!("Failed to hide line {}: {:?}", line_id, e);
        }
    }

    fn focus_station(&mut self, station: &IndexedStation) {
        if let Err(e) = self.try_focus(station) {
            leptos::logging::error!("Failed to focus station {}: {:?}", station.key, e);
        }
    }
}

fn add_station_marker(
    l: &JsValue,
    layer: &JsValue,
    item: &IndexedStation,
    color: &LineColor,
) -> Result<JsValue, JsValue> {
    let options = object(&[
        ("radius", JsValue::from_f64(MARKER_RADIUS)),
        ("color", JsValue::from_str(color.as_str())),
        ("weight", JsValue::from_f64(MARKER_WEIGHT)),
        ("fillColor", JsValue::from_str(color.as_str())),
        ("fillOpacity", JsValue::from_f64(MARKER_FILL_OPACITY)),
    ])?;
    let marker = call(l, "circleMarker", &[&lat_lng(item.lat, item.lng), &options])?;

    let popup_options = object(&[("closeButton", JsValue::TRUE)])?;
    let popup_html = PopupContent::for_station(item).to_html();
    call(&marker, "bindPopup", &[&JsValue::from_str(&popup_html), &popup_options])?;
    call(&marker, "addTo", &[layer])?;

    Ok(marker)
}

fn leaflet() -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let l = js_sys::Reflect::get(&window, &JsValue::from_str("L"))?;
    if l.is_undefined() {
        return Err(JsValue::from_str("Leaflet (window.L) is not loaded"));
    }
    Ok(l)
}

/// `target[name](...args)`
fn call(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let function = js_sys::Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| JsValue::from_str(&format!("{name} not a function")))?;

    let array = js_sys::Array::new();
    for arg in args {
        array.push(arg);
    }
    function.apply(target, &array)
}

fn object(entries: &[(&str, JsValue)]) -> Result<js_sys::Object, JsValue> {
    let options = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&options, &JsValue::from_str(key), value)?;
    }
    Ok(options)
}

fn lat_lng(lat: f64, lng: f64) -> js_sys::Array {
    js_sys::Array::of2(&JsValue::from_f64(lat), &JsValue::from_f64(lng))
}
