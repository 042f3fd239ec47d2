use leptos::{component, create_effect, create_node_ref, store_value, view, IntoView, ReadSignal, SignalGet, SignalSet, SignalWithUntracked};
use crate::components::app::{ready_index, LoadState, ViewerSignal};
use crate::map::LeafletMap;
use crate::viewer::Viewer;

#[component]
#[must_use]
pub fn MapView(load_state: ReadSignal<LoadState>, viewer: ViewerSignal) -> impl IntoView {
    let map_container_ref = create_node_ref::<leptos::html::Div>();
    let pending_map = store_value(None::<LeafletMap>);

    // Show the base map as soon as the container is mounted, before data arrives
    create_effect(move |_| {
        let Some(container) = map_container_ref.get() else { return };
        if pending_map.with_value(Option::is_some) || viewer.with_untracked(Option::is_some) {
            return;
        }

        let container_element: &web_sys::HtmlElement = &container;
        match LeafletMap::mount(container_element) {
            Ok(map) => pending_map.set_value(Some(map)),
            Err(e) => leptos::logging::error!("Failed to initialize Leaflet map: {:?}", e),
        }
    });

    // Draw the stations once both the map and the index exist
    create_effect(move |_| {
        let Some(index) = ready_index(load_state) else { return };
        if map_container_ref.get().is_none() {
            return;
        }

        let mut taken = None;
        pending_map.update_value(|slot| taken = slot.take());
        let Some(mut map) = taken else { return };

        if let Err(e) = map.render(&index) {
            leptos::logging::error!("Failed to render stations: {:?}", e);
            return;
        }
        map.invalidate_size();
        viewer.set(Some(Viewer::new(index, map)));
    });

    view! {
        <div class="map" id="map" node_ref=map_container_ref></div>
    }
}
