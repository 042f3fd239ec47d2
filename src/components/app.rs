use std::rc::Rc;
use leptos::{component, create_rw_signal, create_signal, spawn_local, view, IntoView, ReadSignal, RwSignal, SignalSet, SignalWith, WriteSignal};
use leptos_meta::{provide_meta_context, Meta, Title};
use crate::api::{load_datasets, BrowserFetch, DatasetPaths};
use crate::components::map_view::MapView;
use crate::components::sidebar::Sidebar;
use crate::index::StationIndex;
use crate::map::LeafletMap;
use crate::viewer::Viewer;

/// Boot progress, shared by the sidebar and the map
#[derive(Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Rc<StationIndex>),
    Failed,
}

/// The live viewer once the map and the index are both ready
pub type ViewerSignal = RwSignal<Option<Viewer<LeafletMap>>>;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (load_state, set_load_state) = create_signal(LoadState::Loading);
    let viewer: ViewerSignal = create_rw_signal(None);

    boot(set_load_state);

    view! {
        <Title text="Bangkok Transit Map"/>
        <Meta name="description" content="Rail stations and lines on an interactive map"/>

        <div class="app">
            <Sidebar load_state=load_state viewer=viewer />
            <MapView load_state=load_state viewer=viewer />
        </div>
    }
}

fn boot(set_load_state: WriteSignal<LoadState>) {
    spawn_local(async move {
        match load_datasets(&BrowserFetch, &DatasetPaths::default()).await {
            Ok(datasets) => {
                let index = StationIndex::build(datasets.stations, datasets.lines);
                set_load_state.set(LoadState::Ready(Rc::new(index)));
            }
            Err(e) => {
                leptos::logging::error!("{e}");
                set_load_state.set(LoadState::Failed);
            }
        }
    });
}

/// The index, once loading succeeded (tracks `load_state`)
#[must_use]
pub fn ready_index(load_state: ReadSignal<LoadState>) -> Option<Rc<StationIndex>> {
    load_state.with(|state| match state {
        LoadState::Ready(index) => Some(Rc::clone(index)),
        _ => None,
    })
}
