use leptos::{component, view, IntoView, ReadSignal, SignalGet, SignalUpdate};
use crate::components::app::{LoadState, ViewerSignal};
use crate::components::line_filters::LineFilters;
use crate::components::search_panel::SearchPanel;

#[component]
#[must_use]
pub fn Sidebar(load_state: ReadSignal<LoadState>, viewer: ViewerSignal) -> impl IntoView {
    let summary = move || match load_state.get() {
        LoadState::Loading => "Loading datasets…".to_string(),
        LoadState::Ready(index) => {
            format!("{} stations • {} lines", index.len(), index.line_summaries().len())
        }
        LoadState::Failed => "Failed to load data.".to_string(),
    };

    let show_all = move |_| {
        viewer.update(|viewer| {
            if let Some(viewer) = viewer {
                viewer.set_all_visible(true);
            }
        });
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <h1>"Bangkok Transit Map"</h1>
                <p class="summary" id="summary">{summary}</p>
            </div>

            <SearchPanel load_state=load_state viewer=viewer />

            <section class="lines">
                <div class="lines__header">
                    <h2>"Lines"</h2>
                    <button id="showAll" class="link-button" on:click=show_all>
                        "Show all"
                    </button>
                </div>
                <LineFilters load_state=load_state viewer=viewer />
            </section>
        </aside>
    }
}
