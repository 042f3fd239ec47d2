use leptos::{component, create_memo, event_target_checked, view, For, IntoView, ReadSignal, SignalGet, SignalUpdate, SignalWith};
use crate::components::app::{ready_index, LoadState, ViewerSignal};
use crate::index::LineSummary;

#[component]
#[must_use]
pub fn LineFilters(load_state: ReadSignal<LoadState>, viewer: ViewerSignal) -> impl IntoView {
    let summaries = create_memo(move |_| {
        ready_index(load_state).map(|index| index.line_summaries()).unwrap_or_default()
    });

    view! {
        <div class="line-filters" id="lineFilters">
            <For
                each=move || summaries.get()
                key=|summary| summary.id.clone()
                children=move |summary| view! { <LineFilter summary=summary viewer=viewer /> }
            />
        </div>
    }
}

#[component]
fn LineFilter(summary: LineSummary, viewer: ViewerSignal) -> impl IntoView {
    let line_id = summary.id.clone();
    let checked = move || {
        viewer.with(|viewer| {
            viewer
                .as_ref()
                .map_or(true, |viewer| viewer.filters().is_visible(&line_id))
        })
    };

    let line_id = summary.id.clone();
    let on_change = move |ev| {
        let visible = event_target_checked(&ev);
        viewer.update(|viewer| {
            if let Some(viewer) = viewer {
                viewer.set_line_visible(&line_id, visible);
            }
        });
    };

    view! {
        <label class="filter">
            <input
                type="checkbox"
                aria-label=format!("Toggle {}", summary.label)
                prop:checked=checked
                on:change=on_change
            />
            <div class="swatch" style=format!("background:{}", summary.color)></div>
            <div class="filter__meta">
                <div class="filter__name">{summary.label.clone()}</div>
                <div class="filter__sub">{summary.subtitle()}</div>
            </div>
        </label>
    }
}
