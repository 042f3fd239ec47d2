use leptos::{component, create_memo, create_node_ref, create_signal, event_target_value, view, For, IntoView, ReadSignal, SignalGet, SignalSet, SignalUpdate};
use crate::components::app::{ready_index, LoadState, ViewerSignal};
use crate::constants::MAX_DISPLAYED_RESULTS;
use crate::index::StationKey;
use crate::presentation::ResultRow;
use crate::search::search;

/// What the results panel currently shows
#[derive(Debug, Clone, PartialEq)]
enum ResultsView {
    Empty,
    NoMatches,
    Rows {
        rows: Vec<ResultRow>,
        note: Option<String>,
    },
    LoadFailed,
}

#[component]
#[must_use]
pub fn SearchPanel(load_state: ReadSignal<LoadState>, viewer: ViewerSignal) -> impl IntoView {
    let (query, set_query) = create_signal(String::new());
    let input_ref = create_node_ref::<leptos::html::Input>();

    let results = create_memo(move |_| {
        if matches!(load_state.get(), LoadState::Failed) {
            return ResultsView::LoadFailed;
        }
        let Some(index) = ready_index(load_state) else {
            return ResultsView::Empty;
        };

        let results = search(&index, &query.get());
        if results.is_cleared() {
            ResultsView::Empty
        } else if results.is_empty() {
            ResultsView::NoMatches
        } else {
            ResultsView::Rows {
                rows: results
                    .displayed(MAX_DISPLAYED_RESULTS)
                    .iter()
                    .map(|item| ResultRow::for_station(item))
                    .collect(),
                note: results.truncation_note(MAX_DISPLAYED_RESULTS),
            }
        }
    });

    let clear = move |_| {
        set_query.set(String::new());
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    };

    let reveal = move |key: StationKey| {
        viewer.update(|viewer| {
            if let Some(viewer) = viewer {
                viewer.reveal(&key);
            }
        });
    };

    view! {
        <section class="search">
            <div class="search__row">
                <input
                    id="search"
                    type="search"
                    placeholder="Search stations, lines, services…"
                    autocomplete="off"
                    node_ref=input_ref
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button id="clear" class="link-button" on:click=clear>"Clear"</button>
            </div>

            <div class="results" id="results">
                {move || match results.get() {
                    ResultsView::Empty => view! {}.into_view(),
                    ResultsView::NoMatches => view! {
                        <div class="muted">"No matches. Try another spelling."</div>
                    }.into_view(),
                    ResultsView::LoadFailed => view! {
                        <div class="muted">
                            "Could not load the JSON files. Run a local server (not file://) and refresh."
                        </div>
                    }.into_view(),
                    ResultsView::Rows { rows, note } => view! {
                        <For
                            each=move || rows.clone()
                            key=|row| row.key.clone()
                            children=move |row| view! { <ResultItem row=row on_select=reveal /> }
                        />
                        {note.map(|note| view! { <div class="muted">{note}</div> })}
                    }.into_view(),
                }}
            </div>
        </section>
    }
}

#[component]
fn ResultItem(row: ResultRow, on_select: impl Fn(StationKey) + 'static) -> impl IntoView {
    let key = row.key.clone();

    view! {
        <div class="result" on:click=move |_| on_select(key.clone())>
            <div class="result__top">
                <div>{row.title}</div>
                <div class="badge">{row.badge}</div>
            </div>
            {row.subtitle.map(|subtitle| view! { <div class="muted">{subtitle}</div> })}
            <div class="muted">{row.line_name}</div>
        </div>
    }
}
