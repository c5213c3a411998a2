//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{
    AppState, DetailLookup, LookupOrigin, ViewState, ALERT_EMPTY_INPUT, ALERT_NOT_FOUND,
};
use crate::view::{build_detail_view, DetailView, ListTile};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.tiles = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadCatalog)
        }

        // ===== Catalog actions =====
        Action::CatalogDidLoad { tiles, cache } => {
            state.cache.absorb(cache);
            state.tiles = DataResource::Loaded(tiles);
            state.selected = 0;
            DispatchResult::changed()
        }

        // ===== Entry actions =====
        Action::EntrySelect(index) => {
            if index < state.tiles().len() && index != state.selected {
                state.selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::EntryOpen(index) => {
            let Some(ListTile::Entry { name, .. }) = state.tiles().get(index).cloned() else {
                return DispatchResult::unchanged();
            };
            state.selected = index;
            match state.cache.get(&name) {
                Some(record) => {
                    let view = build_detail_view(record, &state.cache);
                    show_detail(state, view);
                    DispatchResult::changed()
                }
                None => {
                    state.pending = Some(name.clone());
                    DispatchResult::changed_with(Effect::FetchDetail {
                        name,
                        origin: LookupOrigin::Entry,
                    })
                }
            }
        }

        // ===== Detail actions =====
        Action::DetailDidResolve {
            name,
            origin,
            lookup,
        } => {
            if state.pending.as_deref() == Some(name.as_str()) {
                state.pending = None;
            }
            resolve_lookup(state, origin, lookup);
            DispatchResult::changed()
        }

        Action::DetailBack => {
            if state.view == ViewState::List && state.detail.is_none() {
                return DispatchResult::unchanged();
            }
            state.detail = None;
            state.view = ViewState::List;
            tracing::debug!("back to list");
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchFocus => {
            if state.search_focused {
                return DispatchResult::unchanged();
            }
            state.search_focused = true;
            DispatchResult::changed()
        }

        Action::SearchBlur => {
            if !state.search_focused {
                return DispatchResult::unchanged();
            }
            state.search_focused = false;
            DispatchResult::changed()
        }

        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            state.search_query = query.clone();
            if query.is_empty() {
                state.alert = Some(ALERT_EMPTY_INPUT.to_string());
                return DispatchResult::changed();
            }

            state.detail = None;
            match state.cache.get(&query) {
                Some(record) => {
                    let view = build_detail_view(record, &state.cache);
                    show_search_result(state, view);
                    DispatchResult::changed()
                }
                None => {
                    state.pending = Some(query.clone());
                    DispatchResult::changed_with(Effect::FetchDetail {
                        name: query,
                        origin: LookupOrigin::Search,
                    })
                }
            }
        }

        // ===== Alert actions =====
        Action::AlertDismiss => {
            if state.alert.take().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn resolve_lookup(state: &mut AppState, origin: LookupOrigin, lookup: DetailLookup) {
    match lookup {
        DetailLookup::Found(record) => {
            let name = record.name.clone();
            state.cache.put(name.clone(), record);
            let view = state
                .cache
                .get(&name)
                .map(|stored| build_detail_view(stored, &state.cache))
                .unwrap_or_else(DetailView::unavailable);
            match origin {
                LookupOrigin::Entry => show_detail(state, view),
                LookupOrigin::Search => show_search_result(state, view),
            }
        }
        DetailLookup::NotFound(_) | DetailLookup::TransientError(_)
            if origin == LookupOrigin::Entry =>
        {
            show_detail(state, DetailView::unavailable());
        }
        DetailLookup::NotFound(_) | DetailLookup::TransientError(_) => {
            state.alert = Some(ALERT_NOT_FOUND.to_string());
        }
    }
}

/// Replace any rendered detail content with `view` and switch panels.
fn show_detail(state: &mut AppState, view: DetailView) {
    tracing::debug!(ready = view.is_ready(), "showing detail panel");
    state.detail = Some(view);
    state.view = ViewState::Detail;
    state.search_focused = false;
}

/// Search results only switch panels when the record renders.
fn show_search_result(state: &mut AppState, view: DetailView) {
    if view.is_ready() {
        show_detail(state, view);
    } else {
        state.alert = Some(ALERT_NOT_FOUND.to_string());
    }
}
