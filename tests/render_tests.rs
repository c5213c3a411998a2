//! Full-screen render tests using RenderHarness

use pokecatalog::{
    cache::EntryCache,
    components::{CatalogScreen, CatalogScreenProps, Component, SEARCH_BUTTON},
    state::{AppState, DetailRecord, ViewState, ALERT_NOT_FOUND},
    view::{build_detail_view, DetailView, ListTile},
};
use tui_dispatch::{testing::*, DataResource};

fn render_screen(state: &AppState, width: u16, height: u16) -> String {
    let mut render = RenderHarness::new(width, height);
    let mut screen = CatalogScreen::new();
    render.render_to_string_plain(|frame| {
        let props = CatalogScreenProps {
            state,
            is_focused: true,
        };
        screen.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_loading_catalog() {
    let state = AppState {
        tiles: DataResource::Loading,
        ..Default::default()
    };

    let output = render_screen(&state, 70, 20);

    assert!(output.contains("Loading Pok"), "{output}");
    assert!(output.contains(SEARCH_BUTTON));
}

#[test]
fn test_render_list_tiles() {
    let state = AppState {
        tiles: DataResource::Loaded(vec![
            ListTile::Entry {
                name: "bulbasaur".into(),
                number: 1,
                thumbnail: Some("url1".into()),
            },
            ListTile::Error {
                name: "ivysaur".into(),
                message: "Unable to load details for ivysaur.".into(),
            },
        ]),
        ..Default::default()
    };

    let output = render_screen(&state, 80, 20);

    assert!(output.contains("bulbasaur"), "{output}");
    assert!(output.contains("#   1"));
    assert!(output.contains("Unable to load details for ivysaur."));
    assert!(!output.contains("Back!"));
}

#[test]
fn test_render_detail_hides_list() {
    let mut cache = EntryCache::new();
    let record = DetailRecord {
        name: "bulbasaur".into(),
        order: 1,
        stats: Some(Vec::new()),
        categories: Some(vec!["grass".into(), "poison".into()]),
        ..Default::default()
    };
    cache.put("bulbasaur", record.clone());
    let state = AppState {
        tiles: DataResource::Loaded(vec![ListTile::Entry {
            name: "venusaur".into(),
            number: 3,
            thumbnail: None,
        }]),
        view: ViewState::Detail,
        detail: Some(build_detail_view(&record, &cache)),
        cache,
        ..Default::default()
    };

    let output = render_screen(&state, 80, 30);

    assert!(output.contains("poison"), "{output}");
    assert!(output.contains("(no image)"));
    assert!(!output.contains("venusaur"));
}

#[test]
fn test_render_placeholder() {
    let state = AppState {
        view: ViewState::Detail,
        detail: Some(DetailView::unavailable()),
        ..Default::default()
    };

    let output = render_screen(&state, 80, 20);

    assert!(output.contains("Unable to display Pokemon details."), "{output}");
}

#[test]
fn test_render_alert_over_list() {
    let state = AppState {
        tiles: DataResource::Loaded(Vec::new()),
        alert: Some(ALERT_NOT_FOUND.into()),
        ..Default::default()
    };

    let output = render_screen(&state, 80, 24);

    assert!(output.contains(ALERT_NOT_FOUND), "{output}");
    assert!(output.contains("[ OK ]"));
}
