//! Application state - single source of truth

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::cache::EntryCache;
use crate::view::{DetailView, ListTile};

/// Viewing angles, in grid column order.
pub const SPRITE_POVS: [&str; 2] = ["front", "back"];
/// Visual variants, in grid row order.
pub const SPRITE_VARIANTS: [&str; 2] = ["default", "shiny"];
/// Sprite used as the list thumbnail.
pub const THUMBNAIL_SPRITE: &str = "front_default";

pub fn sprite_key(pov: &str, variant: &str) -> String {
    format!("{pov}_{variant}")
}

/// Minimal listing record from the catalog endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    pub name: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatEntry {
    pub name: String,
    pub base_value: u16,
}

/// Per-entry payload from the detail endpoint.
///
/// `stats` and `categories` are `None` when the upstream response omitted
/// them; such a record renders as a placeholder instead of a panel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetailRecord {
    pub name: String,
    pub order: i32,
    pub stats: Option<Vec<StatEntry>>,
    pub categories: Option<Vec<String>>,
    /// Sprite key (`front_default`, `back_shiny`, ...) to image URL
    pub sprites: BTreeMap<String, String>,
}

impl DetailRecord {
    pub fn sprite(&self, key: &str) -> Option<&str> {
        self.sprites.get(key).map(String::as_str)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.sprite(THUMBNAIL_SPRITE)
    }
}

/// Outcome of a detail lookup, as seen by the controller
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum DetailLookup {
    Found(DetailRecord),
    /// The upstream has no entry with this name
    NotFound(String),
    /// Transport, status or decode failure
    TransientError(String),
}

impl DetailLookup {
    pub fn record(&self) -> Option<&DetailRecord> {
        match self {
            DetailLookup::Found(record) => Some(record),
            DetailLookup::NotFound(_) | DetailLookup::TransientError(_) => None,
        }
    }
}

/// What triggered a detail lookup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LookupOrigin {
    Entry,
    Search,
}

/// The two mutually exclusive panels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ViewState {
    #[default]
    List,
    Detail,
}

pub const ALERT_EMPTY_INPUT: &str = "Input is empty!";
pub const ALERT_NOT_FOUND: &str = "Pokemon not found!";

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Catalog lifecycle: Empty → Loading → Loaded
    #[debug(section = "Catalog", label = "Tiles", debug_fmt)]
    pub tiles: DataResource<Vec<ListTile>>,

    #[debug(section = "Catalog", label = "Selected")]
    pub selected: usize,

    #[debug(section = "View", label = "Panel", debug_fmt)]
    pub view: ViewState,

    /// Rendered detail content; at most one panel exists at a time
    #[debug(skip)]
    pub detail: Option<DetailView>,

    /// Name of the lookup currently in flight, if any
    #[debug(section = "View", label = "Pending", debug_fmt)]
    pub pending: Option<String>,

    /// Message of the open alert dialog
    #[debug(section = "View", label = "Alert", debug_fmt)]
    pub alert: Option<String>,

    #[debug(skip)]
    pub cache: EntryCache,

    #[debug(section = "Search", label = "Query")]
    pub search_query: String,

    #[debug(section = "Search", label = "Focused")]
    pub search_focused: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tiles: DataResource::Empty,
            selected: 0,
            view: ViewState::List,
            detail: None,
            pending: None,
            alert: None,
            cache: EntryCache::new(),
            search_query: String::new(),
            search_focused: false,
        }
    }

    pub fn tiles(&self) -> &[ListTile] {
        self.tiles.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn selected_tile(&self) -> Option<&ListTile> {
        self.tiles().get(self.selected)
    }

    pub fn is_list_visible(&self) -> bool {
        self.view == ViewState::List
    }

    pub fn is_detail_visible(&self) -> bool {
        self.view == ViewState::Detail
    }

    pub fn alert_open(&self) -> bool {
        self.alert.is_some()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
