//! Actions - everything that can happen to the app

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cache::EntryCache;
use crate::state::{DetailLookup, LookupOrigin};
use crate::view::ListTile;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: load the catalog and every entry's detail
    Init,

    // ===== Catalog category =====
    /// Result: catalog populated, with the cache built along the way
    CatalogDidLoad {
        tiles: Vec<ListTile>,
        cache: EntryCache,
    },

    // ===== Entry category =====
    /// Move the list selection to a tile
    EntrySelect(usize),

    /// Open the detail panel for a tile
    EntryOpen(usize),

    // ===== Detail category =====
    /// Result: a detail lookup started by an open or a search finished.
    /// `name` is the name that was requested.
    DetailDidResolve {
        name: String,
        origin: LookupOrigin,
        lookup: DetailLookup,
    },

    /// Leave the detail panel
    DetailBack,

    // ===== Search category =====
    SearchFocus,
    SearchBlur,
    SearchQueryChange(String),
    SearchSubmit(String),

    // ===== Alert category =====
    AlertDismiss,

    // ===== Uncategorized (global) =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    Quit,
}
