//! Declarative views built from detail records.
//!
//! Nothing in here touches the terminal; components in `crate::components`
//! draw these descriptions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cache::EntryCache;
use crate::state::{sprite_key, CatalogEntry, DetailLookup, DetailRecord, SPRITE_POVS, SPRITE_VARIANTS};

pub const UNAVAILABLE_MESSAGE: &str = "Unable to display Pokemon details.";

/// One row of the list panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum ListTile {
    Entry {
        name: String,
        number: i32,
        thumbnail: Option<String>,
    },
    Error {
        name: String,
        message: String,
    },
}

impl ListTile {
    pub fn name(&self) -> &str {
        match self {
            ListTile::Entry { name, .. } | ListTile::Error { name, .. } => name,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ListTile::Error { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatLine {
    pub name: String,
    pub value: u16,
}

impl StatLine {
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

/// One image slot; `url` is `None` when the sprite key was missing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteCell {
    pub variant: String,
    pub key: String,
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteColumn {
    pub pov: String,
    pub cells: Vec<SpriteCell>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailPanel {
    pub name: String,
    pub number: i32,
    pub stats: Vec<StatLine>,
    pub categories: Vec<String>,
    pub sprites: Vec<SpriteColumn>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum DetailView {
    Ready(DetailPanel),
    Unavailable { message: String },
}

impl DetailView {
    pub fn unavailable() -> Self {
        DetailView::Unavailable {
            message: UNAVAILABLE_MESSAGE.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DetailView::Ready(_))
    }

    pub fn panel(&self) -> Option<&DetailPanel> {
        match self {
            DetailView::Ready(panel) => Some(panel),
            DetailView::Unavailable { .. } => None,
        }
    }
}

/// Build the detail panel for `record`.
///
/// Falls back to the placeholder when stats or categories are missing.
/// Sprites are resolved through `cache` by the record's name.
pub fn build_detail_view(record: &DetailRecord, cache: &EntryCache) -> DetailView {
    let (Some(stats), Some(categories)) = (record.stats.as_ref(), record.categories.as_ref()) else {
        return DetailView::unavailable();
    };

    DetailView::Ready(DetailPanel {
        name: record.name.clone(),
        number: record.order,
        stats: stats
            .iter()
            .map(|stat| StatLine {
                name: stat.name.clone(),
                value: stat.base_value,
            })
            .collect(),
        categories: categories.clone(),
        sprites: build_sprite_grid(&record.name, cache),
    })
}

/// Two columns (front, back) of two cells (default, shiny).
pub fn build_sprite_grid(name: &str, cache: &EntryCache) -> Vec<SpriteColumn> {
    let cached = cache.get(name);
    SPRITE_POVS
        .iter()
        .map(|pov| SpriteColumn {
            pov: pov.to_string(),
            cells: SPRITE_VARIANTS
                .iter()
                .map(|variant| {
                    let key = sprite_key(pov, variant);
                    let url = cached.and_then(|record| record.sprite(&key)).map(str::to_string);
                    SpriteCell {
                        variant: variant.to_string(),
                        key,
                        url,
                    }
                })
                .collect(),
        })
        .collect()
}

/// List tile for a catalog entry and the result of its detail lookup.
pub fn build_tile(entry: &CatalogEntry, lookup: &DetailLookup) -> ListTile {
    match lookup.record() {
        Some(record) => ListTile::Entry {
            name: entry.name.clone(),
            number: record.order,
            thumbnail: record.thumbnail().map(str::to_string),
        },
        None => ListTile::Error {
            name: entry.name.clone(),
            message: format!("Unable to load details for {}.", entry.name),
        },
    }
}
