//! Data fetcher - cache-aware wrapper around the upstream API.
//!
//! Every failure is logged here and turned into a [`DetailLookup`] variant or
//! an empty catalog, so callers never see an error.

use crate::api::{FetchError, PokeApi};
use crate::cache::EntryCache;
use crate::state::{CatalogEntry, DetailLookup};
use crate::view::{build_tile, ListTile};

pub struct Fetcher<A> {
    api: A,
}

impl<A: PokeApi> Fetcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Catalog listing; empty on any failure.
    pub async fn fetch_catalog(&self) -> Vec<CatalogEntry> {
        match self.api.catalog().await {
            Ok(entries) => {
                tracing::info!(count = entries.len(), "catalog loaded");
                entries
            }
            Err(error) => {
                tracing::error!(%error, "catalog fetch failed");
                Vec::new()
            }
        }
    }

    /// Detail for `name`, served from `cache` when present.
    ///
    /// A fetched record is stored under the canonical name the service
    /// returned, which may differ from `name`.
    pub async fn fetch_detail(&self, cache: &mut EntryCache, name: &str) -> DetailLookup {
        if let Some(record) = cache.get(name) {
            tracing::debug!(name, "detail cache hit");
            return DetailLookup::Found(record.clone());
        }

        match self.fetch_uncached(name).await {
            DetailLookup::Found(record) => {
                let stored = cache.put(record.name.clone(), record);
                DetailLookup::Found(stored.clone())
            }
            other => other,
        }
    }

    /// Network half of [`Fetcher::fetch_detail`]; never reads or writes a cache.
    pub async fn fetch_uncached(&self, name: &str) -> DetailLookup {
        tracing::debug!(name, "fetching detail");
        match self.api.pokemon(name).await {
            Ok(record) => DetailLookup::Found(record),
            Err(FetchError::NotFound(missing)) => {
                tracing::error!(name = %missing, "pokemon not found");
                DetailLookup::NotFound(missing)
            }
            Err(error) => {
                tracing::error!(name, %error, "detail fetch failed");
                DetailLookup::TransientError(error.to_string())
            }
        }
    }

    /// Fetch the catalog, then every entry's detail one at a time.
    ///
    /// Returns one tile per catalog entry; entries whose detail failed get an
    /// error tile.
    pub async fn populate(&self, cache: &mut EntryCache) -> Vec<ListTile> {
        let entries = self.fetch_catalog().await;
        let mut tiles = Vec::with_capacity(entries.len());
        for entry in &entries {
            let lookup = self.fetch_detail(cache, &entry.name).await;
            tiles.push(build_tile(entry, &lookup));
        }
        tracing::info!(tiles = tiles.len(), cached = cache.len(), "catalog populated");
        tiles
    }
}
