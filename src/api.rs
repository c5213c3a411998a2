//! PokeAPI client

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::state::{sprite_key, CatalogEntry, DetailRecord, StatEntry, SPRITE_POVS, SPRITE_VARIANTS};

pub const API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    #[serde(default)]
    order: i32,
    stats: Option<Vec<PokemonStatSlot>>,
    types: Option<Vec<PokemonTypeSlot>>,
    #[serde(default)]
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("pokemon \"{0}\" not found")]
    NotFound(String),
    #[error("upstream returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("response parse error: {0}")]
    Decode(String),
}

/// The upstream catalog service
#[async_trait]
pub trait PokeApi: Send + Sync {
    /// `GET {base}/pokemon`
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, FetchError>;

    /// `GET {base}/pokemon/{name}/`
    async fn pokemon(&self, name: &str) -> Result<DetailRecord, FetchError>;
}

/// HTTP implementation of [`PokeApi`]
#[derive(Clone, Debug)]
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog_url(&self) -> String {
        format!("{}/pokemon", self.base_url)
    }

    pub fn detail_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}/", self.base_url, urlencoding::encode(name))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

#[async_trait]
impl PokeApi for HttpApi {
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        let bytes = self.fetch_bytes(&self.catalog_url()).await?;
        parse_catalog(&bytes)
    }

    async fn pokemon(&self, name: &str) -> Result<DetailRecord, FetchError> {
        let bytes = self
            .fetch_bytes(&self.detail_url(name))
            .await
            .map_err(|err| match err {
                FetchError::Status { status, url } => status_error(status, &url, name),
                other => other,
            })?;
        parse_detail(&bytes)
    }
}

/// Classify a non-success status from a detail request.
///
/// 404 means the name does not exist; anything else is kept as a status error.
pub fn status_error(status: u16, url: &str, name: &str) -> FetchError {
    match status {
        404 => FetchError::NotFound(name.to_string()),
        _ => FetchError::Status {
            status,
            url: url.to_string(),
        },
    }
}

/// Parse a catalog listing body into entries, keeping upstream order.
pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<CatalogEntry>, FetchError> {
    let response: ListResponse =
        serde_json::from_slice(bytes).map_err(|err| FetchError::Decode(err.to_string()))?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| CatalogEntry { name: entry.name })
        .collect())
}

/// Parse a detail body into a record.
///
/// Missing `stats` or `types` are not an error here; the record keeps them
/// as `None`.
pub fn parse_detail(bytes: &[u8]) -> Result<DetailRecord, FetchError> {
    let response: PokemonResponse =
        serde_json::from_slice(bytes).map_err(|err| FetchError::Decode(err.to_string()))?;

    let stats = response.stats.map(|slots| {
        slots
            .into_iter()
            .map(|slot| StatEntry {
                name: slot.stat.name,
                base_value: slot.base_stat,
            })
            .collect()
    });
    let categories = response.types.map(|slots| {
        slots
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect()
    });

    let mut sprites = BTreeMap::new();
    for pov in SPRITE_POVS {
        for variant in SPRITE_VARIANTS {
            let key = sprite_key(pov, variant);
            if let Some(url) = pointer_string(&response.sprites, &format!("/{key}")) {
                sprites.insert(key, url);
            }
        }
    }

    Ok(DetailRecord {
        name: response.name,
        order: response.order,
        stats,
        categories,
        sprites,
    })
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_catalog_keeps_order() {
        let body = br#"{
            "count": 2,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;

        let entries = parse_catalog(body).unwrap();

        assert_eq!(
            entries,
            vec![CatalogEntry::new("bulbasaur"), CatalogEntry::new("ivysaur")]
        );
    }

    #[test]
    fn test_parse_catalog_rejects_garbage() {
        let err = parse_catalog(b"<html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_parse_detail_maps_fields() {
        let body = br#"{
            "name": "bulbasaur",
            "order": 1,
            "stats": [
                {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}},
                {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": ""}}
            ],
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": ""}},
                {"slot": 2, "type": {"name": "poison", "url": ""}}
            ],
            "sprites": {
                "front_default": "https://img/1.png",
                "front_shiny": "https://img/shiny/1.png",
                "back_default": null,
                "other": {"home": {"front_default": "https://img/home/1.png"}}
            }
        }"#;

        let record = parse_detail(body).unwrap();

        assert_eq!(record.name, "bulbasaur");
        assert_eq!(record.order, 1);
        assert_eq!(
            record.stats,
            Some(vec![
                StatEntry {
                    name: "hp".into(),
                    base_value: 45
                },
                StatEntry {
                    name: "attack".into(),
                    base_value: 49
                },
            ])
        );
        assert_eq!(
            record.categories,
            Some(vec!["grass".to_string(), "poison".to_string()])
        );
        assert_eq!(record.thumbnail(), Some("https://img/1.png"));
        assert_eq!(record.sprite("front_shiny"), Some("https://img/shiny/1.png"));
        assert_eq!(record.sprite("back_default"), None);
        assert_eq!(record.sprites.len(), 2);
    }

    #[test]
    fn test_parse_detail_without_stats_or_types() {
        let record = parse_detail(br#"{"name": "missingno"}"#).unwrap();

        assert_eq!(record.name, "missingno");
        assert_eq!(record.order, 0);
        assert!(record.stats.is_none());
        assert!(record.categories.is_none());
        assert!(record.sprites.is_empty());
    }

    #[test]
    fn test_parse_detail_without_name_is_decode_error() {
        let err = parse_detail(br#"{"order": 3}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_urls() {
        let api = HttpApi::new("http://localhost:8080/api/v2/");

        assert_eq!(api.base_url(), "http://localhost:8080/api/v2");
        assert_eq!(api.catalog_url(), "http://localhost:8080/api/v2/pokemon");
        assert_eq!(
            api.detail_url("mr-mime"),
            "http://localhost:8080/api/v2/pokemon/mr-mime/"
        );
        assert_eq!(
            api.detail_url("mr mime"),
            "http://localhost:8080/api/v2/pokemon/mr%20mime/"
        );
    }

    #[test]
    fn test_status_error_404_is_not_found() {
        let err = status_error(404, "http://x/pokemon/missingno/", "missingno");
        assert_eq!(err, FetchError::NotFound("missingno".into()));
    }

    #[test]
    fn test_status_error_keeps_other_statuses() {
        let err = status_error(500, "http://x/pokemon/missingno/", "missingno");
        assert_eq!(
            err,
            FetchError::Status {
                status: 500,
                url: "http://x/pokemon/missingno/".into()
            }
        );
        assert!(matches!(
            status_error(429, "http://x/pokemon/pikachu/", "pikachu"),
            FetchError::Status { status: 429, .. }
        ));
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::NotFound("missingno".into()).to_string(),
            "pokemon \"missingno\" not found"
        );
        assert_eq!(
            FetchError::Status {
                status: 500,
                url: "http://x/pokemon".into()
            }
            .to_string(),
            "upstream returned status 500 for http://x/pokemon"
        );
    }
}
