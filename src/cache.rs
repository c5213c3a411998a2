//! Entry cache - name to detail record, first write wins

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::DetailRecord;

/// Page-lifetime cache of fetched detail records.
///
/// Keys are the canonical names reported by the upstream service. A record is
/// never replaced or evicted once stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EntryCache {
    entries: BTreeMap<String, DetailRecord>,
}

impl EntryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&DetailRecord> {
        self.entries.get(name)
    }

    /// Store `record` under `name` unless a record is already there.
    /// Returns the stored record.
    pub fn put(&mut self, name: impl Into<String>, record: DetailRecord) -> &DetailRecord {
        match self.entries.entry(name.into()) {
            Entry::Occupied(existing) => existing.into_mut(),
            Entry::Vacant(slot) => slot.insert(record),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `other` into this cache; entries already present are kept.
    pub fn absorb(&mut self, other: EntryCache) {
        for (name, record) in other.entries {
            self.put(name, record);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, order: i32) -> DetailRecord {
        DetailRecord {
            name: name.into(),
            order,
            ..Default::default()
        }
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = EntryCache::new();
        assert!(cache.get("bulbasaur").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let mut cache = EntryCache::new();
        cache.put("bulbasaur", record("bulbasaur", 1));

        assert_eq!(cache.get("bulbasaur").map(|r| r.order), Some(1));
        assert!(cache.contains("bulbasaur"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_is_first_write_wins() {
        let mut cache = EntryCache::new();
        cache.put("bulbasaur", record("bulbasaur", 1));

        let stored = cache.put("bulbasaur", record("bulbasaur", 99));

        assert_eq!(stored.order, 1);
        assert_eq!(cache.get("bulbasaur").map(|r| r.order), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_absorb_keeps_existing_entries() {
        let mut cache = EntryCache::new();
        cache.put("ivysaur", record("ivysaur", 2));

        let mut other = EntryCache::new();
        other.put("ivysaur", record("ivysaur", 50));
        other.put("venusaur", record("venusaur", 3));
        cache.absorb(other);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("ivysaur").map(|r| r.order), Some(2));
        assert_eq!(cache.get("venusaur").map(|r| r.order), Some(3));
        assert_eq!(cache.names().collect::<Vec<_>>(), vec!["ivysaur", "venusaur"]);
    }
}
