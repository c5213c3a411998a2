//! Effects - side effects declared by the reducer

use crate::state::LookupOrigin;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the catalog and populate every entry's detail, sequentially
    LoadCatalog,
    /// Fetch one entry's detail after a cache miss
    FetchDetail { name: String, origin: LookupOrigin },
}
