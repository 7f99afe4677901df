//! In-memory ordered store
//!
//! BTreeMap-based store with RwLock for concurrency.

use std::collections::BTreeMap;
use std::ops::Bound;

use bytes::Bytes;
use parking_lot::RwLock;

use super::OrderedStore;
use crate::error::Result;

/// BTreeMap-backed [`OrderedStore`]
///
/// `Vec<u8>`/`Bytes` ordering is lexicographic, which is exactly the
/// bytewise comparator the codec's layouts are designed for.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<Bytes, Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl OrderedStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: Bytes, value: Bytes) -> Result<()> {
        tracing::trace!(key_len = key.len(), value_len = value.len(), "put");
        self.data.write().insert(key, value);
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        tracing::trace!(key_len = key.len(), "delete");
        self.data.write().remove(key);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Bytes, Bytes)>> {
        let data = self.data.read();
        let start = Bytes::copy_from_slice(prefix);
        let entries = data
            .range((Bound::Included(start), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(entries)
    }
}
