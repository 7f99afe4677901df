//! Store Module
//!
//! The contract this codec expects from the ordered storage engine beneath
//! it, plus an in-memory implementation.
//!
//! ## Responsibilities
//! - Point get/put/delete over opaque byte strings
//! - Prefix-bounded scans in ascending bytewise order
//!
//! The engine knows nothing about tags, slots or versions; everything it
//! stores is produced by [`crate::codec`].

mod memory;

pub use memory::MemoryStore;

use bytes::Bytes;

use crate::error::Result;

/// An ordered byte-string key/value engine with a bytewise comparator
pub trait OrderedStore: Send + Sync {
    /// Get the value stored under `key`
    fn get(&self, key: &[u8]) -> Result<Option<Bytes>>;

    /// Insert or overwrite `key`
    fn put(&self, key: Bytes, value: Bytes) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// All entries whose key starts with `prefix`, ascending by key
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Bytes, Bytes)>>;
}
