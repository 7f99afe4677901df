//! # kvcodec
//!
//! Key/value encoding layer of a multi-type key-value server built on an
//! ordered byte-string storage engine:
//! - Plain strings, hashes, sets, sorted sets and lists on one flat key space
//! - Big-endian fixed-width integers so bytewise order matches logical order
//! - Versioned structures for lazy, asynchronous deletion
//! - Redis Cluster compatible slot hashing embedded in meta/delete keys
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Command Handlers (external)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ (key, field, version, score, seq...)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Codec                                 │
//! │        StorageKey / StorageValue  encode ↔ decode            │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!   ┌─────────────────┐            ┌─────────────────┐
//!   │   Slot Hasher   │            │    Primitives   │
//!   │  (CRC16 / tag)  │            │  (big-endian)   │
//!   └─────────────────┘            └─────────────────┘
//!                       │ raw bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │            Ordered Store (get / put / scan prefix)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod slot;
pub mod codec;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CodecError, Result};
pub use config::CodecConfig;
pub use codec::{DeleteFlag, KeyKind, MetaType, StorageKey, StorageValue};
pub use slot::hash_slot;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvcodec
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
