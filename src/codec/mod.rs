//! Codec Module
//!
//! Maps logical keys, fields, members and metadata onto the storage
//! engine's flat, bytewise-ordered key space and back.
//!
//! ## Key Layouts
//! ```text
//! Meta    ┌─'M'─┬─Slot (2)─┬─Key─────────────────────────────────────────┐
//! Item    ├─'S'─┼─KLen (2)─┼─Key─┬─Version (2)─┬─Field───────────────────┤
//! ZScore  ├─'S'─┼─KLen (2)─┼─Key─┼─Version (2)─┬─Score (8)─┬─Member──────┤
//! List    ├─'S'─┼─KLen (2)─┼─Key─┼─Version (2)─┬─Seq (8)───────────────────┤
//! Delete  └─'D'─┴─Slot (2)─┴─KLen (2)─┬─Key─┬─Version (2)──────────────┘
//! ```
//!
//! ## Value Layouts
//! ```text
//! KV        'k' + value
//! Meta      'H'|'S'|'Z' + Version (2) + DelFlag (1) + Count (8)       = 12
//! ListMeta  'L' + Version (2) + DelFlag (1) + Len (8) + Left (8) + Right (8) = 28
//! ```
//!
//! All integers are big-endian, so for a fixed key and version, keys sort
//! by field, by (score, member), or by sequence number.

mod key;
mod primitive;
mod score;
mod value;

pub use key::{decode_key, encode_key, KeyKind, StorageKey};
pub use primitive::{put_u16, put_u32, put_u64, ByteReader};
pub use score::{decode_score, encode_score, SCORE_MAX, SCORE_MIN};
pub use value::{
    decode_value, encode_value, DeleteFlag, MetaType, StorageValue, LIST_META_VALUE_LEN,
    META_VALUE_LEN,
};

/// Tag bytes
///
/// Key tags and value tags live in separate spaces; `'S'` appearing in both
/// is not a conflict.
pub mod tags {
    pub const META_KEY: u8 = b'M';
    pub const ITEM_KEY: u8 = b'S';
    pub const DELETE_KEY: u8 = b'D';

    pub const KV_VALUE: u8 = b'k';
    pub const HASH_META: u8 = b'H';
    pub const SET_META: u8 = b'S';
    pub const ZSET_META: u8 = b'Z';
    pub const LIST_META: u8 = b'L';
}
