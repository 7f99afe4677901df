//! Storage value encoding
//!
//! Values are distinguished by their leading tag byte, so unlike keys they
//! decode without a hint. Meta records have fixed sizes: 12 bytes for
//! hash/set/zset metadata and 28 bytes for list metadata.

use bytes::{BufMut, Bytes, BytesMut};

use super::primitive::{put_u16, put_u64, ByteReader};
use super::tags;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};

/// Size of an encoded hash/set/zset meta record
pub const META_VALUE_LEN: usize = 12;

/// Size of an encoded list meta record
pub const LIST_META_VALUE_LEN: usize = 28;

/// Type recorded in a hash/set/zset meta record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaType {
    Hash,
    Set,
    ZSet,
}

impl MetaType {
    pub fn tag(self) -> u8 {
        match self {
            MetaType::Hash => tags::HASH_META,
            MetaType::Set => tags::SET_META,
            MetaType::ZSet => tags::ZSET_META,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            tags::HASH_META => Some(MetaType::Hash),
            tags::SET_META => Some(MetaType::Set),
            tags::ZSET_META => Some(MetaType::ZSet),
            _ => None,
        }
    }
}

/// Marker byte telling live structures from ones pending reclamation
///
/// The raw byte is kept as written so any stored flag round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeleteFlag(pub u8);

impl DeleteFlag {
    pub const ENABLED: DeleteFlag = DeleteFlag(b'E');
    pub const DELETED: DeleteFlag = DeleteFlag(b'D');

    pub fn is_deleted(self) -> bool {
        self == Self::DELETED
    }
}

impl From<u8> for DeleteFlag {
    fn from(b: u8) -> Self {
        DeleteFlag(b)
    }
}

/// A decoded storage value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageValue {
    /// Value of a plain string key
    Kv { value: Bytes },

    /// Hash, set or sorted-set metadata
    Meta {
        data_type: MetaType,
        version: u16,
        delete_flag: DeleteFlag,
        count: u64,
    },

    /// List metadata with head/tail sequence cursors
    ListMeta {
        version: u16,
        delete_flag: DeleteFlag,
        length: u64,
        left_seq: u64,
        right_seq: u64,
    },
}

impl StorageValue {
    pub fn kv(value: impl Into<Bytes>) -> Self {
        StorageValue::Kv {
            value: value.into(),
        }
    }

    pub fn hash_meta(count: u64, version: u16, delete_flag: DeleteFlag) -> Self {
        Self::meta(MetaType::Hash, count, version, delete_flag)
    }

    pub fn set_meta(count: u64, version: u16, delete_flag: DeleteFlag) -> Self {
        Self::meta(MetaType::Set, count, version, delete_flag)
    }

    pub fn zset_meta(count: u64, version: u16, delete_flag: DeleteFlag) -> Self {
        Self::meta(MetaType::ZSet, count, version, delete_flag)
    }

    pub fn meta(data_type: MetaType, count: u64, version: u16, delete_flag: DeleteFlag) -> Self {
        StorageValue::Meta {
            data_type,
            version,
            delete_flag,
            count,
        }
    }

    pub fn list_meta(
        length: u64,
        left_seq: u64,
        right_seq: u64,
        version: u16,
        delete_flag: DeleteFlag,
    ) -> Self {
        StorageValue::ListMeta {
            version,
            delete_flag,
            length,
            left_seq,
            right_seq,
        }
    }

    /// Structure generation, absent for plain values
    pub fn version(&self) -> Option<u16> {
        match self {
            StorageValue::Kv { .. } => None,
            StorageValue::Meta { version, .. } | StorageValue::ListMeta { version, .. } => {
                Some(*version)
            }
        }
    }

    /// Whether the structure is logically deleted and awaiting reclamation
    pub fn is_deleted(&self) -> bool {
        match self {
            StorageValue::Kv { .. } => false,
            StorageValue::Meta { delete_flag, .. }
            | StorageValue::ListMeta { delete_flag, .. } => delete_flag.is_deleted(),
        }
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            StorageValue::Kv { value } => 1 + value.len(),
            StorageValue::Meta { .. } => META_VALUE_LEN,
            StorageValue::ListMeta { .. } => LIST_META_VALUE_LEN,
        }
    }

    /// Encode into a storage engine value
    pub fn encode(&self, config: &CodecConfig) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        match self {
            StorageValue::Kv { value } => {
                config.check_value(value)?;
                buf.put_u8(tags::KV_VALUE);
                buf.put_slice(value);
            }
            StorageValue::Meta {
                data_type,
                version,
                delete_flag,
                count,
            } => {
                buf.put_u8(data_type.tag());
                put_u16(&mut buf, *version);
                buf.put_u8(delete_flag.0);
                put_u64(&mut buf, *count);
            }
            StorageValue::ListMeta {
                version,
                delete_flag,
                length,
                left_seq,
                right_seq,
            } => {
                buf.put_u8(tags::LIST_META);
                put_u16(&mut buf, *version);
                buf.put_u8(delete_flag.0);
                put_u64(&mut buf, *length);
                put_u64(&mut buf, *left_seq);
                put_u64(&mut buf, *right_seq);
            }
        }
        Ok(buf.freeze())
    }

    /// Decode a storage engine value
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let Some(&tag) = bytes.first() else {
            return Err(CodecError::malformed("value", "empty input"));
        };

        if tag == tags::KV_VALUE {
            return Ok(StorageValue::Kv {
                value: Bytes::copy_from_slice(&bytes[1..]),
            });
        }

        if let Some(data_type) = MetaType::from_tag(tag) {
            check_fixed_len("meta value", bytes, META_VALUE_LEN)?;
            let mut reader = ByteReader::new(&bytes[1..], "meta value");
            return Ok(StorageValue::Meta {
                data_type,
                version: reader.read_u16()?,
                delete_flag: DeleteFlag(reader.read_u8()?),
                count: reader.read_u64()?,
            });
        }

        if tag == tags::LIST_META {
            check_fixed_len("list meta value", bytes, LIST_META_VALUE_LEN)?;
            let mut reader = ByteReader::new(&bytes[1..], "list meta value");
            return Ok(StorageValue::ListMeta {
                version: reader.read_u16()?,
                delete_flag: DeleteFlag(reader.read_u8()?),
                length: reader.read_u64()?,
                left_seq: reader.read_u64()?,
                right_seq: reader.read_u64()?,
            });
        }

        Err(CodecError::malformed(
            "value",
            format!("unknown tag 0x{:02x}", tag),
        ))
    }
}

/// Encode a storage value
pub fn encode_value(value: &StorageValue, config: &CodecConfig) -> Result<Bytes> {
    value.encode(config)
}

/// Decode a storage value
pub fn decode_value(bytes: &[u8]) -> Result<StorageValue> {
    StorageValue::decode(bytes)
}

fn check_fixed_len(context: &str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(CodecError::malformed(
            context,
            format!("expected {} bytes, got {}", expected, bytes.len()),
        ));
    }
    Ok(())
}
