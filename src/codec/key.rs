//! Storage key encoding
//!
//! Every storage key starts with a one-byte tag that partitions the key
//! space. Variable-length spans are never escaped or terminated: a span's
//! end is always fixed by an explicit length field in front of it, or it is
//! the trailing span of the key.

use bytes::{BufMut, Bytes, BytesMut};

use super::primitive::{put_u16, put_u64, ByteReader};
use super::score::{decode_score, encode_score};
use super::tags;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::slot::hash_slot;

/// Tag (1) + key length (2) + version (2)
const STRUCTURE_HEADER_LEN: usize = 5;

/// The five kinds of storage key
///
/// Item, zscore and list keys share the `'S'` tag and the same header, so
/// decoding one requires knowing which kind to expect. The caller always
/// does: it comes from the meta record's type, or from the column family the
/// key was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Meta,
    Item,
    ZScore,
    List,
    Delete,
}

impl KeyKind {
    /// Leading tag byte of keys of this kind
    pub fn tag(self) -> u8 {
        match self {
            KeyKind::Meta => tags::META_KEY,
            KeyKind::Item | KeyKind::ZScore | KeyKind::List => tags::ITEM_KEY,
            KeyKind::Delete => tags::DELETE_KEY,
        }
    }

    /// Prefix bounding a scan over this kind's whole namespace
    pub fn tag_prefix(self) -> Bytes {
        Bytes::copy_from_slice(&[self.tag()])
    }

    fn name(self) -> &'static str {
        match self {
            KeyKind::Meta => "meta key",
            KeyKind::Item => "item key",
            KeyKind::ZScore => "zscore key",
            KeyKind::List => "list key",
            KeyKind::Delete => "delete key",
        }
    }
}

/// A decoded storage key
#[derive(Debug, Clone, PartialEq)]
pub enum StorageKey {
    /// Locates the metadata record of a logical key
    Meta { key: Bytes },

    /// One hash field, set member or sorted-set member (member -> score)
    Item { key: Bytes, version: u16, field: Bytes },

    /// Sorted-set secondary index ordering members by score
    ZScore {
        key: Bytes,
        version: u16,
        score: f64,
        member: Bytes,
    },

    /// One list element, addressed by sequence number
    List { key: Bytes, version: u16, seq: u64 },

    /// Reclamation queue entry for a superseded structure generation
    Delete { key: Bytes, version: u16 },
}

impl StorageKey {
    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn meta(key: impl Into<Bytes>) -> Self {
        StorageKey::Meta { key: key.into() }
    }

    pub fn item(key: impl Into<Bytes>, field: impl Into<Bytes>, version: u16) -> Self {
        StorageKey::Item {
            key: key.into(),
            version,
            field: field.into(),
        }
    }

    pub fn zscore(
        key: impl Into<Bytes>,
        member: impl Into<Bytes>,
        score: f64,
        version: u16,
    ) -> Self {
        StorageKey::ZScore {
            key: key.into(),
            version,
            score,
            member: member.into(),
        }
    }

    pub fn list(key: impl Into<Bytes>, seq: u64, version: u16) -> Self {
        StorageKey::List {
            key: key.into(),
            version,
            seq,
        }
    }

    pub fn delete(key: impl Into<Bytes>, version: u16) -> Self {
        StorageKey::Delete {
            key: key.into(),
            version,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn kind(&self) -> KeyKind {
        match self {
            StorageKey::Meta { .. } => KeyKind::Meta,
            StorageKey::Item { .. } => KeyKind::Item,
            StorageKey::ZScore { .. } => KeyKind::ZScore,
            StorageKey::List { .. } => KeyKind::List,
            StorageKey::Delete { .. } => KeyKind::Delete,
        }
    }

    /// The logical key this storage key belongs to
    pub fn raw_key(&self) -> &Bytes {
        match self {
            StorageKey::Meta { key }
            | StorageKey::Item { key, .. }
            | StorageKey::ZScore { key, .. }
            | StorageKey::List { key, .. }
            | StorageKey::Delete { key, .. } => key,
        }
    }

    /// Structure generation, absent for meta keys
    pub fn version(&self) -> Option<u16> {
        match self {
            StorageKey::Meta { .. } => None,
            StorageKey::Item { version, .. }
            | StorageKey::ZScore { version, .. }
            | StorageKey::List { version, .. }
            | StorageKey::Delete { version, .. } => Some(*version),
        }
    }

    /// Cluster slot of the logical key
    pub fn slot(&self) -> u16 {
        hash_slot(self.raw_key())
    }

    /// Exact size of the encoded form
    pub fn encoded_len(&self) -> usize {
        match self {
            StorageKey::Meta { key } => 3 + key.len(),
            StorageKey::Item { key, field, .. } => STRUCTURE_HEADER_LEN + key.len() + field.len(),
            StorageKey::ZScore { key, member, .. } => {
                STRUCTURE_HEADER_LEN + key.len() + 8 + member.len()
            }
            StorageKey::List { key, .. } => STRUCTURE_HEADER_LEN + key.len() + 8,
            StorageKey::Delete { key, .. } => 7 + key.len(),
        }
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Encode into the storage engine's key space
    ///
    /// Fails with `LengthExceeded` if the key or field/member is longer than
    /// `config` allows, and with `ScoreOutOfRange` for an unstorable score.
    pub fn encode(&self, config: &CodecConfig) -> Result<Bytes> {
        config.check_key(self.raw_key())?;

        let mut buf = BytesMut::with_capacity(self.encoded_len());
        match self {
            StorageKey::Meta { key } => {
                buf.put_u8(tags::META_KEY);
                put_u16(&mut buf, hash_slot(key));
                buf.put_slice(key);
            }
            StorageKey::Item {
                key,
                version,
                field,
            } => {
                config.check_field(field)?;
                put_structure_header(&mut buf, key, *version)?;
                buf.put_slice(field);
            }
            StorageKey::ZScore {
                key,
                version,
                score,
                member,
            } => {
                config.check_field(member)?;
                let encoded = encode_score(*score)?;
                put_structure_header(&mut buf, key, *version)?;
                put_u64(&mut buf, encoded);
                buf.put_slice(member);
            }
            StorageKey::List { key, version, seq } => {
                put_structure_header(&mut buf, key, *version)?;
                put_u64(&mut buf, *seq);
            }
            StorageKey::Delete { key, version } => {
                buf.put_u8(tags::DELETE_KEY);
                put_u16(&mut buf, hash_slot(key));
                put_u16(&mut buf, key_len(key)?);
                buf.put_slice(key);
                put_u16(&mut buf, *version);
            }
        }
        Ok(buf.freeze())
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decode a storage key of the expected kind
    pub fn decode(kind: KeyKind, bytes: &[u8]) -> Result<Self> {
        let context = kind.name();
        let mut reader = ByteReader::new(bytes, context);

        let tag = reader.read_u8()?;
        if tag != kind.tag() {
            return Err(CodecError::malformed(
                context,
                format!("expected tag 0x{:02x}, found 0x{:02x}", kind.tag(), tag),
            ));
        }

        let key = match kind {
            KeyKind::Meta => {
                let slot = reader.read_u16()?;
                let key = reader.rest();
                check_slot(context, slot, key)?;
                StorageKey::Meta {
                    key: Bytes::copy_from_slice(key),
                }
            }
            KeyKind::Item => {
                let key = read_key(&mut reader)?;
                let version = reader.read_u16()?;
                StorageKey::Item {
                    key: Bytes::copy_from_slice(key),
                    version,
                    field: Bytes::copy_from_slice(reader.rest()),
                }
            }
            KeyKind::ZScore => {
                let key = read_key(&mut reader)?;
                let version = reader.read_u16()?;
                let score = decode_score(reader.read_u64()?)?;
                StorageKey::ZScore {
                    key: Bytes::copy_from_slice(key),
                    version,
                    score,
                    member: Bytes::copy_from_slice(reader.rest()),
                }
            }
            KeyKind::List => {
                let key = read_key(&mut reader)?;
                let version = reader.read_u16()?;
                let seq = reader.read_u64()?;
                reader.finish()?;
                StorageKey::List {
                    key: Bytes::copy_from_slice(key),
                    version,
                    seq,
                }
            }
            KeyKind::Delete => {
                let slot = reader.read_u16()?;
                let key = read_key(&mut reader)?;
                let version = reader.read_u16()?;
                reader.finish()?;
                check_slot(context, slot, key)?;
                StorageKey::Delete {
                    key: Bytes::copy_from_slice(key),
                    version,
                }
            }
        };
        Ok(key)
    }

    // =========================================================================
    // Scan Prefixes
    // =========================================================================

    /// Prefix shared by every item, zscore and list key of one structure
    /// generation
    ///
    /// Scanning this prefix yields the generation's children in field,
    /// score or sequence order.
    pub fn item_prefix(key: &[u8], version: u16) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(STRUCTURE_HEADER_LEN + key.len());
        put_structure_header(&mut buf, key, version)?;
        Ok(buf.freeze())
    }

    /// Prefix of every meta key hashed to `slot`
    pub fn meta_slot_prefix(slot: u16) -> Bytes {
        slot_prefix(tags::META_KEY, slot)
    }

    /// Prefix of every delete key hashed to `slot`
    pub fn delete_slot_prefix(slot: u16) -> Bytes {
        slot_prefix(tags::DELETE_KEY, slot)
    }
}

/// Encode a storage key
pub fn encode_key(key: &StorageKey, config: &CodecConfig) -> Result<Bytes> {
    key.encode(config)
}

/// Decode a storage key of the expected kind
pub fn decode_key(kind: KeyKind, bytes: &[u8]) -> Result<StorageKey> {
    StorageKey::decode(kind, bytes)
}

// =============================================================================
// Helpers
// =============================================================================

fn key_len(key: &[u8]) -> Result<u16> {
    u16::try_from(key.len()).map_err(|_| CodecError::LengthExceeded {
        what: "key",
        len: key.len(),
        max: u16::MAX as usize,
    })
}

fn put_structure_header(buf: &mut BytesMut, key: &[u8], version: u16) -> Result<()> {
    let len = key_len(key)?;
    buf.put_u8(tags::ITEM_KEY);
    put_u16(buf, len);
    buf.put_slice(key);
    put_u16(buf, version);
    Ok(())
}

fn slot_prefix(tag: u8, slot: u16) -> Bytes {
    let mut buf = BytesMut::with_capacity(3);
    buf.put_u8(tag);
    put_u16(&mut buf, slot);
    buf.freeze()
}

fn read_key<'a>(reader: &mut ByteReader<'a>) -> Result<&'a [u8]> {
    let len = reader.read_u16()?;
    reader.take(len as usize)
}

fn check_slot(context: &str, slot: u16, key: &[u8]) -> Result<()> {
    let expected = hash_slot(key);
    if slot != expected {
        return Err(CodecError::malformed(
            context,
            format!("slot {} does not match key slot {}", slot, expected),
        ));
    }
    Ok(())
}
