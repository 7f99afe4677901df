//! Slot Hasher
//!
//! Maps a logical key to one of `SLOT_COUNT` cluster slots. The mapping is
//! Redis Cluster compatible: CRC16 (XMODEM) over the key, or over its hash
//! tag when the key contains one, reduced modulo 16384.
//!
//! Slots are embedded in meta and delete keys, so this function is part of
//! the on-disk format and must never change.

use crc::{Crc, CRC_16_XMODEM};

use crate::config::SLOT_COUNT;

/// CRC16 calculator for Redis Cluster (XMODEM variant)
static CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Compute the cluster slot of a key
///
/// Keys sharing a hash tag (`{user1}.name`, `{user1}.age`) land on the same
/// slot. The result is always in `[0, SLOT_COUNT)`.
pub fn hash_slot(key: &[u8]) -> u16 {
    CRC16.checksum(hash_tag(key)) % SLOT_COUNT
}

/// Return the portion of `key` that participates in slot hashing
///
/// If the key contains a `{` followed by a `}` with at least one byte in
/// between, only the bytes between the first `{` and the next `}` are
/// hashed. Otherwise the whole key is.
pub fn hash_tag(key: &[u8]) -> &[u8] {
    let Some(open) = key.iter().position(|&b| b == b'{') else {
        return key;
    };
    let rest = &key[open + 1..];
    match rest.iter().position(|&b| b == b'}') {
        Some(close) if close > 0 => &rest[..close],
        _ => key,
    }
}
