//! Sorted-set score encoding
//!
//! A score is scaled by `SCORE_MULTIPLIER`, rounded half away from zero and
//! shifted by `SCORE_SHIFT` into an unsigned 64-bit integer. Packed
//! big-endian, the result compares bytewise in the same order as the
//! original scores, negative ones included.

use crate::config::{SCORE_MULTIPLIER, SCORE_SHIFT};
use crate::error::{CodecError, Result};

/// Smallest storable score
///
/// Encoded order is strict only while `score * SCORE_MULTIPLIER` is exact
/// in an `f64`, i.e. for magnitudes below about 9e10. Near the bounds,
/// scores closer together than the float spacing of the scaled value
/// encode to the same bytes.
pub const SCORE_MIN: f64 = -10_000_000_000_000.0;

/// Largest storable score; see [`SCORE_MIN`] for precision near the bounds
pub const SCORE_MAX: f64 = 10_000_000_000_000.0;

/// Largest value `encode_score` can produce
const MAX_ENCODED: u64 = 2 * SCORE_SHIFT as u64;

/// Map a score to its order-preserving unsigned representation
pub fn encode_score(score: f64) -> Result<u64> {
    if !score.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&score) {
        return Err(CodecError::ScoreOutOfRange(score));
    }

    // Truncation after the +/-0.5 nudge rounds half away from zero.
    let scaled = if score < 0.0 {
        (score * SCORE_MULTIPLIER - 0.5) as i64
    } else {
        (score * SCORE_MULTIPLIER + 0.5) as i64
    };

    Ok((scaled + SCORE_SHIFT) as u64)
}

/// Recover a score from its stored representation
///
/// Values above `2 * SCORE_SHIFT` are never written by [`encode_score`]
/// and fail with `MalformedEncoding`.
pub fn decode_score(encoded: u64) -> Result<f64> {
    if encoded > MAX_ENCODED {
        return Err(CodecError::malformed(
            "zscore key",
            format!("score field {:#x} above maximum {:#x}", encoded, MAX_ENCODED),
        ));
    }
    Ok((encoded as i64 - SCORE_SHIFT) as f64 / SCORE_MULTIPLIER)
}
