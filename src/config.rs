//! Configuration for kvcodec
//!
//! Length limits are dataset-wide settings threaded into every encoder.
//! The slot count and score constants are part of the on-disk format and
//! therefore plain constants rather than settings.

use crate::error::{CodecError, Result};

// =============================================================================
// Frozen Wire Constants
// =============================================================================

/// Number of cluster slots; `hash_slot` results lie in `[0, SLOT_COUNT)`.
pub const SLOT_COUNT: u16 = 16384;

/// Additive shift applied to scaled scores so every stored score is a
/// non-negative integer.
pub const SCORE_SHIFT: i64 = 1_000_000_000_000_000_000;

/// Scores are stored with five decimal digits of precision.
pub const SCORE_MULTIPLIER: f64 = 100_000.0;

// =============================================================================
// Default Limits
// =============================================================================

/// Largest key the 2-byte key length field can describe.
pub const DEFAULT_MAX_KEY_LEN: usize = u16::MAX as usize;

pub const DEFAULT_MAX_FIELD_LEN: usize = u16::MAX as usize;

/// 512 MB, the usual bulk string ceiling for a Redis-compatible server.
pub const DEFAULT_MAX_VALUE_LEN: usize = 512 * 1024 * 1024;

/// Length limits for variable-length spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Max length of a logical key (bounded by the 2-byte key length field)
    pub max_key_len: usize,

    /// Max length of a hash field, set member or sorted-set member
    pub max_field_len: usize,

    /// Max length of a plain string value
    pub max_value_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_key_len: DEFAULT_MAX_KEY_LEN,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
        }
    }
}

impl CodecConfig {
    /// Create a new config builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Check that the limits fit the wire format
    pub fn validate(&self) -> Result<()> {
        if self.max_key_len > u16::MAX as usize {
            return Err(CodecError::InvalidConfig(format!(
                "max_key_len {} does not fit the 2-byte key length field (max {})",
                self.max_key_len,
                u16::MAX
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Length Validation
    // =========================================================================

    /// Reject a logical key longer than `max_key_len`
    ///
    /// The limit is capped at `u16::MAX` even for a config built without
    /// `validate()`, so every key kind accepts the same keys.
    pub fn check_key(&self, key: &[u8]) -> Result<()> {
        let max = self.max_key_len.min(u16::MAX as usize);
        check_len("key", key.len(), max)
    }

    /// Reject a field or member longer than `max_field_len`
    pub fn check_field(&self, field: &[u8]) -> Result<()> {
        check_len("field", field.len(), self.max_field_len)
    }

    /// Reject a string value longer than `max_value_len`
    pub fn check_value(&self, value: &[u8]) -> Result<()> {
        check_len("value", value.len(), self.max_value_len)
    }
}

fn check_len(what: &'static str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(CodecError::LengthExceeded { what, len, max });
    }
    Ok(())
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the maximum key length (in bytes)
    pub fn max_key_len(mut self, len: usize) -> Self {
        self.config.max_key_len = len;
        self
    }

    /// Set the maximum field/member length (in bytes)
    pub fn max_field_len(mut self, len: usize) -> Self {
        self.config.max_field_len = len;
        self
    }

    /// Set the maximum string value length (in bytes)
    pub fn max_value_len(mut self, len: usize) -> Self {
        self.config.max_value_len = len;
        self
    }

    pub fn build(self) -> Result<CodecConfig> {
        self.config.validate()?;
        tracing::debug!(
            max_key_len = self.config.max_key_len,
            max_field_len = self.config.max_field_len,
            max_value_len = self.config.max_value_len,
            "codec config built"
        );
        Ok(self.config)
    }
}
