//! Wire format error types
//!
//! Encoding failures are caller-visible construction errors: a message that
//! would violate a header invariant is never produced, partially or
//! otherwise. Decoding failures mark messages a conforming peer must reject.

use thiserror::Error;

/// Message construction failure
///
/// Construction fails atomically. Data that does not fit its declared field
/// width is rejected, never truncated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// Command name does not fit the fixed 12-byte command field
    #[error("command \"{command}\" is {len} bytes, exceeds the 12-byte command field")]
    CommandTooLong { command: String, len: usize },

    /// Payload length is not representable in the 32-bit length field
    #[error("payload of {len} bytes exceeds the 32-bit length field")]
    PayloadTooLarge { len: usize },
}

/// Message decoding failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes available than the header and its declared payload require
    #[error("message truncated: need {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    /// Magic does not match the expected network
    #[error("invalid magic: expected {expected:#010x}, got {got:#010x}")]
    BadMagic { expected: u32, got: u32 },

    /// Declared payload length exceeds the maximum message size
    #[error("declared payload length {len} exceeds maximum message size")]
    PayloadTooLarge { len: usize },

    /// Recomputed payload checksum does not match the header
    #[error("checksum mismatch: header {expected:02x?}, payload {got:02x?}")]
    ChecksumMismatch { expected: [u8; 4], got: [u8; 4] },
}
