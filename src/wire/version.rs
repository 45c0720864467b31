//! Version handshake payload
//!
//! Builds the payload for the initial "version" message a node sends after
//! opening an outbound connection. The framing layer treats the result as an
//! opaque byte sequence; only this module knows the field layout.
//!
//! Payload layout (integers little-endian):
//!
//! | field     | offset | size | meaning                          |
//! |-----------|--------|------|----------------------------------|
//! | version   | 0      | 4    | protocol version                 |
//! | services  | 4      | 8    | supported-services bitmask       |
//! | timestamp | 12     | 8    | Unix seconds, signed             |
//! | addr_recv | 20     | 26   | receiving address, zero-filled   |
//! | addr_from | 46     | 26   | originating address, zero-filled |
//! | nonce     | 72     | 8    | random connection nonce          |
//!
//! The payload is transmitted as a fixed 1024-byte buffer; bytes past the
//! structured fields stay zero.

use std::time::{SystemTime, UNIX_EPOCH};

/// Command name of the handshake message
pub const VERSION_COMMAND: &str = "version";

/// Wire size of the version payload
pub const VERSION_PAYLOAD_LEN: usize = 1024;

/// Offset of the version field
pub const VERSION_OFFSET: usize = 0;
/// Offset of the services bitmask
pub const SERVICES_OFFSET: usize = 4;
/// Offset of the timestamp
pub const TIMESTAMP_OFFSET: usize = 12;
/// Offset of the zero-filled receiving address placeholder
pub const ADDR_RECV_OFFSET: usize = 20;
/// Offset of the zero-filled originating address placeholder
pub const ADDR_FROM_OFFSET: usize = 46;
/// Offset of the connection nonce
pub const NONCE_OFFSET: usize = 72;

/// Version message payload
///
/// Address fields are zero-filled placeholders; peers tolerate this for an
/// initial probe. The nonce distinguishes this connection's own messages
/// from echoes of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPayload {
    /// Protocol version to advertise
    pub version: u32,
    /// Supported-services bitmask
    pub services: u64,
    /// Unix timestamp (seconds)
    pub timestamp: i64,
    /// Random connection nonce
    pub nonce: u64,
}

impl VersionPayload {
    /// Create a payload with the current time and a fresh random nonce
    ///
    /// Each call draws an independent nonce; concurrent handshakes share no
    /// counter.
    pub fn new(version: u32, services: u64) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        Self {
            version,
            services,
            timestamp,
            nonce: rand::random::<u64>(),
        }
    }

    /// Encode the payload into its fixed 1024-byte wire form
    ///
    /// Every field is written with its declared width at its declared
    /// offset; a fresh buffer is returned on every call.
    pub fn encode(&self) -> Vec<u8> {
        let mut payload = vec![0u8; VERSION_PAYLOAD_LEN];

        payload[VERSION_OFFSET..VERSION_OFFSET + 4]
            .copy_from_slice(&self.version.to_le_bytes());
        payload[SERVICES_OFFSET..SERVICES_OFFSET + 8]
            .copy_from_slice(&self.services.to_le_bytes());
        payload[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 8]
            .copy_from_slice(&self.timestamp.to_le_bytes());
        // addr_recv and addr_from remain zero-filled placeholders
        payload[NONCE_OFFSET..NONCE_OFFSET + 8].copy_from_slice(&self.nonce.to_le_bytes());

        payload
    }
}
