//! Bitcoin wire message framing
//!
//! Implements the fixed 24-byte message header and the framing of command
//! payloads into transmittable messages.
//!
//! Header layout (all integers little-endian):
//!
//! | field    | offset | size | meaning                                   |
//! |----------|--------|------|-------------------------------------------|
//! | magic    | 0      | 4    | network identifier                        |
//! | command  | 4      | 12   | ASCII command name, zero-padded           |
//! | length   | 16     | 4    | payload byte length                       |
//! | checksum | 20     | 4    | first 4 bytes of double SHA256 of payload |
//!
//! The payload is opaque to this module: framing depends only on its byte
//! length, never on its content.

pub mod error;
pub mod version;

pub use error::{DecodeError, EncodingError};

use crate::hashing::double_sha256;

/// Network magic for Bitcoin mainnet
pub const MAGIC_MAINNET: u32 = 0xd9b4bef9;
/// Network magic for Bitcoin testnet
pub const MAGIC_TESTNET: u32 = 0x0709110b;
/// Network magic for regtest
pub const MAGIC_REGTEST: u32 = 0xdab5bffa;

/// Size of the fixed message header
pub const HEADER_LEN: usize = 24;

/// Width of the zero-padded command field
pub const COMMAND_LEN: usize = 12;

/// Maximum wire message size (32MB), header included
pub const MAX_WIRE_MESSAGE_LENGTH: usize = 32 * 1024 * 1024;

/// Calculate a message checksum
///
/// First four bytes of the double SHA256 of the payload, in digest order.
/// Defined for every payload, the empty one included.
pub fn checksum(payload: &[u8]) -> [u8; 4] {
    let digest = double_sha256(payload);
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Fixed-size message header
///
/// Field offsets and widths are compile-time constants; encoding uses
/// width-correct little-endian writes so no field can overrun its
/// neighbor's bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    /// Network identifier
    pub magic: u32,
    /// Command name, zero-padded to 12 bytes
    command: [u8; COMMAND_LEN],
    /// Byte length of the payload that follows the header
    pub payload_len: u32,
    /// First 4 bytes of the double SHA256 of the payload
    pub checksum: [u8; 4],
}

impl MessageHeader {
    /// Build the header for a payload
    ///
    /// Fails if the command name does not fit the 12-byte field or the
    /// payload length does not fit the 32-bit length field.
    pub fn for_payload(
        magic: u32,
        command: &str,
        payload: &[u8],
    ) -> Result<Self, EncodingError> {
        let command = encode_command(command)?;
        let payload_len = u32::try_from(payload.len())
            .map_err(|_| EncodingError::PayloadTooLarge { len: payload.len() })?;
        Ok(Self {
            magic,
            command,
            payload_len,
            checksum: checksum(payload),
        })
    }

    /// Command name with zero padding stripped
    pub fn command(&self) -> String {
        String::from_utf8_lossy(&self.command)
            .trim_end_matches('\0')
            .to_string()
    }

    /// Encode the header into its 24-byte wire form
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut header = [0u8; HEADER_LEN];
        header[0..4].copy_from_slice(&self.magic.to_le_bytes());
        header[4..16].copy_from_slice(&self.command);
        header[16..20].copy_from_slice(&self.payload_len.to_le_bytes());
        header[20..24].copy_from_slice(&self.checksum);
        header
    }

    /// Decode a header from the first 24 bytes of `data`
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < HEADER_LEN {
            return Err(DecodeError::Truncated {
                needed: HEADER_LEN,
                got: data.len(),
            });
        }

        let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let mut command = [0u8; COMMAND_LEN];
        command.copy_from_slice(&data[4..16]);
        let payload_len = u32::from_le_bytes([data[16], data[17], data[18], data[19]]);
        let mut checksum = [0u8; 4];
        checksum.copy_from_slice(&data[20..24]);

        Ok(Self {
            magic,
            command,
            payload_len,
            checksum,
        })
    }
}

/// Frame a payload into a transmittable message
///
/// Returns header + payload as a single freshly allocated byte sequence of
/// `HEADER_LEN + payload.len()` bytes. Each call returns an independently
/// owned result; no state is shared across calls.
pub fn build_message(
    magic: u32,
    command: &str,
    payload: &[u8],
) -> Result<Vec<u8>, EncodingError> {
    let header = MessageHeader::for_payload(magic, command, payload)?;

    let mut message = Vec::with_capacity(HEADER_LEN + payload.len());
    message.extend_from_slice(&header.encode());
    message.extend_from_slice(payload);
    Ok(message)
}

/// Decode and validate one framed message from the front of `data`
///
/// Rejects messages whose magic does not match `expected_magic`, whose
/// declared payload length exceeds [`MAX_WIRE_MESSAGE_LENGTH`] or the bytes
/// actually present, or whose recomputed checksum differs from the header.
/// Returns the header and a borrow of the validated payload.
pub fn decode_message(
    expected_magic: u32,
    data: &[u8],
) -> Result<(MessageHeader, &[u8]), DecodeError> {
    let header = MessageHeader::decode(data)?;

    if header.magic != expected_magic {
        return Err(DecodeError::BadMagic {
            expected: expected_magic,
            got: header.magic,
        });
    }

    let payload_len = header.payload_len as usize;
    if payload_len > MAX_WIRE_MESSAGE_LENGTH - HEADER_LEN {
        return Err(DecodeError::PayloadTooLarge { len: payload_len });
    }

    if data.len() < HEADER_LEN + payload_len {
        return Err(DecodeError::Truncated {
            needed: HEADER_LEN + payload_len,
            got: data.len(),
        });
    }

    let payload = &data[HEADER_LEN..HEADER_LEN + payload_len];
    let calculated = checksum(payload);
    if calculated != header.checksum {
        return Err(DecodeError::ChecksumMismatch {
            expected: header.checksum,
            got: calculated,
        });
    }

    Ok((header, payload))
}

fn encode_command(command: &str) -> Result<[u8; COMMAND_LEN], EncodingError> {
    let bytes = command.as_bytes();
    if bytes.len() > COMMAND_LEN {
        return Err(EncodingError::CommandTooLong {
            command: command.to_string(),
            len: bytes.len(),
        });
    }

    let mut field = [0u8; COMMAND_LEN];
    field[..bytes.len()].copy_from_slice(bytes);
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_empty_payload() {
        // First 4 bytes of double SHA256 of the empty sequence
        assert_eq!(checksum(b""), [0x5d, 0xf6, 0xe0, 0xe2]);
    }

    #[test]
    fn test_encode_command_pads_with_zeros() {
        let field = encode_command("verack").unwrap();
        assert_eq!(&field[..6], b"verack");
        assert!(field[6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_command_exact_width() {
        let field = encode_command("abcdefghijkl").unwrap();
        assert_eq!(&field, b"abcdefghijkl");
    }

    #[test]
    fn test_header_round_trip() {
        let header = MessageHeader::for_payload(MAGIC_MAINNET, "ping", b"12345678").unwrap();
        let decoded = MessageHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.command(), "ping");
        assert_eq!(decoded.payload_len, 8);
    }
}
