//! Tests for wire message framing and header invariants

use peerdial::hashing::{double_sha256, sha256};
use peerdial::wire::{
    build_message, checksum, decode_message, DecodeError, EncodingError, MessageHeader,
    COMMAND_LEN, HEADER_LEN, MAGIC_MAINNET,
};

#[test]
fn test_message_length_is_header_plus_payload() {
    for len in [0usize, 1, 24, 255, 1024, 100_000] {
        let payload = vec![0xabu8; len];
        let message = build_message(MAGIC_MAINNET, "test", &payload).unwrap();
        assert_eq!(message.len(), HEADER_LEN + len);
    }
}

#[test]
fn test_length_field_little_endian() {
    for len in [0usize, 1, 1024, 65_537] {
        let payload = vec![0u8; len];
        let message = build_message(MAGIC_MAINNET, "test", &payload).unwrap();
        let field = u32::from_le_bytes([message[16], message[17], message[18], message[19]]);
        assert_eq!(field as usize, len);
    }
}

#[test]
fn test_checksum_is_first_four_bytes_of_double_sha256() {
    for payload in [&b""[..], b"x", b"some payload bytes"] {
        let message = build_message(MAGIC_MAINNET, "test", payload).unwrap();
        assert_eq!(&message[20..24], &double_sha256(payload)[..4]);
    }
}

#[test]
fn test_double_sha256_is_sha256_applied_twice() {
    for input in [&b""[..], b"a", b"version", &[0u8; 1024][..]] {
        assert_eq!(double_sha256(input), sha256(&sha256(input)));
    }
}

#[test]
fn test_command_field_round_trip() {
    for name in ["version", "verack", "a", "abcdefghijkl"] {
        let message = build_message(MAGIC_MAINNET, name, b"").unwrap();
        let header = MessageHeader::decode(&message).unwrap();
        assert_eq!(header.command(), name);
    }
}

#[test]
fn test_command_too_long_rejected() {
    let result = build_message(MAGIC_MAINNET, "abcdefghijklm", b"");
    assert_eq!(
        result,
        Err(EncodingError::CommandTooLong {
            command: "abcdefghijklm".to_string(),
            len: COMMAND_LEN + 1,
        })
    );
}

#[test]
fn test_version_message_scenario() {
    // 1024 zero bytes except a nonce at the version payload's nonce offset
    let mut payload = vec![0u8; 1024];
    payload[72..80].copy_from_slice(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);

    let message = build_message(MAGIC_MAINNET, "version", &payload).unwrap();

    assert_eq!(message.len(), 1048);
    assert_eq!(&message[0..4], &MAGIC_MAINNET.to_le_bytes());
    assert_eq!(&message[4..11], b"version");
    assert_eq!(&message[11..16], &[0u8; 5]);
    assert_eq!(&message[16..20], &1024u32.to_le_bytes());
    assert_eq!(&message[20..24], &double_sha256(&payload)[..4]);
    assert_eq!(&message[24..], payload.as_slice());
}

#[test]
fn test_empty_payload_scenario() {
    let message = build_message(MAGIC_MAINNET, "verack", b"").unwrap();

    assert_eq!(message.len(), HEADER_LEN);
    assert_eq!(&message[16..20], &[0u8; 4]);
    // First 4 bytes of double SHA256 of the empty sequence
    assert_eq!(&message[20..24], &[0x5d, 0xf6, 0xe0, 0xe2]);
}

#[test]
fn test_checksum_computed_for_empty_payload() {
    assert_eq!(checksum(b""), [0x5d, 0xf6, 0xe0, 0xe2]);
    assert_ne!(checksum(b""), [0u8; 4]);
}

#[test]
fn test_decode_round_trip() {
    let payload = b"round trip payload";
    let message = build_message(MAGIC_MAINNET, "ping", payload).unwrap();

    let (header, decoded_payload) = decode_message(MAGIC_MAINNET, &message).unwrap();
    assert_eq!(header.command(), "ping");
    assert_eq!(header.payload_len as usize, payload.len());
    assert_eq!(decoded_payload, payload);
}

#[test]
fn test_decode_rejects_wrong_magic() {
    let message = build_message(MAGIC_MAINNET, "ping", b"abc").unwrap();
    let result = decode_message(0x0b110907, &message);
    assert!(matches!(result, Err(DecodeError::BadMagic { .. })));
}

#[test]
fn test_decode_rejects_corrupted_payload() {
    let mut message = build_message(MAGIC_MAINNET, "ping", b"abcdef").unwrap();
    message[HEADER_LEN] ^= 0xff;
    let result = decode_message(MAGIC_MAINNET, &message);
    assert!(matches!(result, Err(DecodeError::ChecksumMismatch { .. })));
}

#[test]
fn test_decode_rejects_corrupted_checksum_field() {
    let mut message = build_message(MAGIC_MAINNET, "ping", b"abcdef").unwrap();
    message[20] ^= 0xff;
    let result = decode_message(MAGIC_MAINNET, &message);
    assert!(matches!(result, Err(DecodeError::ChecksumMismatch { .. })));
}

#[test]
fn test_decode_rejects_truncated_header() {
    let message = build_message(MAGIC_MAINNET, "ping", b"").unwrap();
    let result = decode_message(MAGIC_MAINNET, &message[..HEADER_LEN - 1]);
    assert_eq!(
        result.unwrap_err(),
        DecodeError::Truncated {
            needed: HEADER_LEN,
            got: HEADER_LEN - 1,
        }
    );
}

#[test]
fn test_decode_rejects_short_payload() {
    let message = build_message(MAGIC_MAINNET, "ping", b"abcdef").unwrap();
    let result = decode_message(MAGIC_MAINNET, &message[..message.len() - 1]);
    assert_eq!(
        result.unwrap_err(),
        DecodeError::Truncated {
            needed: HEADER_LEN + 6,
            got: HEADER_LEN + 5,
        }
    );
}

#[test]
fn test_decode_rejects_oversized_declared_length() {
    let mut message = build_message(MAGIC_MAINNET, "ping", b"").unwrap();
    message[16..20].copy_from_slice(&u32::MAX.to_le_bytes());
    let result = decode_message(MAGIC_MAINNET, &message);
    assert!(matches!(result, Err(DecodeError::PayloadTooLarge { .. })));
}

#[test]
fn test_each_build_returns_independent_buffer() {
    let payload = b"shared input";
    let a = build_message(MAGIC_MAINNET, "ping", payload).unwrap();
    let mut b = build_message(MAGIC_MAINNET, "ping", payload).unwrap();
    assert_eq!(a, b);
    b[0] ^= 0xff;
    assert_ne!(a, b);
}
