//! Bitcoin-compatible hashing functions
//!
//! Implements the double SHA256 digest used to derive wire message
//! checksums.

use sha2::{Digest, Sha256};

/// Calculate Bitcoin double SHA256 hash
///
/// Applies SHA256 twice in succession. The first four bytes of this digest
/// form the checksum field of every wire message header.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first_hash = Sha256::digest(data);
    let second_hash = Sha256::digest(first_hash);
    let mut result = [0u8; 32];
    result.copy_from_slice(&second_hash);
    result
}

/// Calculate single SHA256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let hash = Sha256::digest(data);
    let mut result = [0u8; 32];
    result.copy_from_slice(&hash);
    result
}
