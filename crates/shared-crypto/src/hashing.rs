//! # Keccak-256 Hashing
//!
//! The 256-bit hash used for transaction preimages, header hashes and
//! address derivation. Both ECDSA backends share it.

use sha3::{Digest, Keccak256};

/// Keccak-256 output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with Keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a 20-byte account address from an uncompressed public key body
/// (the 64 bytes `x || y`, without the `0x04` prefix).
pub fn address_from_public_key(public_key: &[u8; 64]) -> [u8; 20] {
    let hash = keccak256(public_key);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
