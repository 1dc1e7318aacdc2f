//! # ECDSA Backend Interface (secp256k1)
//!
//! The seam between the block codec and the elliptic-curve primitives.
//! Two interchangeable implementations exist:
//!
//! - [`PortableBackend`](crate::PortableBackend): pure Rust (`k256`)
//! - [`AcceleratedBackend`](crate::AcceleratedBackend): libsecp256k1 bindings (`secp256k1`)
//!
//! Both must agree bit-for-bit on every valid input. Backends are stateless
//! and safe to call concurrently.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Private key material is zeroized on drop

use crate::hashing::{self, Hash};
use crate::{AcceleratedBackend, CryptoError, PortableBackend};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use zeroize::Zeroize;

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
pub const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Length of a SEC1 uncompressed public key (`0x04 || x || y`).
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// A secp256k1 private key, validated to lie in `[1, n-1]`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Create from big-endian secret bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        // Big-endian byte arrays of equal length order like the integers they encode
        if bytes == [0u8; 32] || bytes >= SECP256K1_ORDER {
            return Err(CryptoError::InvalidPrivateKey);
        }
        Ok(Self(bytes))
    }

    /// Get raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A compact ECDSA signature with its recovery id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// R component (32 bytes, big-endian)
    pub r: [u8; 32],
    /// S component (32 bytes, big-endian)
    pub s: [u8; 32],
    /// Recovery id (0 or 1)
    pub recovery_id: u8,
}

impl RecoverableSignature {
    /// The 64-byte `r || s` form.
    pub fn to_compact(&self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&self.r);
        compact[32..].copy_from_slice(&self.s);
        compact
    }
}

/// ECDSA and hashing primitives consumed by the block codec.
pub trait EcdsaBackend: Send + Sync + fmt::Debug {
    /// Which implementation this is.
    fn kind(&self) -> BackendKind;

    /// Keccak-256 of arbitrary bytes.
    fn keccak256(&self, data: &[u8]) -> Hash {
        hashing::keccak256(data)
    }

    /// Sign a 32-byte prehash (RFC 6979 deterministic nonce, low-S).
    fn sign_prehash(
        &self,
        hash: &Hash,
        private_key: &PrivateKey,
    ) -> Result<RecoverableSignature, CryptoError>;

    /// Recover the SEC1 uncompressed public key that produced `signature`
    /// over `hash`.
    fn recover_public_key(
        &self,
        hash: &Hash,
        signature: &[u8; 64],
        recovery_id: u8,
    ) -> Result<Vec<u8>, CryptoError>;

    /// SEC1 uncompressed public key for a private key.
    fn public_key(&self, private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError>;
}

/// Backend selector, resolved once at configuration time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// libsecp256k1 via the `secp256k1` crate
    #[default]
    Accelerated,
    /// Pure Rust via the `k256` crate
    Portable,
}

impl BackendKind {
    /// Instantiate the selected backend.
    pub fn backend(self) -> Arc<dyn EcdsaBackend> {
        match self {
            BackendKind::Accelerated => Arc::new(AcceleratedBackend::new()),
            BackendKind::Portable => Arc::new(PortableBackend::new()),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Accelerated => f.write_str("accelerated"),
            BackendKind::Portable => f.write_str("portable"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accelerated" | "native" => Ok(BackendKind::Accelerated),
            "portable" | "pure" => Ok(BackendKind::Portable),
            other => Err(format!("unknown crypto backend: {other}")),
        }
    }
}
