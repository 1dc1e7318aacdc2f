//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key is zero or not below the secp256k1 group order
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signature bytes could not be parsed as a secp256k1 signature
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Recovery id outside {0, 1}
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// The backend rejected the signature during public key recovery
    #[error("Failed to recover public key")]
    RecoveryFailed,
}
