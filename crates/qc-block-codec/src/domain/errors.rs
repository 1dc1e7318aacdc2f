//! # Codec Errors
//!
//! Error types for block, header and transaction decoding, encoding and signing.
//!
//! Every variant is a deterministic function of the input bytes or keys; none
//! of them is retryable.

use shared_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while decoding, encoding or signing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Wrong arity or wrong element type at a decode boundary
    #[error("Malformed structure: {0}")]
    MalformedStructure(String),

    /// A field is wider than its slot allows
    #[error("Field {field} too large: {len} bytes (max {max})")]
    FieldTooLarge {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Derived recovery id outside {0, 1}
    #[error("Invalid recovery ID derived from v = {v}")]
    InvalidRecoveryId { v: u64 },

    /// Recovered public key has unexpected length, or the backend rejected the signature
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Private key is zero or not below the curve order
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A background decode task ended without delivering a result
    #[error("Decode task aborted: {0}")]
    Aborted(String),
}

impl From<rlp::DecoderError> for CodecError {
    fn from(e: rlp::DecoderError) -> Self {
        CodecError::MalformedStructure(e.to_string())
    }
}

impl From<CryptoError> for CodecError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::InvalidPrivateKey => CodecError::InvalidPrivateKey,
            CryptoError::InvalidRecoveryId(id) => CodecError::InvalidRecoveryId { v: id as u64 },
            CryptoError::InvalidSignature(reason) => CodecError::InvalidSignature(reason),
            CryptoError::RecoveryFailed => {
                CodecError::InvalidSignature("public key recovery failed".to_string())
            }
        }
    }
}
