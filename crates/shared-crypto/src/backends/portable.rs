//! # Portable Backend (k256)
//!
//! Pure-Rust secp256k1 via the `k256` crate.
//!
//! `k256` refuses to recover from high-S signatures, while libsecp256k1 and
//! pre-EIP-2 chain history accept them. A high-S signature `(r, s, p)`
//! recovers the same key as `(r, n - s, !p)`, so recovery normalizes first.

use crate::ecdsa::{BackendKind, EcdsaBackend, PrivateKey, RecoverableSignature};
use crate::hashing::Hash;
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

/// Pure-Rust ECDSA backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableBackend;

impl PortableBackend {
    /// Create a new portable backend.
    pub fn new() -> Self {
        Self
    }
}

fn signing_key(private_key: &PrivateKey) -> Result<SigningKey, CryptoError> {
    SigningKey::from_bytes(private_key.as_bytes().into()).map_err(|_| CryptoError::InvalidPrivateKey)
}

impl EcdsaBackend for PortableBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Portable
    }

    fn sign_prehash(
        &self,
        hash: &Hash,
        private_key: &PrivateKey,
    ) -> Result<RecoverableSignature, CryptoError> {
        let key = signing_key(private_key)?;
        let (sig, recid) = key
            .sign_prehash_recoverable(hash)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;

        let sig_bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[..32]);
        s.copy_from_slice(&sig_bytes[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            recovery_id: recid.to_byte(),
        })
    }

    fn recover_public_key(
        &self,
        hash: &Hash,
        signature: &[u8; 64],
        recovery_id: u8,
    ) -> Result<Vec<u8>, CryptoError> {
        if recovery_id > 1 {
            return Err(CryptoError::InvalidRecoveryId(recovery_id));
        }
        let mut recid = RecoveryId::from_byte(recovery_id)
            .ok_or(CryptoError::InvalidRecoveryId(recovery_id))?;

        let mut sig = Signature::from_slice(signature)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        if let Some(low) = sig.normalize_s() {
            sig = low;
            recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
        }

        let key = VerifyingKey::recover_from_prehash(hash, &sig, recid)
            .map_err(|_| CryptoError::RecoveryFailed)?;
        Ok(key.to_encoded_point(false).as_bytes().to_vec())
    }

    fn public_key(&self, private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError> {
        let key = signing_key(private_key)?;
        Ok(key
            .verifying_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec())
    }
}
