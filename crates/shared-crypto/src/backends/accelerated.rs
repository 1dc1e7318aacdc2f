//! # Accelerated Backend (libsecp256k1)
//!
//! secp256k1 via the `secp256k1` crate's bindings to the C library.
//! A single verification+signing context is built lazily and shared.

use crate::ecdsa::{BackendKind, EcdsaBackend, PrivateKey, RecoverableSignature};
use crate::hashing::Hash;
use crate::CryptoError;
use secp256k1::ecdsa::{RecoverableSignature as SecpRecoverableSignature, RecoveryId};
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use std::sync::OnceLock;

/// libsecp256k1-backed ECDSA backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceleratedBackend;

impl AcceleratedBackend {
    /// Create a new accelerated backend.
    pub fn new() -> Self {
        Self
    }
}

fn context() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}

fn secret_key(private_key: &PrivateKey) -> Result<SecretKey, CryptoError> {
    SecretKey::from_slice(private_key.as_bytes()).map_err(|_| CryptoError::InvalidPrivateKey)
}

impl EcdsaBackend for AcceleratedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Accelerated
    }

    fn sign_prehash(
        &self,
        hash: &Hash,
        private_key: &PrivateKey,
    ) -> Result<RecoverableSignature, CryptoError> {
        let secret = secret_key(private_key)?;
        let message = Message::from_digest(*hash);
        let signature = context().sign_ecdsa_recoverable(&message, &secret);
        let (recid, compact) = signature.serialize_compact();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[..32]);
        s.copy_from_slice(&compact[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            recovery_id: recid.to_i32() as u8,
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
        let recid = RecoveryId::from_i32(recovery_id as i32)
            .map_err(|_| CryptoError::InvalidRecoveryId(recovery_id))?;

        let signature = SecpRecoverableSignature::from_compact(signature, recid)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
        let message = Message::from_digest(*hash);

        let public_key = context()
            .recover_ecdsa(&message, &signature)
            .map_err(|_| CryptoError::RecoveryFailed)?;
        Ok(public_key.serialize_uncompressed().to_vec())
    }

    fn public_key(&self, private_key: &PrivateKey) -> Result<Vec<u8>, CryptoError> {
        let secret = secret_key(private_key)?;
        Ok(PublicKey::from_secret_key(context(), &secret)
            .serialize_uncompressed()
            .to_vec())
    }
}
