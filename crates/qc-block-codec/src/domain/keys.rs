//! # Key Operations
//!
//! Address derivation and transaction signing over a chosen ECDSA backend.

use super::entities::{Address, SignedTransaction, Transaction};
use super::errors::CodecError;
use super::scalar::trim_leading_zeros;
use super::transaction::{address_from_recovered, v_for_chain};
use primitive_types::U256;
use shared_crypto::{EcdsaBackend, PrivateKey};
use tracing::debug;

/// Convert a 256-bit scalar into a secp256k1 private key.
///
/// Fails with `InvalidPrivateKey` unless `1 <= key < n`.
pub fn private_key_from_u256(key: &U256) -> Result<PrivateKey, CodecError> {
    let mut bytes = [0u8; 32];
    key.to_big_endian(&mut bytes);
    Ok(PrivateKey::from_bytes(bytes)?)
}

/// Derive the account address controlled by `private_key`.
pub fn derive_address(
    private_key: &U256,
    backend: &dyn EcdsaBackend,
) -> Result<Address, CodecError> {
    let key = private_key_from_u256(private_key)?;
    let public_key = backend.public_key(&key)?;
    address_from_recovered(&public_key)
}

/// Sign `tx` with `private_key`.
///
/// `chain_id == 0` signs the legacy six-field preimage with `v ∈ {27, 28}`;
/// any other chain id signs the EIP-155 preimage with
/// `v = recovery_id + chain_id * 2 + 35`. The `from` field of `tx` is ignored.
pub fn sign_transaction(
    tx: &Transaction,
    private_key: &U256,
    chain_id: u64,
    backend: &dyn EcdsaBackend,
) -> Result<SignedTransaction, CodecError> {
    let key = private_key_from_u256(private_key)?;
    let hash = backend.keccak256(&tx.unsigned_rlp(chain_id));
    let signature = backend.sign_prehash(&hash, &key)?;
    let v = v_for_chain(signature.recovery_id, chain_id)?;

    debug!(
        chain_id,
        v,
        backend = %backend.kind(),
        "Signed transaction"
    );

    Ok(SignedTransaction {
        nonce: tx.nonce,
        gas_price: tx.gas_price,
        gas_limit: tx.gas_limit,
        to: tx.to,
        value: tx.value,
        data: tx.data.clone(),
        v,
        r: trim_leading_zeros(&signature.r).to_vec(),
        s: trim_leading_zeros(&signature.s).to_vec(),
    })
}
