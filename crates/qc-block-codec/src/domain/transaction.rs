//! # Transaction Codec (legacy + EIP-155)
//!
//! Decodes the 9-field positional transaction record and recovers its sender.
//!
//! ## Signature Rules
//!
//! - `r` and `s` are at most 32 bytes each and are right-aligned into a
//!   64-byte `r || s` buffer.
//! - With EIP-155 decoding enabled and `v ∈ {chain_id*2+35, chain_id*2+36}`,
//!   the recovery id is `v - chain_id*2 - 35` and the signed preimage is
//!   `[nonce, gasPrice, gasLimit, to, value, data, chain_id, '', '']`.
//! - Otherwise the recovery id is `v - 27` and the preimage is the first six
//!   fields.
//! - A recovery id outside {0, 1} is rejected before any curve operation.

use super::entities::{Address, Destination, SignedTransaction, Transaction};
use super::errors::CodecError;
use super::scalar::{
    decode_fixed, decode_u256, decode_u64, encode_u256, encode_u64, expect_list,
    expect_single_item, item_bytes,
};
use crate::config::DecoderConfig;
use primitive_types::H256;
use rlp::{Encodable, Rlp, RlpStream};
use shared_crypto::{address_from_public_key, keccak256, EcdsaBackend, UNCOMPRESSED_PUBLIC_KEY_LEN};

const TRANSACTION_NONCE: usize = 0;
const TRANSACTION_GAS_PRICE: usize = 1;
const TRANSACTION_GAS_LIMIT: usize = 2;
const TRANSACTION_TO: usize = 3;
const TRANSACTION_VALUE: usize = 4;
const TRANSACTION_DATA: usize = 5;
const TRANSACTION_V: usize = 6;
const TRANSACTION_R: usize = 7;
const TRANSACTION_S: usize = 8;

/// Number of fields in a signed transaction.
pub const TRANSACTION_FIELDS: usize = 9;

/// Number of fields in a legacy (pre-EIP-155) signing preimage.
const UNSIGNED_FIELDS: usize = 6;

/// `v` offset for legacy signatures.
const LEGACY_V_OFFSET: u64 = 27;

/// `v` offset added to `chain_id * 2` for replay-protected signatures.
const EIP155_V_OFFSET: u64 = 35;

/// Whether `v` marks an EIP-155 replay-protected signature under `config`.
pub fn is_eip155_v(v: u64, config: &DecoderConfig) -> bool {
    if !config.eip155 {
        return false;
    }
    let chain_v = config.chain_id as u128 * 2 + EIP155_V_OFFSET as u128;
    let v = v as u128;
    v == chain_v || v == chain_v + 1
}

/// Derive the recovery id from `v`.
///
/// Fails with `InvalidRecoveryId` unless the result is 0 or 1.
pub fn recovery_id(v: u64, chain_id: u64, protected: bool) -> Result<u8, CodecError> {
    let base = if protected {
        chain_id as u128 * 2 + EIP155_V_OFFSET as u128
    } else {
        LEGACY_V_OFFSET as u128
    };
    match (v as u128).checked_sub(base) {
        Some(id @ 0..=1) => Ok(id as u8),
        _ => Err(CodecError::InvalidRecoveryId { v }),
    }
}

/// Compute `v` for a signature made with `recovery_id` on `chain_id`
/// (0 meaning no replay protection).
pub fn v_for_chain(recovery_id: u8, chain_id: u64) -> Result<u64, CodecError> {
    if chain_id == 0 {
        return Ok(LEGACY_V_OFFSET + recovery_id as u64);
    }
    chain_id
        .checked_mul(2)
        .and_then(|v| v.checked_add(EIP155_V_OFFSET + recovery_id as u64))
        .ok_or_else(|| CodecError::InvalidConfig(format!("chain id {chain_id} too large")))
}

/// Append the EIP-155 trailer `[chain_id, '', '']`.
fn append_chain_trailer(stream: &mut RlpStream, chain_id: u64) {
    stream.append(&encode_u64(chain_id));
    stream.append_empty_data();
    stream.append_empty_data();
}

/// Serialize the signing preimage of a wire transaction, reusing the
/// original encodings of its first six fields.
fn wire_preimage(rlp: &Rlp<'_>, chain_id: Option<u64>) -> Result<Vec<u8>, CodecError> {
    let fields = if chain_id.is_some() {
        TRANSACTION_FIELDS
    } else {
        UNSIGNED_FIELDS
    };
    let mut stream = RlpStream::new_list(fields);
    for index in TRANSACTION_NONCE..=TRANSACTION_DATA {
        stream.append_raw(rlp.at(index)?.as_raw(), 1);
    }
    if let Some(chain_id) = chain_id {
        append_chain_trailer(&mut stream, chain_id);
    }
    Ok(stream.out().to_vec())
}

/// Address from a SEC1 uncompressed public key returned by a backend.
pub(crate) fn address_from_recovered(public_key: &[u8]) -> Result<Address, CodecError> {
    if public_key.len() != UNCOMPRESSED_PUBLIC_KEY_LEN {
        return Err(CodecError::InvalidSignature(format!(
            "incorrect public key length {}",
            public_key.len()
        )));
    }
    let body: [u8; 64] = public_key[1..]
        .try_into()
        .map_err(|_| CodecError::InvalidSignature("incorrect public key body".to_string()))?;
    Ok(Address::from(address_from_public_key(&body)))
}

fn decode_destination(bytes: &[u8]) -> Result<Destination, CodecError> {
    if bytes.is_empty() {
        return Ok(Destination::ContractCreation);
    }
    Ok(Destination::Call(Address::from(decode_fixed::<20>(
        bytes, "to",
    )?)))
}

fn destination_bytes(to: &Destination) -> Vec<u8> {
    match to {
        Destination::Call(address) => address.as_bytes().to_vec(),
        Destination::ContractCreation => Vec::new(),
    }
}

impl Transaction {
    /// Decode a signed transaction and recover its sender.
    ///
    /// `config.eip155` decides whether replay-protected `v` values are
    /// recognized; block decoding passes the per-block effective value.
    pub fn decode(
        rlp: &Rlp<'_>,
        config: &DecoderConfig,
        backend: &dyn EcdsaBackend,
    ) -> Result<Self, CodecError> {
        expect_list(rlp, TRANSACTION_FIELDS, "transaction")?;

        let v = item_bytes(rlp, TRANSACTION_V, "v")?;
        let r = item_bytes(rlp, TRANSACTION_R, "r")?;
        let s = item_bytes(rlp, TRANSACTION_S, "s")?;

        if r.len() > 32 {
            return Err(CodecError::FieldTooLarge {
                field: "r",
                len: r.len(),
                max: 32,
            });
        }
        if s.len() > 32 {
            return Err(CodecError::FieldTooLarge {
                field: "s",
                len: s.len(),
                max: 32,
            });
        }

        let mut signature = [0u8; 64];
        signature[32 - r.len()..32].copy_from_slice(r);
        signature[64 - s.len()..].copy_from_slice(s);

        let v = decode_u64(v, "v")?;
        let protected = is_eip155_v(v, config);
        let recovery = recovery_id(v, config.chain_id, protected)?;

        let preimage = wire_preimage(rlp, protected.then_some(config.chain_id))?;
        let hash = backend.keccak256(&preimage);
        let public_key = backend.recover_public_key(&hash, &signature, recovery)?;
        let from = address_from_recovered(&public_key)?;

        Ok(Transaction {
            nonce: decode_u256(item_bytes(rlp, TRANSACTION_NONCE, "nonce")?, "nonce")?,
            gas_price: decode_u256(
                item_bytes(rlp, TRANSACTION_GAS_PRICE, "gas_price")?,
                "gas_price",
            )?,
            gas_limit: decode_u256(
                item_bytes(rlp, TRANSACTION_GAS_LIMIT, "gas_limit")?,
                "gas_limit",
            )?,
            to: decode_destination(item_bytes(rlp, TRANSACTION_TO, "to")?)?,
            value: decode_u256(item_bytes(rlp, TRANSACTION_VALUE, "value")?, "value")?,
            data: item_bytes(rlp, TRANSACTION_DATA, "data")?.to_vec(),
            from,
        })
    }

    /// Decode a signed transaction from its serialized bytes; trailing
    /// bytes are rejected.
    pub fn decode_bytes(
        bytes: &[u8],
        config: &DecoderConfig,
        backend: &dyn EcdsaBackend,
    ) -> Result<Self, CodecError> {
        expect_single_item(bytes, "transaction")?;
        Self::decode(&Rlp::new(bytes), config, backend)
    }

    /// Serialize the unsigned signing preimage: six fields when `chain_id`
    /// is 0, otherwise the EIP-155 nine-field form.
    pub fn unsigned_rlp(&self, chain_id: u64) -> Vec<u8> {
        let fields = if chain_id == 0 {
            UNSIGNED_FIELDS
        } else {
            TRANSACTION_FIELDS
        };
        let mut stream = RlpStream::new_list(fields);
        stream.append(&encode_u256(&self.nonce));
        stream.append(&encode_u256(&self.gas_price));
        stream.append(&encode_u256(&self.gas_limit));
        stream.append(&destination_bytes(&self.to));
        stream.append(&encode_u256(&self.value));
        stream.append(&self.data);
        if chain_id != 0 {
            append_chain_trailer(&mut stream, chain_id);
        }
        stream.out().to_vec()
    }
}

impl SignedTransaction {
    /// Serialize as the 9-field wire list.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Keccak-256 of the wire bytes (the transaction hash).
    pub fn hash(&self) -> H256 {
        H256::from(keccak256(&self.rlp_bytes()))
    }
}

impl Encodable for SignedTransaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(TRANSACTION_FIELDS);
        s.append(&encode_u256(&self.nonce));
        s.append(&encode_u256(&self.gas_price));
        s.append(&encode_u256(&self.gas_limit));
        s.append(&destination_bytes(&self.to));
        s.append(&encode_u256(&self.value));
        s.append(&self.data);
        s.append(&encode_u64(self.v));
        s.append(&self.r);
        s.append(&self.s);
    }
}
