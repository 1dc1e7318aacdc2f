//! # Header Codec
//!
//! Decode/encode the fixed 15-field positional header record. The index
//! order below is the wire order and must not change.

use super::entities::{Address, Hash, Header};
use super::errors::CodecError;
use super::scalar::{
    decode_fixed, decode_u256, decode_u64, encode_u256, expect_list, expect_single_item,
    item_bytes,
};
use rlp::{Encodable, Rlp, RlpStream};
use shared_crypto::keccak256;

const HEADER_PARENT_HASH: usize = 0;
const HEADER_UNCLE_HASH: usize = 1;
const HEADER_BENEFICIARY: usize = 2;
const HEADER_STATE_ROOT: usize = 3;
const HEADER_TRANSACTIONS_ROOT: usize = 4;
const HEADER_RECEIPTS_ROOT: usize = 5;
const HEADER_LOGS_BLOOM: usize = 6;
const HEADER_DIFFICULTY: usize = 7;
const HEADER_NUMBER: usize = 8;
const HEADER_GAS_LIMIT: usize = 9;
const HEADER_GAS_USED: usize = 10;
const HEADER_TIMESTAMP: usize = 11;
const HEADER_EXTRA_DATA: usize = 12;
const HEADER_MIX_HASH: usize = 13;
const HEADER_NONCE: usize = 14;

/// Number of fields in an encoded header.
pub const HEADER_FIELDS: usize = 15;

fn hash_at(list: &Rlp<'_>, index: usize, field: &'static str) -> Result<Hash, CodecError> {
    Ok(Hash::from(decode_fixed::<32>(item_bytes(list, index, field)?, field)?))
}

impl Header {
    /// Decode a header from its RLP list.
    ///
    /// Fails with `MalformedStructure` unless `rlp` is a list of exactly 15
    /// byte strings.
    pub fn decode(rlp: &Rlp<'_>) -> Result<Self, CodecError> {
        expect_list(rlp, HEADER_FIELDS, "block header")?;

        let beneficiary = decode_fixed::<20>(
            item_bytes(rlp, HEADER_BENEFICIARY, "beneficiary")?,
            "beneficiary",
        )?;

        Ok(Header {
            parent_hash: hash_at(rlp, HEADER_PARENT_HASH, "parent_hash")?,
            uncle_hash: hash_at(rlp, HEADER_UNCLE_HASH, "uncle_hash")?,
            beneficiary: Address::from(beneficiary),
            state_root: hash_at(rlp, HEADER_STATE_ROOT, "state_root")?,
            transactions_root: hash_at(rlp, HEADER_TRANSACTIONS_ROOT, "transactions_root")?,
            receipts_root: hash_at(rlp, HEADER_RECEIPTS_ROOT, "receipts_root")?,
            logs_bloom: item_bytes(rlp, HEADER_LOGS_BLOOM, "logs_bloom")?.to_vec(),
            difficulty: decode_u256(item_bytes(rlp, HEADER_DIFFICULTY, "difficulty")?, "difficulty")?,
            number: decode_u256(item_bytes(rlp, HEADER_NUMBER, "number")?, "number")?,
            gas_limit: decode_u256(item_bytes(rlp, HEADER_GAS_LIMIT, "gas_limit")?, "gas_limit")?,
            gas_used: decode_u256(item_bytes(rlp, HEADER_GAS_USED, "gas_used")?, "gas_used")?,
            timestamp: decode_u256(item_bytes(rlp, HEADER_TIMESTAMP, "timestamp")?, "timestamp")?,
            extra_data: item_bytes(rlp, HEADER_EXTRA_DATA, "extra_data")?.to_vec(),
            mix_hash: hash_at(rlp, HEADER_MIX_HASH, "mix_hash")?,
            nonce: decode_u64(item_bytes(rlp, HEADER_NONCE, "nonce")?, "nonce")?,
        })
    }

    /// Decode a header from its serialized bytes; trailing bytes are rejected.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        expect_single_item(bytes, "block header")?;
        Self::decode(&Rlp::new(bytes))
    }

    /// Serialize the header as an RLP list.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Keccak-256 of the serialized header (the block hash).
    pub fn hash(&self) -> Hash {
        Hash::from(keccak256(&self.rlp_bytes()))
    }
}

impl Encodable for Header {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(HEADER_FIELDS);
        s.append(&self.parent_hash.as_bytes().to_vec());
        s.append(&self.uncle_hash.as_bytes().to_vec());
        s.append(&self.beneficiary.as_bytes().to_vec());
        s.append(&self.state_root.as_bytes().to_vec());
        s.append(&self.transactions_root.as_bytes().to_vec());
        s.append(&self.receipts_root.as_bytes().to_vec());
        s.append(&self.logs_bloom);
        s.append(&encode_u256(&self.difficulty));
        s.append(&encode_u256(&self.number));
        s.append(&encode_u256(&self.gas_limit));
        s.append(&encode_u256(&self.gas_used));
        s.append(&encode_u256(&self.timestamp));
        s.append(&self.extra_data);
        s.append(&self.mix_hash.as_bytes().to_vec());
        s.append(&self.nonce.to_be_bytes().to_vec());
    }
}
