//! # Domain Entities
//!
//! Decoded block records. All records are immutable values once decoded.

use primitive_types::{H160, H256, U256};
use serde::{Deserialize, Serialize};

/// 160-bit account address (last 20 bytes of keccak256(pubkey))
pub type Address = H160;

/// 256-bit Keccak hash
pub type Hash = H256;

// =============================================================================
// Header
// =============================================================================

/// A block header: 15 positional fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Keccak hash of the parent block's header
    pub parent_hash: Hash,
    /// Keccak hash of the uncle (ommer) list
    pub uncle_hash: Hash,
    /// Address receiving the mining fees
    pub beneficiary: Address,
    /// Root of the state trie after execution
    pub state_root: Hash,
    /// Root of the transaction trie
    pub transactions_root: Hash,
    /// Root of the receipt trie
    pub receipts_root: Hash,
    /// Logs bloom filter, kept as opaque bytes
    pub logs_bloom: Vec<u8>,
    /// Difficulty scalar
    pub difficulty: U256,
    /// Number of ancestor blocks (genesis is 0)
    pub number: U256,
    /// Gas limit for the block
    pub gas_limit: U256,
    /// Gas used by all transactions in the block
    pub gas_used: U256,
    /// Unix timestamp at block inception
    pub timestamp: U256,
    /// Arbitrary data, 32 bytes or fewer by consensus rule (not enforced here)
    pub extra_data: Vec<u8>,
    /// Proof-of-work mix hash
    pub mix_hash: Hash,
    /// Proof-of-work nonce (8 bytes on the wire)
    pub nonce: u64,
}

// =============================================================================
// Transactions
// =============================================================================

/// Destination of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// Message call to an account (the zero address is a valid target)
    Call(Address),
    /// No recipient: create a new contract
    ContractCreation,
}

/// Contract-creation sentinel, distinct from `Call(Address::zero())`.
pub const CONTRACT_CREATION: Destination = Destination::ContractCreation;

impl Destination {
    /// Whether this is the contract-creation sentinel.
    pub fn is_contract_creation(&self) -> bool {
        matches!(self, Destination::ContractCreation)
    }
}

impl From<Address> for Destination {
    fn from(address: Address) -> Self {
        Destination::Call(address)
    }
}

/// A decoded transaction with its recovered sender.
///
/// The wire signature (v, r, s) is consumed during decode and is not part of
/// the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Number of transactions previously sent by the sender
    pub nonce: U256,
    /// Wei paid per unit of gas
    pub gas_price: U256,
    /// Maximum gas this transaction may consume
    pub gas_limit: U256,
    /// Recipient, or the contract-creation sentinel
    pub to: Destination,
    /// Wei transferred
    pub value: U256,
    /// Call data or contract init code
    pub data: Vec<u8>,
    /// Sender recovered from the signature
    pub from: Address,
}

/// A signed transaction in its 9-field wire layout.
///
/// `v`, `r` and `s` are minimally encoded, as produced by signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
    pub to: Destination,
    pub value: U256,
    pub data: Vec<u8>,
    pub v: u64,
    pub r: Vec<u8>,
    pub s: Vec<u8>,
}

// =============================================================================
// Block
// =============================================================================

/// A decoded block: header, ordered transactions and uncle headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
    pub uncles: Vec<Header>,
    /// The transaction list exactly as it appeared on the wire (RLP list
    /// header included). Re-encoding decoded scalar fields is not guaranteed
    /// to reproduce these bytes, so byte-exact round trips use this.
    #[serde(skip)]
    pub raw_transactions: Vec<u8>,
}

/// Transactions supplied to block encoding.
#[derive(Clone, Copy, Debug)]
pub enum TransactionList<'a> {
    /// An already-serialized RLP list of transactions
    Raw(&'a [u8]),
    /// Signed transaction records, serialized on the fly
    Signed(&'a [SignedTransaction]),
}

impl<'a> From<&'a Block> for TransactionList<'a> {
    fn from(block: &'a Block) -> Self {
        TransactionList::Raw(&block.raw_transactions)
    }
}
