//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of the block codec.

use crate::domain::entities::{
    Address, Block, Header, SignedTransaction, Transaction, TransactionList,
};
use crate::domain::errors::CodecError;
use primitive_types::U256;

/// Primary block codec API.
///
/// Implementations must be thread-safe (`Send + Sync`). Every operation is a
/// pure function of its inputs and the implementation's configuration.
pub trait BlockCodecApi: Send + Sync {
    /// Decode a 15-field header.
    fn decode_header(&self, bytes: &[u8]) -> Result<Header, CodecError>;

    /// Decode one signed transaction and recover its sender.
    ///
    /// EIP-155 recognition follows the configured `eip155` flag only; there
    /// is no block number to compare against.
    fn decode_transaction(&self, bytes: &[u8]) -> Result<Transaction, CodecError>;

    /// Decode a full block, recovering every sender.
    fn decode_block(&self, bytes: &[u8]) -> Result<Block, CodecError>;

    /// Serialize `[header, transactions, uncles]`.
    fn encode_block(
        &self,
        header: &Header,
        transactions: TransactionList<'_>,
        uncles: &[Header],
    ) -> Result<Vec<u8>, CodecError>;

    /// Address controlled by `private_key`.
    fn derive_address(&self, private_key: &U256) -> Result<Address, CodecError>;

    /// Sign `tx`; `chain_id == 0` produces a legacy signature.
    fn sign_transaction(
        &self,
        tx: &Transaction,
        private_key: &U256,
        chain_id: u64,
    ) -> Result<SignedTransaction, CodecError>;
}
