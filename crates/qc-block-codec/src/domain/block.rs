//! # Block Codec
//!
//! A block is the 3-element list `[header, [transactions...], [uncles...]]`.
//!
//! Transactions are independent of each other once the per-block EIP-155
//! flag is known, so they are decoded on the rayon pool. Results keep wire
//! order and the first failure fails the whole block.

use super::entities::{Block, Header, SignedTransaction, Transaction, TransactionList};
use super::errors::CodecError;
use super::scalar::{expect_list, expect_single_item, list_items};
use crate::config::DecoderConfig;
use rayon::prelude::*;
use rlp::{Rlp, RlpStream};
use shared_crypto::EcdsaBackend;
use tracing::{debug, warn};

const BLOCK_HEADER: usize = 0;
const BLOCK_TRANSACTIONS: usize = 1;
const BLOCK_UNCLES: usize = 2;

/// Number of top-level elements in an encoded block.
pub const BLOCK_FIELDS: usize = 3;

fn decode_indexed(
    index: usize,
    raw: &[u8],
    config: &DecoderConfig,
    backend: &dyn EcdsaBackend,
) -> Result<Transaction, CodecError> {
    Transaction::decode_bytes(raw, config, backend).map_err(|e| {
        warn!(index, error = %e, "Rejected transaction");
        e
    })
}

impl Block {
    /// Decode a block, recovering the sender of every transaction.
    ///
    /// EIP-155 is enabled for this block when `config.eip155` is set or the
    /// header number is at least `config.eip155_block`.
    pub fn decode(
        rlp: &Rlp<'_>,
        config: &DecoderConfig,
        backend: &dyn EcdsaBackend,
    ) -> Result<Self, CodecError> {
        expect_list(rlp, BLOCK_FIELDS, "block")?;

        let header = Header::decode(&rlp.at(BLOCK_HEADER)?)?;
        let effective = config.for_block(&header.number);

        let tx_list = rlp.at(BLOCK_TRANSACTIONS)?;
        // Rlp caches offsets in Cells, so only raw slices cross threads.
        let raw_txs = list_items(&tx_list, "transaction list")?;

        let transactions = if effective.parallel_transactions {
            raw_txs
                .par_iter()
                .enumerate()
                .map(|(index, raw)| decode_indexed(index, raw, &effective, backend))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            raw_txs
                .iter()
                .enumerate()
                .map(|(index, raw)| decode_indexed(index, raw, &effective, backend))
                .collect::<Result<Vec<_>, _>>()?
        };

        let uncles = list_items(&rlp.at(BLOCK_UNCLES)?, "uncle list")?
            .into_iter()
            .map(|uncle| Header::decode(&Rlp::new(uncle)))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            number = %header.number,
            transactions = transactions.len(),
            uncles = uncles.len(),
            eip155 = effective.eip155,
            "Decoded block"
        );

        Ok(Block {
            header,
            transactions,
            uncles,
            raw_transactions: tx_list.as_raw().to_vec(),
        })
    }

    /// Decode a block from its serialized bytes.
    ///
    /// `bytes` must hold exactly one block; trailing bytes are rejected.
    pub fn decode_bytes(
        bytes: &[u8],
        config: &DecoderConfig,
        backend: &dyn EcdsaBackend,
    ) -> Result<Self, CodecError> {
        expect_single_item(bytes, "block")?;
        Self::decode(&Rlp::new(bytes), config, backend)
    }

    /// Re-encode this block from its header, original transaction bytes and
    /// uncles.
    pub fn rlp_bytes(&self) -> Result<Vec<u8>, CodecError> {
        encode_block(&self.header, TransactionList::from(self), &self.uncles)
    }
}

/// Check that `bytes` is exactly one RLP list item.
fn check_raw_list(bytes: &[u8]) -> Result<(), CodecError> {
    expect_single_item(bytes, "raw transactions")?;
    if !Rlp::new(bytes).is_list() {
        return Err(CodecError::MalformedStructure(
            "raw transactions must be a single RLP list".to_string(),
        ));
    }
    Ok(())
}

/// Serialize `[header, transactions, uncles]`.
///
/// `TransactionList::Raw` bytes are embedded verbatim and must be a single
/// RLP list; signed records are serialized in order.
pub fn encode_block(
    header: &Header,
    transactions: TransactionList<'_>,
    uncles: &[Header],
) -> Result<Vec<u8>, CodecError> {
    let mut stream = RlpStream::new_list(BLOCK_FIELDS);
    stream.append(header);
    match transactions {
        TransactionList::Raw(raw) => {
            check_raw_list(raw)?;
            stream.append_raw(raw, 1);
        }
        TransactionList::Signed(signed) => {
            stream.append_list::<SignedTransaction, _>(signed);
        }
    }
    stream.append_list::<Header, _>(uncles);
    Ok(stream.out().to_vec())
}
