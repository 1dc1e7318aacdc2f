//! # Block Codec Service
//!
//! Application service layer that implements the `BlockCodecApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`BlockCodecApi`)
//! - Holds a validated `DecoderConfig` and the backend it selects
//! - Delegates all codec work to the domain layer

use crate::config::DecoderConfig;
use crate::domain::block::encode_block;
use crate::domain::entities::{
    Address, Block, Header, SignedTransaction, Transaction, TransactionList,
};
use crate::domain::errors::CodecError;
use crate::domain::keys;
use crate::domain::stream::BlockStream;
use crate::ports::inbound::BlockCodecApi;
use primitive_types::U256;
use shared_crypto::EcdsaBackend;
use std::sync::Arc;
use tracing::info;

/// Block codec service.
///
/// The backend is resolved once from the configuration and shared by every
/// call; the configuration itself is never mutated after construction.
#[derive(Clone, Debug)]
pub struct BlockCodecService {
    config: DecoderConfig,
    backend: Arc<dyn EcdsaBackend>,
}

impl BlockCodecService {
    /// Create a service using the backend named in `config`.
    pub fn new(config: DecoderConfig) -> Result<Self, CodecError> {
        let backend = config.backend.backend();
        Self::with_backend(config, backend)
    }

    /// Create a service with an explicit backend instance.
    pub fn with_backend(
        config: DecoderConfig,
        backend: Arc<dyn EcdsaBackend>,
    ) -> Result<Self, CodecError> {
        config.validate()?;
        info!(
            chain_id = config.chain_id,
            eip155_block = config.eip155_block,
            eip155 = config.eip155,
            backend = %backend.kind(),
            "Block codec configured"
        );
        Ok(Self { config, backend })
    }

    /// Configuration in effect.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Backend in use.
    pub fn backend(&self) -> &dyn EcdsaBackend {
        self.backend.as_ref()
    }

    /// Iterate over back-to-back block encodings in `bytes`.
    pub fn decode_stream<'a>(&'a self, bytes: &'a [u8]) -> BlockStream<'a> {
        BlockStream::new(bytes, &self.config, self.backend.as_ref())
    }

    /// Decode a block on the blocking thread pool.
    ///
    /// Signature recovery is CPU-bound; this keeps it off async workers.
    pub async fn decode_block_async(&self, bytes: Vec<u8>) -> Result<Block, CodecError> {
        let config = self.config.clone();
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || Block::decode_bytes(&bytes, &config, backend.as_ref()))
            .await
            .map_err(|e| CodecError::Aborted(e.to_string()))?
    }
}

impl BlockCodecApi for BlockCodecService {
    fn decode_header(&self, bytes: &[u8]) -> Result<Header, CodecError> {
        Header::decode_bytes(bytes)
    }

    fn decode_transaction(&self, bytes: &[u8]) -> Result<Transaction, CodecError> {
        Transaction::decode_bytes(bytes, &self.config, self.backend.as_ref())
    }

    fn decode_block(&self, bytes: &[u8]) -> Result<Block, CodecError> {
        Block::decode_bytes(bytes, &self.config, self.backend.as_ref())
    }

    fn encode_block(
        &self,
        header: &Header,
        transactions: TransactionList<'_>,
        uncles: &[Header],
    ) -> Result<Vec<u8>, CodecError> {
        encode_block(header, transactions, uncles)
    }

    fn derive_address(&self, private_key: &U256) -> Result<Address, CodecError> {
        keys::derive_address(private_key, self.backend.as_ref())
    }

    fn sign_transaction(
        &self,
        tx: &Transaction,
        private_key: &U256,
        chain_id: u64,
    ) -> Result<SignedTransaction, CodecError> {
        keys::sign_transaction(tx, private_key, chain_id, self.backend.as_ref())
    }
}

// =============================================================================
// TESTS
// =============================================================================
