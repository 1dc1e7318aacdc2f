//! Decoding of concatenated RLP blocks (e.g. a chain export).

use super::entities::Block;
use super::errors::CodecError;
use crate::config::DecoderConfig;
use rlp::PayloadInfo;
use shared_crypto::EcdsaBackend;

/// Iterator over the blocks of a byte buffer holding back-to-back block
/// encodings.
///
/// Stops after the first error; a truncated trailing item is an error.
pub struct BlockStream<'a> {
    remaining: &'a [u8],
    config: &'a DecoderConfig,
    backend: &'a dyn EcdsaBackend,
}

impl<'a> BlockStream<'a> {
    pub fn new(bytes: &'a [u8], config: &'a DecoderConfig, backend: &'a dyn EcdsaBackend) -> Self {
        Self {
            remaining: bytes,
            config,
            backend,
        }
    }

    fn next_item(&mut self) -> Result<&'a [u8], CodecError> {
        let total = PayloadInfo::from(self.remaining)?.total();
        if total > self.remaining.len() {
            return Err(CodecError::MalformedStructure(format!(
                "truncated block: need {total} bytes, have {}",
                self.remaining.len()
            )));
        }
        let (item, rest) = self.remaining.split_at(total);
        self.remaining = rest;
        Ok(item)
    }
}

impl<'a> Iterator for BlockStream<'a> {
    type Item = Result<Block, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let result = self
            .next_item()
            .and_then(|item| Block::decode_bytes(item, self.config, self.backend));
        if result.is_err() {
            self.remaining = &[];
        }
        Some(result)
    }
}
