//! Fuzz target for block decoding.
//!
//! ## Running
//!
//! ```bash
//! cd crates/qc-block-codec
//! cargo +nightly fuzz run fuzz_decode_block
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use qc_block_codec::{AcceleratedBackend, Block, DecoderConfig, TransactionList};

fuzz_target!(|data: &[u8]| {
    let config = DecoderConfig::default().with_parallel_transactions(false);
    let backend = AcceleratedBackend::new();

    // Must never panic, whatever the input
    if let Ok(block) = Block::decode_bytes(data, &config, &backend) {
        // A decoded block re-encodes from its own parts and decodes again
        let bytes = qc_block_codec::encode_block(
            &block.header,
            TransactionList::from(&block),
            &block.uncles,
        )
        .expect("raw transactions came from a decoded list");
        let again = Block::decode_bytes(&bytes, &config, &backend)
            .expect("re-encoded block must decode");
        assert_eq!(again.header, block.header);
        assert_eq!(again.transactions, block.transactions);
    }
});
