//! Fuzz target for transaction decoding and sender recovery.
//!
//! Both backends must agree on every input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use qc_block_codec::{AcceleratedBackend, DecoderConfig, PortableBackend, Transaction};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    chain_id: u64,
    eip155: bool,
    bytes: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let config = DecoderConfig::default()
        .with_chain_id(input.chain_id.max(1))
        .with_eip155(input.eip155);

    let accelerated = Transaction::decode_bytes(&input.bytes, &config, &AcceleratedBackend::new());
    let portable = Transaction::decode_bytes(&input.bytes, &config, &PortableBackend::new());

    match (accelerated, portable) {
        (Ok(a), Ok(p)) => assert_eq!(a, p),
        (Err(_), Err(_)) => {}
        (a, p) => panic!("backends disagree: {a:?} vs {p:?}"),
    }
});
