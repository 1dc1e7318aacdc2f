//! # Signing and Recovery Tests
//!
//! Sign with one backend, decode with the other, across legacy and
//! replay-protected chain ids.

use primitive_types::U256;
use proptest::prelude::*;
use qc_block_codec::{
    derive_address, encode_block, recovery_id, sign_transaction, AcceleratedBackend, Address,
    Block, BlockCodecApi, BlockCodecService, BlockStream, CodecError, DecoderConfig, Destination,
    EcdsaBackend, Header, PortableBackend, Transaction, TransactionList, CONTRACT_CREATION,
};

const CHAIN_IDS: [u64; 5] = [0, 1, 3, 61, 1337];

fn backends() -> [Box<dyn EcdsaBackend>; 2] {
    [
        Box::new(AcceleratedBackend::new()),
        Box::new(PortableBackend::new()),
    ]
}

fn config_for(chain_id: u64) -> DecoderConfig {
    DecoderConfig::default()
        .with_chain_id(chain_id.max(1))
        .with_eip155(chain_id != 0)
}

fn transfer(nonce: u64, to: Destination) -> Transaction {
    Transaction {
        nonce: nonce.into(),
        gas_price: 50_000_000_000u64.into(),
        gas_limit: 90_000.into(),
        to,
        value: U256::exp10(17),
        data: b"quantum".to_vec(),
        from: Address::zero(),
    }
}

fn empty_header(number: u64) -> Header {
    Header {
        parent_hash: Default::default(),
        uncle_hash: Default::default(),
        beneficiary: Address::zero(),
        state_root: Default::default(),
        transactions_root: Default::default(),
        receipts_root: Default::default(),
        logs_bloom: vec![0u8; 256],
        difficulty: U256::from(17_179_869_184u64),
        number: number.into(),
        gas_limit: U256::from(5000u64),
        gas_used: U256::zero(),
        timestamp: U256::zero(),
        extra_data: vec![],
        mix_hash: Default::default(),
        nonce: 0,
    }
}

#[test]
fn test_key_one_address_on_both_backends() {
    for backend in backends() {
        let address = derive_address(&U256::one(), backend.as_ref()).unwrap();
        assert_eq!(
            hex::encode(address.as_bytes()),
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }
}

#[test]
fn test_key_one_signs_for_its_own_address() {
    let own_address = Address::from_slice(
        &hex::decode("7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap(),
    );

    for backend in backends() {
        let signer = derive_address(&U256::one(), backend.as_ref()).unwrap();
        assert_eq!(signer, own_address);

        let signed = sign_transaction(
            &transfer(0, Destination::Call(own_address)),
            &U256::one(),
            1,
            backend.as_ref(),
        )
        .unwrap();
        let tx = Transaction::decode_bytes(&signed.rlp_bytes(), &config_for(1), backend.as_ref())
            .unwrap();

        assert_eq!(tx.from, signer);
        assert_eq!(tx.to, Destination::Call(own_address));
    }
}

#[test]
fn test_cross_backend_sign_and_recover() {
    let key = U256::from_big_endian(&[0x5A; 32]);

    for chain_id in CHAIN_IDS {
        for signer in backends() {
            let expected = derive_address(&key, signer.as_ref()).unwrap();
            let signed = sign_transaction(
                &transfer(7, Destination::Call(Address::repeat_byte(0x01))),
                &key,
                chain_id,
                signer.as_ref(),
            )
            .unwrap();

            if chain_id == 0 {
                assert!(signed.v == 27 || signed.v == 28);
            } else {
                assert!(signed.v == chain_id * 2 + 35 || signed.v == chain_id * 2 + 36);
            }

            for verifier in backends() {
                let tx = Transaction::decode_bytes(
                    &signed.rlp_bytes(),
                    &config_for(chain_id),
                    verifier.as_ref(),
                )
                .unwrap();
                assert_eq!(tx.from, expected, "chain {chain_id}");
            }
        }
    }
}

#[test]
fn test_backends_produce_identical_signatures() {
    let key = U256::from(0xDEAD_BEEFu64);
    let tx = transfer(1, CONTRACT_CREATION);

    for chain_id in CHAIN_IDS {
        let a = sign_transaction(&tx, &key, chain_id, &AcceleratedBackend::new()).unwrap();
        let p = sign_transaction(&tx, &key, chain_id, &PortableBackend::new()).unwrap();
        assert_eq!(a, p);
    }
}

#[test]
fn test_replay_protected_signature_rejected_on_other_chain() {
    let key = U256::from(99u64);
    let signed = sign_transaction(&transfer(0, CONTRACT_CREATION), &key, 61, &PortableBackend::new())
        .unwrap();

    // v = 157/158 is outside both the chain-1 window and {27, 28}
    let result = Transaction::decode_bytes(
        &signed.rlp_bytes(),
        &config_for(1),
        &AcceleratedBackend::new(),
    );
    assert!(matches!(result, Err(CodecError::InvalidRecoveryId { .. })));
}

#[test]
fn test_contract_creation_roundtrip() {
    let service = BlockCodecService::new(DecoderConfig::default()).unwrap();
    let signed = service
        .sign_transaction(&transfer(0, CONTRACT_CREATION), &U256::from(5u64), 0)
        .unwrap();

    let tx = service.decode_transaction(&signed.rlp_bytes()).unwrap();
    assert!(tx.to.is_contract_creation());
    assert_ne!(tx.to, Destination::Call(Address::zero()));
}

#[test]
fn test_invalid_private_keys() {
    let service = BlockCodecService::new(DecoderConfig::default()).unwrap();
    let order = U256::from_big_endian(&shared_crypto::SECP256K1_ORDER);

    for key in [U256::zero(), order, U256::MAX] {
        assert_eq!(service.derive_address(&key), Err(CodecError::InvalidPrivateKey));
        assert_eq!(
            service.sign_transaction(&transfer(0, CONTRACT_CREATION), &key, 1),
            Err(CodecError::InvalidPrivateKey)
        );
    }
}

#[test]
fn test_signed_block_stream() {
    let key = U256::from(1234u64);
    let backend = AcceleratedBackend::new();
    let config = DecoderConfig::default().with_eip155_block(5);

    let mut chain = Vec::new();
    for number in 0..10u64 {
        let chain_id = if number >= 5 { 1 } else { 0 };
        let txs: Vec<_> = (0..number)
            .map(|n| {
                sign_transaction(&transfer(n, CONTRACT_CREATION), &key, chain_id, &backend)
                    .unwrap()
            })
            .collect();
        chain.extend(
            encode_block(&empty_header(number), TransactionList::Signed(&txs), &[]).unwrap(),
        );
    }

    let sender = derive_address(&key, &backend).unwrap();
    let blocks: Vec<Block> = BlockStream::new(&chain, &config, &backend)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(blocks.len(), 10);
    for (number, block) in blocks.iter().enumerate() {
        assert_eq!(block.transactions.len(), number);
        assert!(block.transactions.iter().all(|tx| tx.from == sender));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any v outside the legacy and chain windows is rejected.
    #[test]
    fn prop_recovery_id_domain(v in any::<u64>(), chain_id in 1u64..100_000) {
        let legacy = recovery_id(v, chain_id, false);
        prop_assert_eq!(legacy.is_ok(), v == 27 || v == 28);

        let protected = recovery_id(v, chain_id, true);
        let chain_v = chain_id * 2 + 35;
        prop_assert_eq!(protected.is_ok(), v == chain_v || v == chain_v + 1);
    }

    /// Signing then decoding yields the signer on either backend.
    #[test]
    fn prop_sign_decode_sender(
        key_bytes in prop::array::uniform32(1u8..),
        nonce in any::<u64>(),
        data in prop::collection::vec(any::<u8>(), 0..64),
        chain_id in prop::sample::select(CHAIN_IDS.to_vec()),
    ) {
        let key = U256::from_big_endian(&key_bytes);
        let accelerated = AcceleratedBackend::new();
        let portable = PortableBackend::new();
        prop_assume!(derive_address(&key, &accelerated).is_ok());

        let mut tx = transfer(nonce, Destination::Call(Address::repeat_byte(0x42)));
        tx.data = data;
        let signed = sign_transaction(&tx, &key, chain_id, &accelerated).unwrap();
        let bytes = signed.rlp_bytes();

        let a = Transaction::decode_bytes(&bytes, &config_for(chain_id), &accelerated).unwrap();
        let p = Transaction::decode_bytes(&bytes, &config_for(chain_id), &portable).unwrap();
        prop_assert_eq!(&a, &p);
        prop_assert_eq!(a.from, derive_address(&key, &portable).unwrap());
        prop_assert_eq!(a.data, tx.data);
    }

    /// Header encode/decode is lossless for arbitrary field values.
    #[test]
    fn prop_header_roundtrip(
        number in any::<u64>(),
        difficulty in any::<u128>(),
        nonce in any::<u64>(),
        extra in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let mut header = empty_header(number);
        header.difficulty = U256::from(difficulty);
        header.nonce = nonce;
        header.extra_data = extra;

        let decoded = Header::decode_bytes(&header.rlp_bytes()).unwrap();
        prop_assert_eq!(decoded, header);
    }
}
