//! # Mainnet Vectors
//!
//! Known-answer tests against Ethereum mainnet data: the genesis header and
//! the EIP-155 reference transaction, plus a block of mainnet shape at the
//! 4,000,000 height.

use primitive_types::U256;
use qc_block_codec::{
    derive_address, encode_block, sign_transaction, AcceleratedBackend, Address, Block,
    BlockCodecApi, BlockCodecService, CodecError, DecoderConfig, Destination, EcdsaBackend, Hash,
    Header, PortableBackend, Transaction, TransactionList,
};

const EIP155_SIGNED: &str = "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";

fn h256(hex_str: &str) -> Hash {
    Hash::from_slice(&hex::decode(hex_str).unwrap())
}

fn genesis_header() -> Header {
    Header {
        parent_hash: Hash::zero(),
        uncle_hash: h256("1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347"),
        beneficiary: Address::zero(),
        state_root: h256("d7f8974fb5ac78d9ac099b9ad5018bedc2ce0a72dad1827a1709da30580f0544"),
        transactions_root: h256(
            "56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        ),
        receipts_root: h256("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421"),
        logs_bloom: vec![0u8; 256],
        difficulty: U256::from(0x4_0000_0000u64),
        number: U256::zero(),
        gas_limit: U256::from(5000u64),
        gas_used: U256::zero(),
        timestamp: U256::zero(),
        extra_data: hex::decode("11bbe8db4e347b4e8c937c1c8370e4b5ed33adb3db69cbdb7a38e1e50b1b82fa")
            .unwrap(),
        mix_hash: Hash::zero(),
        nonce: 0x42,
    }
}

fn genesis_block_bytes() -> Vec<u8> {
    encode_block(&genesis_header(), TransactionList::Signed(&[]), &[]).unwrap()
}

#[test]
fn test_genesis_header_hash() {
    assert_eq!(
        hex::encode(genesis_header().hash().as_bytes()),
        "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
    );
}

#[test]
fn test_genesis_block_decodes() {
    let service = BlockCodecService::new(DecoderConfig::default()).unwrap();
    let block = service.decode_block(&genesis_block_bytes()).unwrap();

    assert_eq!(block.header.number, U256::zero());
    assert_eq!(block.header.beneficiary, Address::zero());
    assert!(block.transactions.is_empty());
    assert!(block.uncles.is_empty());
    assert_eq!(
        hex::encode(block.header.hash().as_bytes()),
        "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
    );
}

#[test]
fn test_genesis_block_reencodes_byte_exact() {
    let bytes = genesis_block_bytes();
    let block = Block::decode_bytes(&bytes, &DecoderConfig::default(), &AcceleratedBackend::new())
        .unwrap();
    assert_eq!(block.rlp_bytes().unwrap(), bytes);
}

#[test]
fn test_eip155_reference_on_both_backends() {
    let bytes = hex::decode(EIP155_SIGNED).unwrap();
    let config = DecoderConfig::default().with_eip155(true);

    for backend in [
        &AcceleratedBackend::new() as &dyn EcdsaBackend,
        &PortableBackend::new(),
    ] {
        let tx = Transaction::decode_bytes(&bytes, &config, backend).unwrap();
        assert_eq!(
            hex::encode(tx.from.as_bytes()),
            "9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f",
            "sender mismatch on {:?}",
            backend.kind()
        );
        assert_eq!(tx.to, Destination::Call(Address::repeat_byte(0x35)));
        assert_eq!(tx.value, U256::exp10(18));
    }
}

#[test]
fn test_eip155_reference_requires_eip155() {
    let service = BlockCodecService::new(DecoderConfig::default()).unwrap();
    let bytes = hex::decode(EIP155_SIGNED).unwrap();

    assert_eq!(
        service.decode_transaction(&bytes),
        Err(CodecError::InvalidRecoveryId { v: 37 })
    );
}

#[test]
fn test_eip155_reference_in_block_after_activation() {
    let tx = hex::decode(EIP155_SIGNED).unwrap();
    let mut raw = rlp::RlpStream::new_list(1);
    raw.append_raw(&tx, 1);
    let raw = raw.out().to_vec();

    let mut header = genesis_header();
    header.number = U256::from(2_675_000u64);
    let bytes = encode_block(&header, TransactionList::Raw(&raw), &[]).unwrap();

    let block = Block::decode_bytes(&bytes, &DecoderConfig::default(), &AcceleratedBackend::new())
        .unwrap();
    assert_eq!(block.transactions.len(), 1);
    assert_eq!(block.raw_transactions, raw);
    assert_eq!(block.rlp_bytes().unwrap(), bytes);

    header.number = U256::from(2_674_999u64);
    let bytes = encode_block(&header, TransactionList::Raw(&raw), &[]).unwrap();
    assert_eq!(
        Block::decode_bytes(&bytes, &DecoderConfig::default(), &AcceleratedBackend::new()),
        Err(CodecError::InvalidRecoveryId { v: 37 })
    );
}

/// Block 4,000,000 carried 69 EIP-155 transactions. The same shape is built
/// here from signed transfers by several senders.
#[test]
fn test_post_activation_block_with_69_transactions() {
    let backend = AcceleratedBackend::new();
    let keys: Vec<U256> = (1..=3u64).map(U256::from).collect();
    let txs: Vec<_> = (0..69u64)
        .map(|n| {
            let tx = Transaction {
                nonce: (n / 3).into(),
                gas_price: 20_000_000_000u64.into(),
                gas_limit: 21_000.into(),
                to: Destination::Call(Address::repeat_byte(n as u8)),
                value: U256::from(n) * U256::exp10(15),
                data: vec![],
                from: Address::zero(),
            };
            sign_transaction(&tx, &keys[(n % 3) as usize], 1, &backend).unwrap()
        })
        .collect();

    let mut header = genesis_header();
    header.number = U256::from(4_000_000u64);
    let bytes = encode_block(&header, TransactionList::Signed(&txs), &[]).unwrap();

    let block = Block::decode_bytes(&bytes, &DecoderConfig::default(), &PortableBackend::new())
        .unwrap();
    assert_eq!(block.transactions.len(), 69);
    for (n, tx) in block.transactions.iter().enumerate() {
        let expected = derive_address(&keys[n % 3], &backend).unwrap();
        assert_eq!(tx.from, expected, "sender of transaction {n}");
    }
    assert_eq!(
        hex::encode(block.transactions[0].from.as_bytes()),
        "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
    );
    assert_eq!(block.rlp_bytes().unwrap(), bytes);
}
