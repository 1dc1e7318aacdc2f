//! # Block Codec (qc-block-codec)
//!
//! Decodes Ethereum blocks, headers and legacy/EIP-155 transactions from RLP,
//! recovers transaction senders, and encodes and signs the same records.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure codec logic, no I/O
//! - **Ports Layer** (`ports/`): The inbound `BlockCodecApi` trait
//! - **Service Layer** (`service.rs`): Wires configuration and backend to the domain
//!
//! Curve operations go through `shared_crypto::EcdsaBackend`, with an
//! accelerated (libsecp256k1) and a portable (pure Rust) implementation that
//! produce identical results.
//!
//! ## Decoding Notes
//!
//! - A block decodes only if every transaction in it decodes.
//! - EIP-155 is decided per block from the header number; the caller's
//!   configuration is never mutated.
//! - Contract creation (empty `to`) is `Destination::ContractCreation`, never
//!   the zero address.

pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{DecoderConfig, LoggingConfig, MAINNET_CHAIN_ID, MAINNET_EIP155_BLOCK};
pub use domain::block::{encode_block, BLOCK_FIELDS};
pub use domain::entities::{
    Address, Block, Destination, Hash, Header, SignedTransaction, Transaction, TransactionList,
    CONTRACT_CREATION,
};
pub use domain::errors::CodecError;
pub use domain::header::HEADER_FIELDS;
pub use domain::keys::{derive_address, private_key_from_u256, sign_transaction};
pub use domain::stream::BlockStream;
pub use domain::transaction::{recovery_id, TRANSACTION_FIELDS};
pub use logging::init_logging;
pub use ports::inbound::BlockCodecApi;
pub use service::BlockCodecService;
pub use shared_crypto::{AcceleratedBackend, BackendKind, EcdsaBackend, PortableBackend};
