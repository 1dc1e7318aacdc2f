//! # Shared Crypto - Hashing and secp256k1 Backends
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Preimage hashing, address derivation |
//! | `ecdsa` | secp256k1 | Backend trait, key and signature types |
//! | `backends::portable` | secp256k1 (`k256`) | Pure-Rust implementation |
//! | `backends::accelerated` | secp256k1 (`secp256k1`) | libsecp256k1 implementation |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S signatures from both backends
//! - **Parity**: both backends recover identical keys, including from high-S
//!   signatures found in early chain history

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backends;
pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use backends::accelerated::AcceleratedBackend;
pub use backends::portable::PortableBackend;
pub use ecdsa::{
    BackendKind, EcdsaBackend, PrivateKey, RecoverableSignature, SECP256K1_ORDER,
    UNCOMPRESSED_PUBLIC_KEY_LEN,
};
pub use errors::CryptoError;
pub use hashing::{address_from_public_key, keccak256, Hash};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
