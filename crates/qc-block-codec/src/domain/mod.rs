//! # Domain Layer
//!
//! Pure codec logic. Curve operations are reached only through the
//! `EcdsaBackend` trait from `shared-crypto`.

pub mod block;
pub mod entities;
pub mod errors;
pub mod header;
pub mod keys;
pub(crate) mod scalar;
pub mod stream;
pub mod transaction;
