//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that external callers use
//!
//! The only driven dependency, the ECDSA backend, is the `EcdsaBackend`
//! trait exported by `shared-crypto`.

pub mod inbound;
