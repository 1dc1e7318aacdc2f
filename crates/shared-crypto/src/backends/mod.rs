//! # ECDSA Backend Implementations
//!
//! - `portable`: pure Rust, works on every target
//! - `accelerated`: libsecp256k1 C library

pub mod accelerated;
pub mod portable;
