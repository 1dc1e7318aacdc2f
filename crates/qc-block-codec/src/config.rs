//! Decoder and logging configuration.
//!
//! Defaults follow Ethereum mainnet: chain id 1, EIP-155 from block 2,675,000.

use crate::domain::errors::CodecError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_crypto::BackendKind;
use std::env;
use tracing::warn;

/// Mainnet chain id.
pub const MAINNET_CHAIN_ID: u64 = 1;

/// First mainnet block at which EIP-155 signatures are accepted.
pub const MAINNET_EIP155_BLOCK: u64 = 2_675_000;

/// Options controlling block and transaction decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Chain id expected in EIP-155 `v` values (must be non-zero)
    pub chain_id: u64,
    /// Block number from which EIP-155 is enabled during block decoding
    pub eip155_block: u64,
    /// Force EIP-155 recognition regardless of block number
    pub eip155: bool,
    /// ECDSA backend
    pub backend: BackendKind,
    /// Decode the transactions of a block on the rayon pool
    pub parallel_transactions: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            chain_id: MAINNET_CHAIN_ID,
            eip155_block: MAINNET_EIP155_BLOCK,
            eip155: false,
            backend: BackendKind::default(),
            parallel_transactions: true,
        }
    }
}

impl DecoderConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.chain_id == 0 {
            return Err(CodecError::InvalidConfig(
                "chain_id must be non-zero".to_string(),
            ));
        }
        // chain_id * 2 + 36 must fit in the 8-byte v slot
        if self.chain_id > (u64::MAX - 36) / 2 {
            return Err(CodecError::InvalidConfig(format!(
                "chain_id {} does not fit a v value",
                self.chain_id
            )));
        }
        Ok(())
    }

    /// Set the chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the EIP-155 activation block.
    pub fn with_eip155_block(mut self, block: u64) -> Self {
        self.eip155_block = block;
        self
    }

    /// Force EIP-155 recognition on or off.
    pub fn with_eip155(mut self, enabled: bool) -> Self {
        self.eip155 = enabled;
        self
    }

    /// Select the ECDSA backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Enable or disable parallel transaction decoding.
    pub fn with_parallel_transactions(mut self, parallel: bool) -> Self {
        self.parallel_transactions = parallel;
        self
    }

    /// The effective options for a block at height `number`.
    ///
    /// EIP-155 is on when forced or when `number >= eip155_block`. The
    /// receiver is not modified.
    pub fn for_block(&self, number: &U256) -> Self {
        let mut effective = self.clone();
        effective.eip155 = self.eip155 || *number >= U256::from(self.eip155_block);
        effective
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_CHAIN_ID`: Chain id (default: 1)
    /// - `QC_EIP155_BLOCK`: EIP-155 activation block (default: 2675000)
    /// - `QC_EIP155`: Force EIP-155 (default: false)
    /// - `QC_CRYPTO_BACKEND`: `accelerated` or `portable` (default: accelerated)
    /// - `QC_PARALLEL_TXS`: Parallel transaction decoding (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            chain_id: env::var("QC_CHAIN_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.chain_id),

            eip155_block: env::var("QC_EIP155_BLOCK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.eip155_block),

            eip155: env::var("QC_EIP155")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.eip155),

            backend: env::var("QC_CRYPTO_BACKEND")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(kind) => Some(kind),
                    Err(_) => {
                        warn!(value = %v, "Unknown QC_CRYPTO_BACKEND, using default");
                        None
                    }
                })
                .unwrap_or(defaults.backend),

            parallel_transactions: env::var("QC_PARALLEL_TXS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.parallel_transactions),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables.
    ///
    /// - `QC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `QC_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("QC_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("QC_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
