//! Error types for the deployer.

use std::path::PathBuf;

use warp_route::WarpError;
use warp_route_evm::EvmChainError;

/// Errors raised while loading the chain configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML for this schema.
    #[error("invalid chain config: {0}")]
    Toml(#[from] toml::de::Error),
    /// A chain named by the token config has no entry in the chain config.
    #[error("chain {0} is not configured")]
    MissingChain(String),
    /// A chain outside the registry lacks a required setting.
    #[error("chain {chain} needs `{field}` (not a known Hyperlane chain)")]
    MissingChainField {
        /// Chain name.
        chain: String,
        /// Missing setting.
        field: &'static str,
    },
    /// A router address was given neither in the token config nor the chain config.
    #[error("no `{field}` for chain {chain} in token or chain config")]
    MissingRouterField {
        /// Chain name.
        chain: String,
        /// Missing setting.
        field: &'static str,
    },
}

/// Top-level deployer error.
#[derive(Debug, thiserror::Error)]
pub enum DeployerError {
    /// Chain or token configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Deployment or transfer failed.
    #[error(transparent)]
    Warp(#[from] WarpError),
    /// Connecting to a chain failed.
    #[error(transparent)]
    Evm(#[from] EvmChainError),
    /// A JSON file could not be parsed or written.
    #[error("invalid json in {path}: {source}")]
    Json {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// A JSON file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The private key is malformed.
    #[error("invalid private key: {0}")]
    Signer(#[from] alloy_signer_local::LocalSignerError),
}
