//! Error types for the EVM binding.

use std::path::PathBuf;

use alloy_primitives::TxHash;
use alloy_provider::PendingTransactionError;
use alloy_transport::TransportError;

/// Errors raised while talking to an EVM chain.
#[derive(Debug, thiserror::Error)]
pub enum EvmChainError {
    /// RPC transport error.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// Waiting for a receipt failed or timed out.
    #[error(transparent)]
    PendingTransaction(#[from] PendingTransactionError),
    /// Contract call failed or returned undecodable data.
    #[error("contract call failed: {0}")]
    Contract(#[from] alloy_contract::Error),
    /// On-chain transaction was reverted.
    #[error("transaction {0} reverted")]
    TransactionReverted(TxHash),
    /// A deployment receipt carried no contract address.
    #[error("deployment {0} produced no contract address")]
    MissingContractAddress(TxHash),
    /// The chain has no connection configured.
    #[error("no provider configured for chain {0}")]
    UnknownChain(String),
    /// No HTTP RPC endpoint is usable for the chain.
    #[error("no http rpc endpoint configured for chain {0}")]
    NoRpcEndpoints(String),
    /// Deployment was requested without an artifacts directory.
    #[error("no contract artifacts configured")]
    NoArtifacts,
    /// Router bytecode could not be loaded.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// Errors raised while loading contract artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// The artifact file could not be read.
    #[error("failed to read artifact {path}: {source}")]
    Io {
        /// Artifact path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The artifact is not Hardhat or Foundry JSON.
    #[error("failed to parse artifact {path}: {source}")]
    Json {
        /// Artifact path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The artifact has no creation bytecode (an interface or abstract contract).
    #[error("artifact {0} has empty bytecode")]
    EmptyBytecode(PathBuf),
}
