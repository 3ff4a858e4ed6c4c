//! EVM chain connections.
//!
//! - [`RpcEndpoint`] - One HTTP RPC endpoint with an optional rate limit
//! - [`ConnectionConfig`] - Everything needed to connect to and transact on a chain
//! - [`EvmChainProvider`] - Signing provider for one chain

mod provider;

pub use provider::EvmChainProvider;

use serde::{Deserialize, Serialize};
use url::Url;

/// An HTTP RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcEndpoint {
    /// Endpoint URL. Only `http` and `https` are used.
    pub url: Url,
    /// Maximum requests per second sent to this endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u32>,
}

/// Connection parameters of one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// EIP-155 chain ID.
    pub chain_id: u64,
    /// RPC endpoints, tried in order with fallback.
    pub rpc_urls: Vec<RpcEndpoint>,
    /// Block confirmations awaited for every transaction.
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
    /// Seconds to wait for a receipt before giving up.
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
    /// Whether the chain prices gas with EIP-1559.
    #[serde(default = "default_eip1559")]
    pub eip1559: bool,
}

const fn default_confirmations() -> u64 {
    1
}

const fn default_receipt_timeout_secs() -> u64 {
    30
}

const fn default_eip1559() -> bool {
    true
}
