//! Token configuration file.
//!
//! A JSON map from chain name to a token entry. Router addresses may be left
//! out and are then taken from the chain configuration; the owner defaults to
//! the deploying signer.
//!
//! ```json
//! {
//!   "goerli": { "type": "collateral", "token": "0x…" },
//!   "fuji": { "type": "synthetic", "gas": 70000 },
//!   "alfajores": { "type": "synthetic", "owner": "0x…" }
//! }
//! ```

use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use warp_route::WarpError;
use warp_route::chain::ChainMap;
use warp_route::token::{RawTokenConfig, RouterConfig, TokenConfig, WarpRouteConfig};

use crate::config::DeployerConfig;
use crate::error::{ConfigError, DeployerError};
use crate::files::read_json;

/// One chain's entry in the token config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRouteEntry {
    /// Token fields, classified by their `type` tag.
    #[serde(flatten)]
    pub token: RawTokenConfig,
    /// Mailbox override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailbox: Option<Address>,
    /// Interchain gas paymaster override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interchain_gas_paymaster: Option<Address>,
    /// Final router owner. Defaults to the signer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Address>,
    /// Destination gas overhead override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
}

/// Reads a token config file.
///
/// # Errors
///
/// [`DeployerError::Io`] or [`DeployerError::Json`].
pub fn load_token_config(path: &Path) -> Result<ChainMap<TokenRouteEntry>, DeployerError> {
    read_json(path)
}

/// Completes every entry into a [`WarpRouteConfig`], keeping file order.
///
/// # Errors
///
/// [`WarpError::InvalidTokenConfig`] for an entry with a bad tag, and
/// [`ConfigError`] when a router address is missing from both files.
pub fn resolve_route(
    entries: &ChainMap<TokenRouteEntry>,
    chains: &DeployerConfig,
    signer: Address,
) -> Result<ChainMap<WarpRouteConfig>, DeployerError> {
    entries.try_map(|chain, entry| {
        let token = TokenConfig::try_from(entry.token.clone())
            .map_err(|source| WarpError::invalid_config(chain.as_str(), source))?;
        let chain_config = chains.chain(chain)?;
        let missing = |field| ConfigError::MissingRouterField {
            chain: chain.clone(),
            field,
        };
        let router = RouterConfig {
            mailbox: entry
                .mailbox
                .or(chain_config.mailbox)
                .ok_or_else(|| missing("mailbox"))?,
            interchain_gas_paymaster: entry
                .interchain_gas_paymaster
                .or(chain_config.interchain_gas_paymaster)
                .ok_or_else(|| missing("interchain_gas_paymaster"))?,
            owner: entry.owner.unwrap_or(signer),
            gas: entry.gas,
        };
        Ok(WarpRouteConfig { router, token })
    })
}
