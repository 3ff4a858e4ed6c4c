//! Chain connection configuration.
//!
//! Loads chain settings from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax.
//! Chains known to the Hyperlane registry only need their RPC endpoints; the
//! chain ID, domain and native token are filled in from the registry unless
//! overridden.
//!
//! # Example Configuration
//!
//! ```toml
//! artifacts = "./artifacts"
//!
//! [chains.goerli]
//! rpc_urls = [{ url = "$GOERLI_RPC_URL", rate_limit = 10 }]
//! mailbox = "0x0000000000000000000000000000000000000001"
//! interchain_gas_paymaster = "0x0000000000000000000000000000000000000002"
//! confirmations = 2
//!
//! [chains.anvil]
//! chain_id = 31337
//! domain_id = 31337
//! rpc_urls = [{ url = "http://localhost:8545" }]
//! native_token = { name = "Ether", symbol = "ETH", decimals = 18 }
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to configuration file (default: `chains.toml`)
//! - Any variable referenced by `$VAR` in the config file

use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use warp_route::chain::{ChainMap, ChainMetadata, Domain, NativeToken};
use warp_route_evm::chain::{ConnectionConfig, RpcEndpoint};

use crate::error::ConfigError;

/// Top-level deployer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployerConfig {
    /// Directory holding router contract artifacts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<PathBuf>,

    /// Chain settings keyed by chain name.
    #[serde(default)]
    pub chains: ChainMap<ChainConfig>,
}

/// Per-chain settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// EIP-155 chain ID. Required for chains missing from the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Hyperlane domain. Required for chains missing from the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Domain>,

    /// HTTP RPC endpoints.
    pub rpc_urls: Vec<RpcEndpoint>,

    /// Mailbox used by routers that do not set one in the token config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailbox: Option<Address>,

    /// Interchain gas paymaster used by routers that do not set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interchain_gas_paymaster: Option<Address>,

    /// Block confirmations per transaction (default: 1).
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,

    /// Seconds to wait for a receipt (default: 30).
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,

    /// Whether the chain prices gas with EIP-1559 (default: true).
    #[serde(default = "default_eip1559")]
    pub eip1559: bool,

    /// Native asset descriptor, overriding the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_token: Option<NativeToken>,
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

impl ChainConfig {
    /// Chain metadata: explicit settings first, then the registry entry.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingChainField`] if the chain ID or domain is known
    /// from neither.
    pub fn metadata(
        &self,
        chain: &str,
        known: Option<&ChainMetadata>,
    ) -> Result<ChainMetadata, ConfigError> {
        let missing = |field| ConfigError::MissingChainField {
            chain: chain.to_owned(),
            field,
        };
        Ok(ChainMetadata {
            chain_id: self
                .chain_id
                .or_else(|| known.map(|k| k.chain_id))
                .ok_or_else(|| missing("chain_id"))?,
            domain_id: self
                .domain_id
                .or_else(|| known.map(|k| k.domain_id))
                .ok_or_else(|| missing("domain_id"))?,
            native_token: self
                .native_token
                .clone()
                .or_else(|| known.and_then(|k| k.native_token.clone())),
        })
    }

    /// Connection parameters for a chain with the given EIP-155 ID.
    #[must_use]
    pub fn connection(&self, chain_id: u64) -> ConnectionConfig {
        ConnectionConfig {
            chain_id,
            rpc_urls: self.rpc_urls.clone(),
            confirmations: self.confirmations,
            receipt_timeout_secs: self.receipt_timeout_secs,
            eip1559: self.eip1559,
        }
    }
}

impl DeployerConfig {
    /// Loads configuration from the path given by the `CONFIG` environment
    /// variable, falling back to `chains.toml` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| "chains.toml".to_owned());
        Self::load_from(path)
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file yields an empty configuration. All `$VAR` / `${VAR}`
    /// references are expanded from the process environment before parsing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_owned(),
                source,
            })?
        } else {
            String::new()
        };
        Self::parse(&content, |name| std::env::var(name).ok())
    }

    /// Parses TOML content, expanding variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed content.
    pub fn parse(
        content: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(content, lookup);
        Ok(toml::from_str(&expanded)?)
    }

    /// Settings of `chain`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingChain`] if the chain is not configured.
    pub fn chain(&self, chain: &str) -> Result<&ChainConfig, ConfigError> {
        self.chains
            .get(chain)
            .ok_or_else(|| ConfigError::MissingChain(chain.to_owned()))
    }
}

/// Expands `$VAR` and `${VAR}` patterns using `lookup`.
///
/// Unresolved variables are left as-is.
fn expand_env_vars(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }
        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced {
                if c == '}' {
                    chars.next();
                    closed = true;
                    break;
                }
            } else if !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            var_name.push(c);
            chars.next();
        }

        let resolved = if var_name.is_empty() || (braced && !closed) {
            None
        } else {
            lookup(&var_name)
        };
        match resolved {
            Some(value) => result.push_str(&value),
            None => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&var_name);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}
