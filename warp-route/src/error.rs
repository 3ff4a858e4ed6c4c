//! Error types for warp route deployment and transfers.

use alloy_primitives::{Address, U256};

use crate::chain::{ChainName, Domain};
use crate::token::{AssetClass, TokenVariant};

/// Error raised by a chain collaborator (RPC failure, revert, missing artifact).
///
/// The core never inspects or rewrites these; they reach the caller verbatim.
pub type ChainError = Box<dyn std::error::Error + Send + Sync>;

/// A token configuration entry that cannot be classified or is missing a
/// field its tag requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTokenConfig {
    /// The entry has no `type` tag.
    #[error("missing token type")]
    MissingType,
    /// The `type` tag is not a known token variant.
    #[error("unknown token type `{0}`")]
    UnknownType(String),
    /// A field required by the entry's tag is absent.
    #[error("`{variant}` token config requires `{field}`")]
    MissingField {
        /// Tag of the entry.
        variant: TokenVariant,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// Base error type for warp route operations.
#[derive(Debug, thiserror::Error)]
pub enum WarpError {
    /// A configuration entry is malformed. Nothing has been deployed for it.
    #[error("invalid token config for {chain}: {source}")]
    InvalidTokenConfig {
        /// Chain the entry belongs to.
        chain: ChainName,
        /// What is wrong with the entry.
        #[source]
        source: InvalidTokenConfig,
    },

    /// Metadata resolution found no collateral, native or self-describing
    /// synthetic entry to take token metadata from.
    #[error("no token metadata found in any collateral, native or synthetic config")]
    NoMetadataFound,

    /// No router contract or gas default exists for this combination.
    #[error("invalid token type: {variant} is not supported for {asset_class} routes")]
    InvalidTokenType {
        /// Asset class of the route.
        asset_class: AssetClass,
        /// Variant requested by the entry.
        variant: TokenVariant,
    },

    /// Merged metadata for a synthetic chain is still incomplete.
    #[error("{asset_class} metadata not populated for {chain}")]
    MetadataNotPopulated {
        /// Chain being deployed.
        chain: ChainName,
        /// Asset class the metadata was validated against.
        asset_class: AssetClass,
    },

    /// The signer holds less than the amount it tries to send.
    #[error("signer {signer} has insufficient balance {balance}, needs {amount} on {chain}")]
    InsufficientBalance {
        /// Origin chain.
        chain: ChainName,
        /// Sending account.
        signer: Address,
        /// Current balance on the origin router.
        balance: U256,
        /// Required amount, including the gas payment on native routes.
        amount: U256,
    },

    /// The signer does not own the token it tries to send.
    #[error("signer {signer} not owner of token {token_id} on {chain} (owner is {owner})")]
    NotOwner {
        /// Origin chain.
        chain: ChainName,
        /// Sending account.
        signer: Address,
        /// Token identifier.
        token_id: U256,
        /// Actual owner.
        owner: Address,
    },

    /// The chain is not part of the route or has no deployed router.
    #[error("no router for chain {0}")]
    UnknownChain(ChainName),

    /// No Hyperlane domain is registered for the chain.
    #[error("no domain id registered for chain {0}")]
    UnknownDomain(ChainName),

    /// Two chains of the route resolve to the same Hyperlane domain.
    #[error("chains {first} and {second} share domain {domain}")]
    DuplicateDomain {
        /// Shared domain.
        domain: Domain,
        /// Chain listed first.
        first: ChainName,
        /// Chain listed second.
        second: ChainName,
    },

    /// Origin and destination are the same chain.
    #[error("origin and destination are both {0}")]
    SameChain(ChainName),

    /// The chain collaborator failed. The message is the chain's own.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl WarpError {
    /// Wraps an [`InvalidTokenConfig`] with the chain it was found on.
    pub fn invalid_config(chain: impl Into<ChainName>, source: InvalidTokenConfig) -> Self {
        Self::InvalidTokenConfig {
            chain: chain.into(),
            source,
        }
    }
}
