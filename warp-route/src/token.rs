//! Token configuration model.
//!
//! Every chain of a warp route carries a [`WarpRouteConfig`]: the router-level
//! connection parameters ([`RouterConfig`]) and one [`TokenConfig`] variant.
//! The variant is always taken from the explicit `type` tag; it is never
//! guessed from which fields happen to be present.
//!
//! # Example
//!
//! ```rust
//! use warp_route::token::{TokenConfig, TokenVariant};
//!
//! let config: TokenConfig = serde_json::from_str(
//!     r#"{"type": "collateral", "token": "0x00000000000000000000000000000000000000aa"}"#,
//! )
//! .unwrap();
//! assert_eq!(config.variant(), TokenVariant::Collateral);
//!
//! let missing_token = serde_json::from_str::<TokenConfig>(r#"{"type": "collateral"}"#);
//! assert!(missing_token.is_err());
//! ```

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidTokenConfig;

/// Kind of asset bridged by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AssetClass {
    /// ERC-20 style fungible token.
    #[serde(rename = "erc20", alias = "fungible")]
    #[cfg_attr(feature = "cli", value(name = "erc20", alias = "fungible"))]
    Fungible,
    /// ERC-721 style non-fungible token.
    #[serde(rename = "erc721", alias = "nonFungible")]
    #[cfg_attr(feature = "cli", value(name = "erc721", alias = "non-fungible"))]
    NonFungible,
}

impl AssetClass {
    /// Returns `true` for [`AssetClass::Fungible`].
    #[must_use]
    pub const fn is_fungible(self) -> bool {
        matches!(self, Self::Fungible)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fungible => f.write_str("ERC20"),
            Self::NonFungible => f.write_str("ERC721"),
        }
    }
}

/// Discriminant of a [`TokenConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenVariant {
    /// Router mints and burns its own token.
    Synthetic,
    /// Synthetic non-fungible router that also stores token URIs.
    SyntheticUri,
    /// Router locks an existing token.
    Collateral,
    /// Collateral non-fungible router that forwards token URIs.
    CollateralUri,
    /// Router locks the chain's base asset.
    Native,
}

impl TokenVariant {
    /// Wire tag of the variant, as used in the `type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synthetic => "synthetic",
            Self::SyntheticUri => "syntheticUri",
            Self::Collateral => "collateral",
            Self::CollateralUri => "collateralUri",
            Self::Native => "native",
        }
    }

    /// `Collateral` or `CollateralUri`.
    #[must_use]
    pub const fn is_collateral(self) -> bool {
        matches!(self, Self::Collateral | Self::CollateralUri)
    }

    /// `Synthetic` or `SyntheticUri`.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(self, Self::Synthetic | Self::SyntheticUri)
    }

    /// `Native`.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Native)
    }

    /// `SyntheticUri` or `CollateralUri`.
    #[must_use]
    pub const fn has_uri(self) -> bool {
        matches!(self, Self::SyntheticUri | Self::CollateralUri)
    }
}

impl fmt::Display for TokenVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenVariant {
    type Err = InvalidTokenConfig;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "synthetic" => Ok(Self::Synthetic),
            "syntheticUri" => Ok(Self::SyntheticUri),
            "collateral" => Ok(Self::Collateral),
            "collateralUri" => Ok(Self::CollateralUri),
            "native" => Ok(Self::Native),
            other => Err(InvalidTokenConfig::UnknownType(other.to_owned())),
        }
    }
}

/// Token metadata as written in a synthetic config: every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTokenMetadata {
    /// Token name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Token symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Initial supply minted to the deployer. Zero is a valid value.
    #[serde(
        default,
        with = "crate::amount::option_u256",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_supply: Option<U256>,
    /// Decimals, required for fungible routes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl PartialTokenMetadata {
    /// Returns a copy where every field set on `self` wins over `base`.
    #[must_use]
    pub fn overlay(&self, base: &TokenMetadata) -> Self {
        Self {
            name: self.name.clone().or_else(|| Some(base.name.clone())),
            symbol: self.symbol.clone().or_else(|| Some(base.symbol.clone())),
            total_supply: self.total_supply.or(Some(base.total_supply)),
            decimals: self.decimals.or(base.decimals),
        }
    }

    /// Returns `true` if the metadata is complete for `asset_class`.
    #[must_use]
    pub fn is_complete(&self, asset_class: AssetClass) -> bool {
        match asset_class {
            AssetClass::Fungible => validate_erc20_metadata(self),
            AssetClass::NonFungible => validate_token_metadata(self),
        }
    }

    /// Converts into [`TokenMetadata`] if complete for `asset_class`.
    ///
    /// Decimals are kept for fungible routes and dropped otherwise.
    #[must_use]
    pub fn complete(&self, asset_class: AssetClass) -> Option<TokenMetadata> {
        if !self.is_complete(asset_class) {
            return None;
        }
        Some(TokenMetadata {
            name: self.name.clone()?,
            symbol: self.symbol.clone()?,
            total_supply: self.total_supply?,
            decimals: if asset_class.is_fungible() {
                self.decimals
            } else {
                None
            },
        })
    }
}

/// Returns `true` if `name`, `symbol` and `totalSupply` are all present.
#[must_use]
pub fn validate_token_metadata(metadata: &PartialTokenMetadata) -> bool {
    metadata.name.is_some() && metadata.symbol.is_some() && metadata.total_supply.is_some()
}

/// Returns `true` if the token metadata is complete and `decimals` is present.
///
/// Only presence is checked; zero decimals are valid.
#[must_use]
pub fn validate_erc20_metadata(metadata: &PartialTokenMetadata) -> bool {
    validate_token_metadata(metadata) && metadata.decimals.is_some()
}

/// Fully resolved token metadata shared by every synthetic router of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Supply minted on initialization.
    #[serde(with = "crate::amount::u256")]
    pub total_supply: U256,
    /// Decimals, set for fungible routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

impl From<TokenMetadata> for PartialTokenMetadata {
    fn from(value: TokenMetadata) -> Self {
        Self {
            name: Some(value.name),
            symbol: Some(value.symbol),
            total_supply: Some(value.total_supply),
            decimals: value.decimals,
        }
    }
}

/// Token side of a chain's configuration, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTokenConfig", into = "RawTokenConfig")]
pub enum TokenConfig {
    /// Synthetic router, with optional per-chain metadata overrides.
    Synthetic(PartialTokenMetadata),
    /// Synthetic URI-storing router, with optional per-chain metadata overrides.
    SyntheticUri(PartialTokenMetadata),
    /// Collateral router wrapping `token`.
    Collateral {
        /// Address of the wrapped token.
        token: Address,
    },
    /// Collateral URI-forwarding router wrapping `token`.
    CollateralUri {
        /// Address of the wrapped token.
        token: Address,
    },
    /// Router over the chain's base asset.
    Native,
}

impl TokenConfig {
    /// The variant tag of this entry.
    #[must_use]
    pub const fn variant(&self) -> TokenVariant {
        match self {
            Self::Synthetic(_) => TokenVariant::Synthetic,
            Self::SyntheticUri(_) => TokenVariant::SyntheticUri,
            Self::Collateral { .. } => TokenVariant::Collateral,
            Self::CollateralUri { .. } => TokenVariant::CollateralUri,
            Self::Native => TokenVariant::Native,
        }
    }

    /// See [`TokenVariant::is_collateral`].
    #[must_use]
    pub const fn is_collateral(&self) -> bool {
        self.variant().is_collateral()
    }

    /// See [`TokenVariant::is_synthetic`].
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        self.variant().is_synthetic()
    }

    /// See [`TokenVariant::is_native`].
    #[must_use]
    pub const fn is_native(&self) -> bool {
        self.variant().is_native()
    }

    /// See [`TokenVariant::has_uri`].
    #[must_use]
    pub const fn has_uri(&self) -> bool {
        self.variant().has_uri()
    }

    /// Wrapped token address of a collateral entry.
    #[must_use]
    pub const fn wrapped_token(&self) -> Option<Address> {
        match self {
            Self::Collateral { token } | Self::CollateralUri { token } => Some(*token),
            _ => None,
        }
    }

    /// Metadata overrides of a synthetic entry.
    #[must_use]
    pub const fn synthetic_metadata(&self) -> Option<&PartialTokenMetadata> {
        match self {
            Self::Synthetic(metadata) | Self::SyntheticUri(metadata) => Some(metadata),
            _ => None,
        }
    }
}

/// Untyped shape of a token config entry, before its tag is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTokenConfig {
    /// Variant tag.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Wrapped token address, collateral only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Address>,
    /// Metadata fields, synthetic only.
    #[serde(flatten)]
    pub metadata: PartialTokenMetadata,
}

impl TryFrom<RawTokenConfig> for TokenConfig {
    type Error = InvalidTokenConfig;

    fn try_from(raw: RawTokenConfig) -> Result<Self, Self::Error> {
        let variant: TokenVariant = raw
            .kind
            .as_deref()
            .ok_or(InvalidTokenConfig::MissingType)?
            .parse()?;
        let token = || {
            raw.token.ok_or(InvalidTokenConfig::MissingField {
                variant,
                field: "token",
            })
        };
        Ok(match variant {
            TokenVariant::Synthetic => Self::Synthetic(raw.metadata.clone()),
            TokenVariant::SyntheticUri => Self::SyntheticUri(raw.metadata.clone()),
            TokenVariant::Collateral => Self::Collateral { token: token()? },
            TokenVariant::CollateralUri => Self::CollateralUri { token: token()? },
            TokenVariant::Native => Self::Native,
        })
    }
}

impl From<TokenConfig> for RawTokenConfig {
    fn from(config: TokenConfig) -> Self {
        let kind = Some(config.variant().as_str().to_owned());
        match config {
            TokenConfig::Synthetic(metadata) | TokenConfig::SyntheticUri(metadata) => Self {
                kind,
                token: None,
                metadata,
            },
            TokenConfig::Collateral { token } | TokenConfig::CollateralUri { token } => Self {
                kind,
                token: Some(token),
                metadata: PartialTokenMetadata::default(),
            },
            TokenConfig::Native => Self {
                kind,
                ..Self::default()
            },
        }
    }
}

/// Connection and ownership parameters shared by every router variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterConfig {
    /// Hyperlane mailbox on this chain.
    pub mailbox: Address,
    /// Interchain gas paymaster on this chain.
    pub interchain_gas_paymaster: Address,
    /// Final owner of the router.
    pub owner: Address,
    /// Destination gas overhead override for messages delivered to this chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
}

/// Complete configuration of one chain: `RouterConfig & TokenConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpRouteConfig {
    /// Router connection parameters.
    #[serde(flatten)]
    pub router: RouterConfig,
    /// Token variant and its fields.
    #[serde(flatten)]
    pub token: TokenConfig,
}
