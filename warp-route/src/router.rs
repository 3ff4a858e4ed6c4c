//! Router contract variants, deployment plans and the deployer seam.
//!
//! A [`RouterPlan`] is everything a chain binding needs to put one router on
//! chain: which contract to deploy, its constructor arguments and the
//! `initialize` call that follows. Plans are built by the orchestrator from a
//! [`WarpRouteConfig`] and executed by a [`RouterDeployer`].

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::chain::{ChainMap, Domain};
use crate::error::{ChainError, WarpError};
use crate::token::{AssetClass, TokenConfig, TokenMetadata, TokenVariant, WarpRouteConfig};

/// Router contract deployed on a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouterKind {
    /// Fungible synthetic.
    #[serde(rename = "HypERC20")]
    HypErc20,
    /// Fungible collateral.
    #[serde(rename = "HypERC20Collateral")]
    HypErc20Collateral,
    /// Native asset.
    #[serde(rename = "HypNative")]
    HypNative,
    /// Non-fungible synthetic.
    #[serde(rename = "HypERC721")]
    HypErc721,
    /// Non-fungible synthetic with URI storage.
    #[serde(rename = "HypERC721URIStorage")]
    HypErc721UriStorage,
    /// Non-fungible collateral.
    #[serde(rename = "HypERC721Collateral")]
    HypErc721Collateral,
    /// Non-fungible collateral forwarding token URIs.
    #[serde(rename = "HypERC721URICollateral")]
    HypErc721UriCollateral,
}

impl RouterKind {
    /// Picks the contract for an (asset class, variant) pair.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::InvalidTokenType`] when no contract exists for the pair.
    pub const fn select(asset_class: AssetClass, variant: TokenVariant) -> Result<Self, WarpError> {
        match (asset_class, variant) {
            (AssetClass::Fungible, TokenVariant::Synthetic) => Ok(Self::HypErc20),
            (AssetClass::Fungible, TokenVariant::Collateral) => Ok(Self::HypErc20Collateral),
            (AssetClass::Fungible, TokenVariant::Native) => Ok(Self::HypNative),
            (AssetClass::NonFungible, TokenVariant::Synthetic) => Ok(Self::HypErc721),
            (AssetClass::NonFungible, TokenVariant::SyntheticUri) => Ok(Self::HypErc721UriStorage),
            (AssetClass::NonFungible, TokenVariant::Collateral) => Ok(Self::HypErc721Collateral),
            (AssetClass::NonFungible, TokenVariant::CollateralUri) => {
                Ok(Self::HypErc721UriCollateral)
            }
            _ => Err(WarpError::InvalidTokenType {
                asset_class,
                variant,
            }),
        }
    }

    /// Solidity contract name, also the artifact file stem.
    #[must_use]
    pub const fn contract_name(self) -> &'static str {
        match self {
            Self::HypErc20 => "HypERC20",
            Self::HypErc20Collateral => "HypERC20Collateral",
            Self::HypNative => "HypNative",
            Self::HypErc721 => "HypERC721",
            Self::HypErc721UriStorage => "HypERC721URIStorage",
            Self::HypErc721Collateral => "HypERC721Collateral",
            Self::HypErc721UriCollateral => "HypERC721URICollateral",
        }
    }

    /// Every router contract.
    pub const ALL: [Self; 7] = [
        Self::HypErc20,
        Self::HypErc20Collateral,
        Self::HypNative,
        Self::HypErc721,
        Self::HypErc721UriStorage,
        Self::HypErc721Collateral,
        Self::HypErc721UriCollateral,
    ];

    /// `true` for routers that mint their own token.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(
            self,
            Self::HypErc20 | Self::HypErc721 | Self::HypErc721UriStorage
        )
    }

    /// `true` for the native-asset router, whose transfers carry value.
    #[must_use]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::HypNative)
    }
}

impl fmt::Display for RouterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.contract_name())
    }
}

/// Constructor arguments of a router contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorArgs {
    /// No arguments.
    Empty,
    /// Address of the wrapped token (collateral routers).
    WrappedToken(Address),
    /// Token decimals (fungible synthetic router).
    Decimals(u8),
}

/// `initialize` call made right after deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initializer {
    /// `initialize(mailbox, interchainGasPaymaster)`.
    Router {
        /// Mailbox address.
        mailbox: Address,
        /// Interchain gas paymaster address.
        interchain_gas_paymaster: Address,
    },
    /// `initialize(mailbox, interchainGasPaymaster, totalSupply, name, symbol)`.
    Synthetic {
        /// Mailbox address.
        mailbox: Address,
        /// Interchain gas paymaster address.
        interchain_gas_paymaster: Address,
        /// Supply minted to the deployer.
        total_supply: U256,
        /// Token name.
        name: String,
        /// Token symbol.
        symbol: String,
    },
}

/// Everything needed to deploy and initialize one router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterPlan {
    /// Contract to deploy.
    pub kind: RouterKind,
    /// Constructor arguments.
    pub constructor: ConstructorArgs,
    /// Initializer call.
    pub initializer: Initializer,
}

impl RouterPlan {
    /// Plan for a collateral or native chain.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::InvalidTokenType`] for synthetic entries or
    /// unsupported pairs.
    pub fn backed(asset_class: AssetClass, config: &WarpRouteConfig) -> Result<Self, WarpError> {
        let variant = config.token.variant();
        let constructor = match &config.token {
            TokenConfig::Collateral { token } | TokenConfig::CollateralUri { token } => {
                ConstructorArgs::WrappedToken(*token)
            }
            TokenConfig::Native => ConstructorArgs::Empty,
            TokenConfig::Synthetic(_) | TokenConfig::SyntheticUri(_) => {
                return Err(WarpError::InvalidTokenType {
                    asset_class,
                    variant,
                });
            }
        };
        Ok(Self {
            kind: RouterKind::select(asset_class, variant)?,
            constructor,
            initializer: Initializer::Router {
                mailbox: config.router.mailbox,
                interchain_gas_paymaster: config.router.interchain_gas_paymaster,
            },
        })
    }

    /// Plan for a synthetic chain with fully merged metadata.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::InvalidTokenType`] for non-synthetic entries and
    /// [`WarpError::MetadataNotPopulated`] when a fungible route lacks decimals.
    pub fn synthetic(
        chain: &str,
        asset_class: AssetClass,
        config: &WarpRouteConfig,
        metadata: TokenMetadata,
    ) -> Result<Self, WarpError> {
        let variant = config.token.variant();
        if !variant.is_synthetic() {
            return Err(WarpError::InvalidTokenType {
                asset_class,
                variant,
            });
        }
        let kind = RouterKind::select(asset_class, variant)?;
        let constructor = match asset_class {
            AssetClass::Fungible => {
                ConstructorArgs::Decimals(metadata.decimals.ok_or_else(|| {
                    WarpError::MetadataNotPopulated {
                        chain: chain.to_owned(),
                        asset_class,
                    }
                })?)
            }
            AssetClass::NonFungible => ConstructorArgs::Empty,
        };
        Ok(Self {
            kind,
            constructor,
            initializer: Initializer::Synthetic {
                mailbox: config.router.mailbox,
                interchain_gas_paymaster: config.router.interchain_gas_paymaster,
                total_supply: metadata.total_supply,
                name: metadata.name,
                symbol: metadata.symbol,
            },
        })
    }
}

/// A router recorded in a [`DeployedRouterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedRouter {
    /// Router contract address.
    pub router: Address,
    /// Contract deployed there.
    pub kind: RouterKind,
}

/// Chain name to deployed router. Grows monotonically during a deployment.
pub type DeployedRouterSet = ChainMap<DeployedRouter>;

/// Chain binding that deploys and wires router contracts.
///
/// Wiring methods must skip settings that are already in place, so a resumed
/// deployment does not resubmit them.
#[async_trait::async_trait]
pub trait RouterDeployer: Send + Sync {
    /// Deploys the plan's contract on `chain`, runs its initializer and
    /// returns the router address.
    async fn deploy_router(&self, chain: &str, plan: &RouterPlan) -> Result<Address, ChainError>;

    /// Enrolls `remotes` as the routers for their domains.
    async fn enroll_remote_routers(
        &self,
        chain: &str,
        router: Address,
        remotes: &[(Domain, Address)],
    ) -> Result<(), ChainError>;

    /// Sets the destination gas for each remote domain.
    async fn set_destination_gas(
        &self,
        chain: &str,
        router: Address,
        gas: &[(Domain, u64)],
    ) -> Result<(), ChainError>;

    /// Hands the router over to `owner`.
    async fn transfer_ownership(
        &self,
        chain: &str,
        router: Address,
        owner: Address,
    ) -> Result<(), ChainError>;
}

#[async_trait::async_trait]
impl<T: RouterDeployer + ?Sized> RouterDeployer for Arc<T> {
    async fn deploy_router(&self, chain: &str, plan: &RouterPlan) -> Result<Address, ChainError> {
        (**self).deploy_router(chain, plan).await
    }

    async fn enroll_remote_routers(
        &self,
        chain: &str,
        router: Address,
        remotes: &[(Domain, Address)],
    ) -> Result<(), ChainError> {
        (**self).enroll_remote_routers(chain, router, remotes).await
    }

    async fn set_destination_gas(
        &self,
        chain: &str,
        router: Address,
        gas: &[(Domain, u64)],
    ) -> Result<(), ChainError> {
        (**self).set_destination_gas(chain, router, gas).await
    }

    async fn transfer_ownership(
        &self,
        chain: &str,
        router: Address,
        owner: Address,
    ) -> Result<(), ChainError> {
        (**self).transfer_ownership(chain, router, owner).await
    }
}
