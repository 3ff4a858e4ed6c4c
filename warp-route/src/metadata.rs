//! Resolution of the token metadata shared by every synthetic router.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::chain::{ChainMap, ChainMetadataProvider};
use crate::error::{ChainError, WarpError};
use crate::token::{AssetClass, TokenConfig, TokenMetadata, WarpRouteConfig};

/// Initial supply of synthetic routers backed by collateral or native assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SyntheticSupply {
    /// Synthetic supply starts at zero and grows as collateral is locked.
    #[default]
    MintOnDemand,
    /// Copy the live supply of the wrapped token when its standard exposes one.
    MirrorCollateral,
}

/// Metadata read from a token contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainToken {
    /// `name()`.
    pub name: String,
    /// `symbol()`.
    pub symbol: String,
    /// `decimals()`, read for fungible tokens only.
    pub decimals: Option<u8>,
    /// `totalSupply()`, when the standard exposes it.
    pub total_supply: Option<U256>,
}

/// Chain binding that reads token contracts.
#[async_trait::async_trait]
pub trait TokenReader: ChainMetadataProvider + Send + Sync {
    /// Reads the metadata of `token` on `chain`.
    async fn read_token(
        &self,
        chain: &str,
        token: Address,
        asset_class: AssetClass,
    ) -> Result<OnChainToken, ChainError>;
}

#[async_trait::async_trait]
impl<T: TokenReader + ?Sized> TokenReader for Arc<T> {
    async fn read_token(
        &self,
        chain: &str,
        token: Address,
        asset_class: AssetClass,
    ) -> Result<OnChainToken, ChainError> {
        (**self).read_token(chain, token, asset_class).await
    }
}

/// Finds the metadata every synthetic router of the route is initialized with.
///
/// Sources, each scanned in map order, first match wins:
///
/// 1. a synthetic entry that already carries complete metadata;
/// 2. a collateral entry, read from the wrapped token;
/// 3. a native entry, from the chain's native-asset descriptor. Chains
///    without a descriptor are skipped.
///
/// # Errors
///
/// [`WarpError::NoMetadataFound`] if no entry yields metadata; chain read
/// failures are returned as [`WarpError::Chain`].
#[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(%asset_class, ?supply)))]
pub async fn resolve_metadata<R>(
    configs: &ChainMap<WarpRouteConfig>,
    asset_class: AssetClass,
    supply: SyntheticSupply,
    reader: &R,
) -> Result<TokenMetadata, WarpError>
where
    R: TokenReader + ?Sized,
{
    let self_describing = configs.iter().find_map(|(_, config)| {
        config
            .token
            .synthetic_metadata()
            .and_then(|m| m.complete(asset_class))
    });
    if let Some(metadata) = self_describing {
        return Ok(metadata);
    }

    let collateral = configs
        .iter()
        .find_map(|(chain, config)| config.token.wrapped_token().map(|token| (chain, token)));
    if let Some((chain, token)) = collateral {
        let read = reader.read_token(chain, token, asset_class).await?;
        #[cfg(feature = "telemetry")]
        tracing::info!(%chain, %token, name = %read.name, symbol = %read.symbol, "Read collateral token metadata");
        let total_supply = match supply {
            SyntheticSupply::MintOnDemand => U256::ZERO,
            SyntheticSupply::MirrorCollateral => read.total_supply.unwrap_or_default(),
        };
        return Ok(TokenMetadata {
            name: read.name,
            symbol: read.symbol,
            total_supply,
            decimals: if asset_class.is_fungible() {
                read.decimals
            } else {
                None
            },
        });
    }

    for (chain, config) in configs.iter() {
        if !matches!(config.token, TokenConfig::Native) {
            continue;
        }
        let Some(native) = reader.native_token(chain) else {
            #[cfg(feature = "telemetry")]
            tracing::debug!(%chain, "No native token descriptor, skipping");
            continue;
        };
        return Ok(TokenMetadata {
            name: native.name,
            symbol: native.symbol,
            total_supply: U256::ZERO,
            decimals: Some(native.decimals),
        });
    }

    Err(WarpError::NoMetadataFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::NativeToken;
    use crate::testing::{MockChain, route_config};
    use crate::token::PartialTokenMetadata;
    use alloy_primitives::address;

    const FOO: Address = address!("0x0000000000000000000000000000000000000aaa");

    fn foo_chain() -> MockChain {
        MockChain::new()
            .with_domain("chainA", 1)
            .with_domain("chainB", 2)
            .with_token(
                "chainA",
                FOO,
                OnChainToken {
                    name: "Foo".into(),
                    symbol: "FOO".into(),
                    decimals: Some(18),
                    total_supply: Some(U256::from(1000)),
                },
            )
    }

    fn full_synthetic(name: &str) -> TokenConfig {
        TokenConfig::Synthetic(PartialTokenMetadata {
            name: Some(name.into()),
            symbol: Some(name.to_uppercase()),
            total_supply: Some(U256::from(7)),
            decimals: Some(6),
        })
    }

    #[tokio::test]
    async fn test_single_collateral_gives_zero_supply() {
        let chain = foo_chain();
        let configs: ChainMap<_> = [
            ("chainA", route_config(TokenConfig::Collateral { token: FOO })),
            ("chainB", route_config(TokenConfig::Synthetic(Default::default()))),
        ]
        .into_iter()
        .collect();
        let metadata = resolve_metadata(
            &configs,
            AssetClass::Fungible,
            SyntheticSupply::MintOnDemand,
            &chain,
        )
        .await
        .unwrap();
        assert_eq!(
            metadata,
            TokenMetadata {
                name: "Foo".into(),
                symbol: "FOO".into(),
                total_supply: U256::ZERO,
                decimals: Some(18),
            }
        );
    }

    #[tokio::test]
    async fn test_mirror_collateral_copies_supply() {
        let chain = foo_chain();
        let configs: ChainMap<_> =
            [("chainA", route_config(TokenConfig::Collateral { token: FOO }))]
                .into_iter()
                .collect();
        let metadata = resolve_metadata(
            &configs,
            AssetClass::Fungible,
            SyntheticSupply::MirrorCollateral,
            &chain,
        )
        .await
        .unwrap();
        assert_eq!(metadata.total_supply, U256::from(1000));
    }

    #[tokio::test]
    async fn test_self_describing_synthetic_returned_verbatim() {
        let chain = MockChain::new();
        let configs: ChainMap<_> = [
            ("first", route_config(full_synthetic("alpha"))),
            ("second", route_config(full_synthetic("beta"))),
        ]
        .into_iter()
        .collect();
        let metadata = resolve_metadata(
            &configs,
            AssetClass::Fungible,
            SyntheticSupply::MintOnDemand,
            &chain,
        )
        .await
        .unwrap();
        assert_eq!(metadata.name, "alpha");
        assert_eq!(metadata.symbol, "ALPHA");
        assert_eq!(metadata.total_supply, U256::from(7));
        assert_eq!(metadata.decimals, Some(6));
        assert_eq!(chain.read_count(), 0);
    }

    #[tokio::test]
    async fn test_native_without_descriptor_is_skipped() {
        let chain = MockChain::new().with_native(
            "second",
            NativeToken {
                name: "Ether".into(),
                symbol: "ETH".into(),
                decimals: 18,
            },
        );
        let configs: ChainMap<_> = [
            ("first", route_config(TokenConfig::Native)),
            ("second", route_config(TokenConfig::Native)),
        ]
        .into_iter()
        .collect();
        let metadata = resolve_metadata(
            &configs,
            AssetClass::Fungible,
            SyntheticSupply::MintOnDemand,
            &chain,
        )
        .await
        .unwrap();
        assert_eq!(metadata.symbol, "ETH");
        assert_eq!(metadata.total_supply, U256::ZERO);
    }

    #[tokio::test]
    async fn test_nothing_to_resolve_from() {
        let chain = MockChain::new();
        let configs: ChainMap<_> = [
            ("first", route_config(TokenConfig::Native)),
            (
                "second",
                route_config(TokenConfig::Synthetic(PartialTokenMetadata {
                    name: Some("Half".into()),
                    ..Default::default()
                })),
            ),
        ]
        .into_iter()
        .collect();
        let err = resolve_metadata(
            &configs,
            AssetClass::Fungible,
            SyntheticSupply::MintOnDemand,
            &chain,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WarpError::NoMetadataFound), "{err}");
    }

    #[tokio::test]
    async fn test_read_failure_is_propagated() {
        let chain = MockChain::new();
        let configs: ChainMap<_> =
            [("chainA", route_config(TokenConfig::Collateral { token: FOO }))]
                .into_iter()
                .collect();
        let err = resolve_metadata(
            &configs,
            AssetClass::Fungible,
            SyntheticSupply::MintOnDemand,
            &chain,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, WarpError::Chain(_)), "{err}");
    }
}
