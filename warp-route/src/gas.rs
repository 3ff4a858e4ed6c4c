//! Default destination gas overheads per router variant.

use crate::error::WarpError;
use crate::token::{AssetClass, TokenVariant, WarpRouteConfig};

/// Fungible synthetic router.
pub const ERC20_SYNTHETIC_GAS: u64 = 64_000;
/// Fungible collateral router.
pub const ERC20_COLLATERAL_GAS: u64 = 69_000;
/// Native router.
pub const NATIVE_GAS: u64 = 44_000;
/// Non-fungible synthetic router.
pub const ERC721_SYNTHETIC_GAS: u64 = 160_000;
/// Non-fungible synthetic router with URI storage.
pub const ERC721_SYNTHETIC_URI_GAS: u64 = 163_000;
/// Non-fungible collateral router, with or without URI forwarding.
pub const ERC721_COLLATERAL_GAS: u64 = 80_000;

/// Gas the destination router needs to handle one incoming transfer.
///
/// # Errors
///
/// Returns [`WarpError::InvalidTokenType`] for pairs without a router
/// variant: fungible URI variants and non-fungible native.
pub const fn default_gas_overhead(
    asset_class: AssetClass,
    variant: TokenVariant,
) -> Result<u64, WarpError> {
    match (asset_class, variant) {
        (AssetClass::Fungible, TokenVariant::Synthetic) => Ok(ERC20_SYNTHETIC_GAS),
        (AssetClass::Fungible, TokenVariant::Collateral) => Ok(ERC20_COLLATERAL_GAS),
        (AssetClass::Fungible, TokenVariant::Native) => Ok(NATIVE_GAS),
        (AssetClass::NonFungible, TokenVariant::Synthetic) => Ok(ERC721_SYNTHETIC_GAS),
        (AssetClass::NonFungible, TokenVariant::SyntheticUri) => Ok(ERC721_SYNTHETIC_URI_GAS),
        (AssetClass::NonFungible, TokenVariant::Collateral | TokenVariant::CollateralUri) => {
            Ok(ERC721_COLLATERAL_GAS)
        }
        _ => Err(WarpError::InvalidTokenType {
            asset_class,
            variant,
        }),
    }
}

/// Gas overhead of a chain: its `gas` override, or the variant default.
///
/// The pair is validated even when an override is present, so a chain cannot
/// smuggle an unsupported variant past the router selection.
///
/// # Errors
///
/// Returns [`WarpError::InvalidTokenType`] as [`default_gas_overhead`].
pub fn gas_overhead(asset_class: AssetClass, config: &WarpRouteConfig) -> Result<u64, WarpError> {
    let default = default_gas_overhead(asset_class, config.token.variant())?;
    Ok(config.router.gas.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{RouterConfig, TokenConfig};
    use alloy_primitives::Address;

    #[test]
    fn test_default_table() {
        let cases = [
            (AssetClass::Fungible, TokenVariant::Synthetic, 64_000),
            (AssetClass::Fungible, TokenVariant::Collateral, 69_000),
            (AssetClass::Fungible, TokenVariant::Native, 44_000),
            (AssetClass::NonFungible, TokenVariant::Synthetic, 160_000),
            (AssetClass::NonFungible, TokenVariant::SyntheticUri, 163_000),
            (AssetClass::NonFungible, TokenVariant::Collateral, 80_000),
            (AssetClass::NonFungible, TokenVariant::CollateralUri, 80_000),
        ];
        for (class, variant, gas) in cases {
            assert_eq!(default_gas_overhead(class, variant).unwrap(), gas);
        }
    }

    #[test]
    fn test_unsupported_pairs() {
        for (class, variant) in [
            (AssetClass::Fungible, TokenVariant::SyntheticUri),
            (AssetClass::Fungible, TokenVariant::CollateralUri),
            (AssetClass::NonFungible, TokenVariant::Native),
        ] {
            let err = default_gas_overhead(class, variant).unwrap_err();
            assert!(
                matches!(err, WarpError::InvalidTokenType { asset_class, variant: v }
                    if asset_class == class && v == variant),
                "{err}"
            );
        }
    }

    #[test]
    fn test_override_wins() {
        let mut config = WarpRouteConfig {
            router: RouterConfig {
                mailbox: Address::ZERO,
                interchain_gas_paymaster: Address::ZERO,
                owner: Address::ZERO,
                gas: None,
            },
            token: TokenConfig::Native,
        };
        assert_eq!(gas_overhead(AssetClass::Fungible, &config).unwrap(), 44_000);
        config.router.gas = Some(90_000);
        assert_eq!(gas_overhead(AssetClass::Fungible, &config).unwrap(), 90_000);
        assert!(gas_overhead(AssetClass::NonFungible, &config).is_err());
    }
}
