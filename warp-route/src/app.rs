//! Cross-chain transfers over a deployed warp route.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::chain::{ChainMetadataProvider, ChainName, Domain};
use crate::error::{ChainError, WarpError};
use crate::router::DeployedRouterSet;
use crate::token::AssetClass;

/// Arguments of a `transferRemote` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteTransfer {
    /// Destination domain.
    pub destination: Domain,
    /// Recipient, left-padded to 32 bytes.
    pub recipient: B256,
    /// Amount for fungible routes, token id for non-fungible ones.
    pub amount_or_id: U256,
    /// Quoted interchain gas payment.
    pub gas_payment: U256,
    /// Value attached to the call: the gas payment, plus the amount on
    /// native routes.
    pub value: U256,
}

/// A confirmed origin-chain transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHandle {
    /// Origin chain.
    pub chain: ChainName,
    /// Transaction hash.
    pub transaction_hash: B256,
    /// Block the transaction was included in, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Interchain gas paid.
    #[serde(with = "crate::amount::u256")]
    pub gas_payment: U256,
}

/// Chain binding that reads and calls deployed token routers.
#[async_trait::async_trait]
pub trait TokenRouterClient: ChainMetadataProvider + Send + Sync {
    /// Address that signs transactions on `chain`.
    async fn signer_address(&self, chain: &str) -> Result<Address, ChainError>;

    /// `quoteGasPayment(destination)` on the router.
    async fn quote_gas_payment(
        &self,
        chain: &str,
        router: Address,
        destination: Domain,
    ) -> Result<U256, ChainError>;

    /// `balanceOf(account)` on the router.
    async fn balance_of(
        &self,
        chain: &str,
        router: Address,
        account: Address,
    ) -> Result<U256, ChainError>;

    /// `ownerOf(tokenId)` on the router.
    async fn owner_of(
        &self,
        chain: &str,
        router: Address,
        token_id: U256,
    ) -> Result<Address, ChainError>;

    /// Submits `transferRemote` and waits for the origin receipt.
    async fn transfer_remote(
        &self,
        chain: &str,
        router: Address,
        transfer: &RemoteTransfer,
    ) -> Result<TransactionHandle, ChainError>;
}

#[async_trait::async_trait]
impl<T: TokenRouterClient + ?Sized> TokenRouterClient for Arc<T> {
    async fn signer_address(&self, chain: &str) -> Result<Address, ChainError> {
        (**self).signer_address(chain).await
    }

    async fn quote_gas_payment(
        &self,
        chain: &str,
        router: Address,
        destination: Domain,
    ) -> Result<U256, ChainError> {
        (**self).quote_gas_payment(chain, router, destination).await
    }

    async fn balance_of(
        &self,
        chain: &str,
        router: Address,
        account: Address,
    ) -> Result<U256, ChainError> {
        (**self).balance_of(chain, router, account).await
    }

    async fn owner_of(
        &self,
        chain: &str,
        router: Address,
        token_id: U256,
    ) -> Result<Address, ChainError> {
        (**self).owner_of(chain, router, token_id).await
    }

    async fn transfer_remote(
        &self,
        chain: &str,
        router: Address,
        transfer: &RemoteTransfer,
    ) -> Result<TransactionHandle, ChainError> {
        (**self).transfer_remote(chain, router, transfer).await
    }
}

/// Client-side view of a deployed warp route.
#[derive(Debug, Clone)]
pub struct WarpTokenApp<C> {
    client: C,
    routers: DeployedRouterSet,
    asset_class: AssetClass,
}

impl<C: TokenRouterClient> WarpTokenApp<C> {
    /// Wraps the routers of a route.
    pub const fn new(client: C, routers: DeployedRouterSet, asset_class: AssetClass) -> Self {
        Self {
            client,
            routers,
            asset_class,
        }
    }

    /// Routers of the route.
    #[must_use]
    pub const fn routers(&self) -> &DeployedRouterSet {
        &self.routers
    }

    /// Sends `amount_or_id` from `origin` to `recipient` on `destination`.
    ///
    /// The signer's balance (fungible) or ownership (non-fungible) is checked
    /// first; nothing is submitted if the check fails. Returns once the
    /// origin transaction is confirmed; delivery is not awaited.
    ///
    /// # Errors
    ///
    /// [`WarpError::SameChain`], [`WarpError::UnknownChain`],
    /// [`WarpError::UnknownDomain`], [`WarpError::InsufficientBalance`],
    /// [`WarpError::NotOwner`] or [`WarpError::Chain`].
    #[cfg_attr(feature = "telemetry", instrument(skip(self), err))]
    pub async fn transfer(
        &self,
        origin: &str,
        destination: &str,
        recipient: Address,
        amount_or_id: U256,
    ) -> Result<TransactionHandle, WarpError> {
        if origin == destination {
            return Err(WarpError::SameChain(origin.to_owned()));
        }
        let deployed = self
            .routers
            .get(origin)
            .ok_or_else(|| WarpError::UnknownChain(origin.to_owned()))?;
        if !self.routers.contains(destination) {
            return Err(WarpError::UnknownChain(destination.to_owned()));
        }
        let domain = self
            .client
            .domain_id(destination)
            .ok_or_else(|| WarpError::UnknownDomain(destination.to_owned()))?;

        let router = deployed.router;
        let gas_payment = self
            .client
            .quote_gas_payment(origin, router, domain)
            .await?;
        let signer = self.client.signer_address(origin).await?;
        // Native routers carry the amount in the transaction value.
        let value = if deployed.kind.is_native() {
            gas_payment.saturating_add(amount_or_id)
        } else {
            gas_payment
        };
        match self.asset_class {
            AssetClass::Fungible => {
                let required = if deployed.kind.is_native() {
                    value
                } else {
                    amount_or_id
                };
                let balance = self.client.balance_of(origin, router, signer).await?;
                if balance < required {
                    return Err(WarpError::InsufficientBalance {
                        chain: origin.to_owned(),
                        signer,
                        balance,
                        amount: required,
                    });
                }
            }
            AssetClass::NonFungible => {
                let owner = self.client.owner_of(origin, router, amount_or_id).await?;
                if owner != signer {
                    return Err(WarpError::NotOwner {
                        chain: origin.to_owned(),
                        signer,
                        token_id: amount_or_id,
                        owner,
                    });
                }
            }
        }

        let transfer = RemoteTransfer {
            destination: domain,
            recipient: recipient.into_word(),
            amount_or_id,
            gas_payment,
            value,
        };
        let handle = self
            .client
            .transfer_remote(origin, router, &transfer)
            .await?;
        #[cfg(feature = "telemetry")]
        tracing::info!(tx = %handle.transaction_hash, %gas_payment, "Transfer submitted");
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{DeployedRouter, RouterKind};
    use crate::testing::{Call, MockChain};
    use alloy_primitives::address;

    const SIGNER: Address = address!("0x00000000000000000000000000000000000000f1");
    const ROUTER_A: Address = address!("0x00000000000000000000000000000000000000a1");
    const ROUTER_B: Address = address!("0x00000000000000000000000000000000000000b1");
    const RECIPIENT: Address = address!("0x00000000000000000000000000000000000000c1");

    fn routers(origin_kind: RouterKind, remote_kind: RouterKind) -> DeployedRouterSet {
        [
            (
                "chainA",
                DeployedRouter {
                    router: ROUTER_A,
                    kind: origin_kind,
                },
            ),
            (
                "chainB",
                DeployedRouter {
                    router: ROUTER_B,
                    kind: remote_kind,
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    fn mock() -> MockChain {
        MockChain::new()
            .with_domain("chainA", 1)
            .with_domain("chainB", 2)
            .with_signer(SIGNER)
            .with_gas_quote(U256::from(100))
    }

    #[tokio::test]
    async fn test_fungible_transfer_pays_quoted_gas() {
        let chain = mock().with_balance(ROUTER_A, SIGNER, U256::from(50));
        let app = WarpTokenApp::new(
            chain.clone(),
            routers(RouterKind::HypErc20Collateral, RouterKind::HypErc20),
            AssetClass::Fungible,
        );
        let handle = app
            .transfer("chainA", "chainB", RECIPIENT, U256::from(50))
            .await
            .unwrap();
        assert_eq!(handle.chain, "chainA");
        assert_eq!(handle.gas_payment, U256::from(100));

        let submitted = chain.submitted_transfers();
        assert_eq!(submitted.len(), 1);
        assert_eq!(
            submitted[0],
            RemoteTransfer {
                destination: 2,
                recipient: RECIPIENT.into_word(),
                amount_or_id: U256::from(50),
                gas_payment: U256::from(100),
                value: U256::from(100),
            }
        );
    }

    #[tokio::test]
    async fn test_insufficient_balance_submits_nothing() {
        let chain = mock().with_balance(ROUTER_A, SIGNER, U256::from(10));
        let app = WarpTokenApp::new(
            chain.clone(),
            routers(RouterKind::HypErc20Collateral, RouterKind::HypErc20),
            AssetClass::Fungible,
        );
        let err = app
            .transfer("chainA", "chainB", RECIPIENT, U256::from(11))
            .await
            .unwrap_err();
        assert!(
            matches!(err, WarpError::InsufficientBalance { balance, amount, .. }
                if balance == U256::from(10) && amount == U256::from(11)),
            "{err}"
        );
        assert!(chain.submitted_transfers().is_empty());
    }

    #[tokio::test]
    async fn test_not_owner_submits_nothing() {
        let other = address!("0x00000000000000000000000000000000000000f2");
        let chain = mock().with_owner(ROUTER_A, U256::from(7), other);
        let app = WarpTokenApp::new(
            chain.clone(),
            routers(RouterKind::HypErc721Collateral, RouterKind::HypErc721),
            AssetClass::NonFungible,
        );
        let err = app
            .transfer("chainA", "chainB", RECIPIENT, U256::from(7))
            .await
            .unwrap_err();
        assert!(
            matches!(err, WarpError::NotOwner { owner, .. } if owner == other),
            "{err}"
        );
        assert!(chain.submitted_transfers().is_empty());
    }

    #[tokio::test]
    async fn test_owned_nft_transfer() {
        let chain = mock().with_owner(ROUTER_A, U256::from(7), SIGNER);
        let app = WarpTokenApp::new(
            chain.clone(),
            routers(RouterKind::HypErc721Collateral, RouterKind::HypErc721),
            AssetClass::NonFungible,
        );
        app.transfer("chainA", "chainB", RECIPIENT, U256::from(7))
            .await
            .unwrap();
        assert_eq!(chain.submitted_transfers()[0].amount_or_id, U256::from(7));
    }

    #[tokio::test]
    async fn test_native_transfer_attaches_amount() {
        let chain = mock().with_balance(ROUTER_A, SIGNER, U256::from(1_000));
        let app = WarpTokenApp::new(
            chain.clone(),
            routers(RouterKind::HypNative, RouterKind::HypErc20),
            AssetClass::Fungible,
        );
        app.transfer("chainA", "chainB", RECIPIENT, U256::from(250))
            .await
            .unwrap();
        assert_eq!(chain.submitted_transfers()[0].value, U256::from(350));
    }

    #[tokio::test]
    async fn test_native_balance_must_cover_gas_payment() {
        let chain = mock().with_balance(ROUTER_A, SIGNER, U256::from(250));
        let app = WarpTokenApp::new(
            chain.clone(),
            routers(RouterKind::HypNative, RouterKind::HypErc20),
            AssetClass::Fungible,
        );
        let err = app
            .transfer("chainA", "chainB", RECIPIENT, U256::from(250))
            .await
            .unwrap_err();
        assert!(
            matches!(err, WarpError::InsufficientBalance { amount, .. } if amount == U256::from(350)),
            "{err}"
        );
        assert!(chain.submitted_transfers().is_empty());
    }

    #[tokio::test]
    async fn test_route_lookups() {
        let chain = mock();
        let app = WarpTokenApp::new(
            chain.clone(),
            routers(RouterKind::HypErc20Collateral, RouterKind::HypErc20),
            AssetClass::Fungible,
        );
        let same = app
            .transfer("chainA", "chainA", RECIPIENT, U256::from(1))
            .await
            .unwrap_err();
        assert!(matches!(same, WarpError::SameChain(_)));
        let unknown = app
            .transfer("chainA", "chainZ", RECIPIENT, U256::from(1))
            .await
            .unwrap_err();
        assert!(matches!(unknown, WarpError::UnknownChain(ref c) if c == "chainZ"));
        assert!(!chain.calls().iter().any(|c| matches!(c, Call::TransferRemote { .. })));
    }
}
