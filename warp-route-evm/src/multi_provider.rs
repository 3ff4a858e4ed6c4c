//! One signing provider per chain, exposed through the warp route
//! collaborator traits.
//!
//! Router wiring reads the current on-chain state first and only submits the
//! settings that differ, so rerunning a deployment does not resend them.

use alloy_primitives::{Address, U256};
use alloy_provider::DynProvider;
use warp_route::app::{RemoteTransfer, TokenRouterClient, TransactionHandle};
use warp_route::chain::{ChainMap, ChainMetadata, ChainMetadataProvider, Domain, NativeToken};
use warp_route::error::ChainError;
use warp_route::metadata::{OnChainToken, TokenReader};
use warp_route::router::{Initializer, RouterDeployer, RouterPlan};
use warp_route::token::AssetClass;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::artifacts::{Artifacts, creation_code};
use crate::chain::EvmChainProvider;
use crate::contract::{
    IERC20Metadata, IERC721Metadata, IGasRouter, IOwnable, IRouterInitializer,
    ISyntheticInitializer, ITokenRouter,
};
use crate::error::EvmChainError;

/// Providers for every chain of a route plus their static metadata.
#[derive(Debug, Default)]
pub struct MultiProvider {
    providers: ChainMap<EvmChainProvider>,
    metadata: ChainMap<ChainMetadata>,
    artifacts: Option<Artifacts>,
}

impl MultiProvider {
    /// Creates a multi-provider over `metadata`, with no connections yet.
    #[must_use]
    pub fn new(metadata: ChainMap<ChainMetadata>) -> Self {
        Self {
            providers: ChainMap::new(),
            metadata,
            artifacts: None,
        }
    }

    /// Sets the artifacts router bytecode is loaded from.
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: Artifacts) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    /// Registers the provider of a chain, replacing any previous one.
    pub fn add_provider(&mut self, provider: EvmChainProvider) {
        let chain = provider.chain().to_owned();
        self.providers.insert(chain, provider);
    }

    /// Provider of `chain`.
    ///
    /// # Errors
    ///
    /// [`EvmChainError::UnknownChain`] if no provider was registered.
    pub fn provider(&self, chain: &str) -> Result<&EvmChainProvider, EvmChainError> {
        self.providers
            .get(chain)
            .ok_or_else(|| EvmChainError::UnknownChain(chain.to_owned()))
    }

    /// Chain metadata known to this multi-provider.
    #[must_use]
    pub const fn metadata(&self) -> &ChainMap<ChainMetadata> {
        &self.metadata
    }

    fn rpc(&self, chain: &str) -> Result<DynProvider, EvmChainError> {
        Ok(self.provider(chain)?.inner().clone())
    }

    async fn read_token_metadata(
        &self,
        chain: &str,
        token: Address,
        asset_class: AssetClass,
    ) -> Result<OnChainToken, EvmChainError> {
        let rpc = self.rpc(chain)?;
        match asset_class {
            AssetClass::Fungible => {
                let erc20 = IERC20Metadata::new(token, rpc);
                Ok(OnChainToken {
                    name: erc20.name().call().await?,
                    symbol: erc20.symbol().call().await?,
                    decimals: Some(erc20.decimals().call().await?),
                    total_supply: Some(erc20.totalSupply().call().await?),
                })
            }
            AssetClass::NonFungible => {
                let erc721 = IERC721Metadata::new(token, rpc);
                Ok(OnChainToken {
                    name: erc721.name().call().await?,
                    symbol: erc721.symbol().call().await?,
                    decimals: None,
                    total_supply: None,
                })
            }
        }
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(%chain, kind = %plan.kind)))]
    async fn deploy_and_initialize(
        &self,
        chain: &str,
        plan: &RouterPlan,
    ) -> Result<Address, EvmChainError> {
        let provider = self.provider(chain)?;
        let artifacts = self.artifacts.as_ref().ok_or(EvmChainError::NoArtifacts)?;
        let bytecode = artifacts.bytecode(plan.kind)?;
        let router = provider
            .deploy(creation_code(&bytecode, &plan.constructor))
            .await?;

        let rpc = provider.inner().clone();
        let initialize = match &plan.initializer {
            Initializer::Router {
                mailbox,
                interchain_gas_paymaster,
            } => IRouterInitializer::new(router, rpc)
                .initialize(*mailbox, *interchain_gas_paymaster)
                .into_transaction_request(),
            Initializer::Synthetic {
                mailbox,
                interchain_gas_paymaster,
                total_supply,
                name,
                symbol,
            } => ISyntheticInitializer::new(router, rpc)
                .initialize(
                    *mailbox,
                    *interchain_gas_paymaster,
                    *total_supply,
                    name.clone(),
                    symbol.clone(),
                )
                .into_transaction_request(),
        };
        provider.send_transaction(initialize).await?;
        Ok(router)
    }

    async fn enroll(
        &self,
        chain: &str,
        router: Address,
        remotes: &[(Domain, Address)],
    ) -> Result<(), EvmChainError> {
        let provider = self.provider(chain)?;
        let gas_router = IGasRouter::new(router, provider.inner().clone());
        let mut domains = Vec::with_capacity(remotes.len());
        let mut routers = Vec::with_capacity(remotes.len());
        for &(domain, remote) in remotes {
            let expected = remote.into_word();
            if gas_router.routers(domain).call().await? != expected {
                domains.push(domain);
                routers.push(expected);
            }
        }
        if domains.is_empty() {
            #[cfg(feature = "telemetry")]
            tracing::debug!(%chain, %router, "Remote routers already enrolled");
            return Ok(());
        }
        #[cfg(feature = "telemetry")]
        tracing::info!(%chain, %router, ?domains, "Enrolling remote routers");
        let tx = gas_router
            .enrollRemoteRouters(domains, routers)
            .into_transaction_request();
        provider.send_transaction(tx).await?;
        Ok(())
    }

    async fn destination_gas(
        &self,
        chain: &str,
        router: Address,
        gas: &[(Domain, u64)],
    ) -> Result<(), EvmChainError> {
        let provider = self.provider(chain)?;
        let gas_router = IGasRouter::new(router, provider.inner().clone());
        let mut configs = Vec::with_capacity(gas.len());
        for &(domain, amount) in gas {
            let amount = U256::from(amount);
            if gas_router.destinationGas(domain).call().await? != amount {
                configs.push(IGasRouter::GasRouterConfig {
                    domain,
                    gas: amount,
                });
            }
        }
        if configs.is_empty() {
            return Ok(());
        }
        #[cfg(feature = "telemetry")]
        tracing::info!(%chain, %router, remotes = configs.len(), "Setting destination gas");
        let tx = gas_router
            .setDestinationGas(configs)
            .into_transaction_request();
        provider.send_transaction(tx).await?;
        Ok(())
    }

    async fn hand_over(
        &self,
        chain: &str,
        router: Address,
        owner: Address,
    ) -> Result<(), EvmChainError> {
        let provider = self.provider(chain)?;
        let ownable = IOwnable::new(router, provider.inner().clone());
        if ownable.owner().call().await? == owner {
            return Ok(());
        }
        #[cfg(feature = "telemetry")]
        tracing::info!(%chain, %router, %owner, "Transferring ownership");
        let tx = ownable.transferOwnership(owner).into_transaction_request();
        provider.send_transaction(tx).await?;
        Ok(())
    }

    async fn send_remote(
        &self,
        chain: &str,
        router: Address,
        transfer: &RemoteTransfer,
    ) -> Result<TransactionHandle, EvmChainError> {
        let provider = self.provider(chain)?;
        let tx = ITokenRouter::new(router, provider.inner().clone())
            .transferRemote(
                transfer.destination,
                transfer.recipient,
                transfer.amount_or_id,
            )
            .value(transfer.value)
            .into_transaction_request();
        let receipt = provider.send_transaction(tx).await?;
        Ok(TransactionHandle {
            chain: chain.to_owned(),
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_payment: transfer.gas_payment,
        })
    }
}

impl ChainMetadataProvider for MultiProvider {
    fn domain_id(&self, chain: &str) -> Option<Domain> {
        self.metadata.domain_id(chain)
    }

    fn native_token(&self, chain: &str) -> Option<NativeToken> {
        self.metadata.native_token(chain)
    }
}

#[async_trait::async_trait]
impl TokenReader for MultiProvider {
    async fn read_token(
        &self,
        chain: &str,
        token: Address,
        asset_class: AssetClass,
    ) -> Result<OnChainToken, ChainError> {
        Ok(self.read_token_metadata(chain, token, asset_class).await?)
    }
}

#[async_trait::async_trait]
impl RouterDeployer for MultiProvider {
    async fn deploy_router(&self, chain: &str, plan: &RouterPlan) -> Result<Address, ChainError> {
        Ok(self.deploy_and_initialize(chain, plan).await?)
    }

    async fn enroll_remote_routers(
        &self,
        chain: &str,
        router: Address,
        remotes: &[(Domain, Address)],
    ) -> Result<(), ChainError> {
        Ok(self.enroll(chain, router, remotes).await?)
    }

    async fn set_destination_gas(
        &self,
        chain: &str,
        router: Address,
        gas: &[(Domain, u64)],
    ) -> Result<(), ChainError> {
        Ok(self.destination_gas(chain, router, gas).await?)
    }

    async fn transfer_ownership(
        &self,
        chain: &str,
        router: Address,
        owner: Address,
    ) -> Result<(), ChainError> {
        Ok(self.hand_over(chain, router, owner).await?)
    }
}

#[async_trait::async_trait]
impl TokenRouterClient for MultiProvider {
    async fn signer_address(&self, chain: &str) -> Result<Address, ChainError> {
        Ok(self.provider(chain)?.signer_address())
    }

    async fn quote_gas_payment(
        &self,
        chain: &str,
        router: Address,
        destination: Domain,
    ) -> Result<U256, ChainError> {
        let token_router = ITokenRouter::new(router, self.rpc(chain)?);
        Ok(token_router.quoteGasPayment(destination).call().await?)
    }

    async fn balance_of(
        &self,
        chain: &str,
        router: Address,
        account: Address,
    ) -> Result<U256, ChainError> {
        let token_router = ITokenRouter::new(router, self.rpc(chain)?);
        Ok(token_router.balanceOf(account).call().await?)
    }

    async fn owner_of(
        &self,
        chain: &str,
        router: Address,
        token_id: U256,
    ) -> Result<Address, ChainError> {
        let token_router = ITokenRouter::new(router, self.rpc(chain)?);
        Ok(token_router.ownerOf(token_id).call().await?)
    }

    async fn transfer_remote(
        &self,
        chain: &str,
        router: Address,
        transfer: &RemoteTransfer,
    ) -> Result<TransactionHandle, ChainError> {
        Ok(self.send_remote(chain, router, transfer).await?)
    }
}
