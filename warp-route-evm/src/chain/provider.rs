use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::layers::{FallbackLayer, ThrottleLayer};
use alloy_transport_http::Http;
use tower::ServiceBuilder;
#[cfg(feature = "telemetry")]
use tracing::Instrument;

use super::{ConnectionConfig, RpcEndpoint};
use crate::error::EvmChainError;

/// Signing provider for one EVM chain.
///
/// Every transaction is sent from the configured signer and awaited for the
/// configured number of confirmations; a receipt with a failed status is an
/// error.
pub struct EvmChainProvider {
    chain: String,
    chain_id: u64,
    signer: Address,
    eip1559: bool,
    confirmations: u64,
    receipt_timeout: Duration,
    inner: DynProvider,
}

impl fmt::Debug for EvmChainProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmChainProvider")
            .field("chain", &self.chain)
            .field("chain_id", &self.chain_id)
            .field("signer", &self.signer)
            .field("confirmations", &self.confirmations)
            .finish_non_exhaustive()
    }
}

impl EvmChainProvider {
    /// Creates an RPC client over the HTTP endpoints of a chain.
    ///
    /// Each endpoint is throttled to its rate limit and all of them sit behind
    /// a fallback layer. Non-HTTP(S) URLs are skipped.
    ///
    /// # Errors
    ///
    /// [`EvmChainError::NoRpcEndpoints`] if no HTTP endpoint remains.
    pub fn rpc_client(chain: &str, endpoints: &[RpcEndpoint]) -> Result<RpcClient, EvmChainError> {
        let transports = endpoints
            .iter()
            .filter(|endpoint| matches!(endpoint.url.scheme(), "http" | "https"))
            .map(|endpoint| {
                #[cfg(feature = "telemetry")]
                tracing::info!(%chain, rpc_url = %endpoint.url, rate_limit = ?endpoint.rate_limit, "Using HTTP transport");
                ServiceBuilder::new()
                    .layer(ThrottleLayer::new(endpoint.rate_limit.unwrap_or(u32::MAX)))
                    .service(Http::new(endpoint.url.clone()))
            })
            .collect::<Vec<_>>();
        let count = NonZeroUsize::new(transports.len())
            .ok_or_else(|| EvmChainError::NoRpcEndpoints(chain.to_owned()))?;
        let fallback = ServiceBuilder::new()
            .layer(FallbackLayer::default().with_active_transport_count(count))
            .service(transports);
        Ok(RpcClient::new(fallback, false))
    }

    /// Connects to `chain` and signs with `signer`.
    ///
    /// # Errors
    ///
    /// [`EvmChainError::NoRpcEndpoints`] if the connection has no HTTP endpoint.
    pub fn new(
        chain: impl Into<String>,
        connection: &ConnectionConfig,
        signer: PrivateKeySigner,
    ) -> Result<Self, EvmChainError> {
        let chain = chain.into();
        let client = Self::rpc_client(&chain, &connection.rpc_urls)?;
        let signer_address = signer.address();
        let inner = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_client(client)
            .erased();

        #[cfg(feature = "telemetry")]
        tracing::info!(%chain, chain_id = connection.chain_id, signer = %signer_address, "Using EVM provider");

        Ok(Self {
            chain,
            chain_id: connection.chain_id,
            signer: signer_address,
            eip1559: connection.eip1559,
            confirmations: connection.confirmations,
            receipt_timeout: Duration::from_secs(connection.receipt_timeout_secs),
            inner,
        })
    }

    /// Chain name.
    #[must_use]
    pub fn chain(&self) -> &str {
        &self.chain
    }

    /// EIP-155 chain ID.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Address transactions are sent from.
    #[must_use]
    pub const fn signer_address(&self) -> Address {
        self.signer
    }

    /// Underlying alloy provider, for contract bindings.
    #[must_use]
    pub const fn inner(&self) -> &DynProvider {
        &self.inner
    }

    /// Sends a transaction and waits for its confirmed receipt.
    ///
    /// On legacy chains the gas price is fetched and set explicitly; EIP-1559
    /// fees are filled by the provider.
    ///
    /// # Errors
    ///
    /// Transport or receipt errors, and [`EvmChainError::TransactionReverted`]
    /// for a failed receipt.
    pub async fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt, EvmChainError> {
        let mut tx = tx.with_from(self.signer);
        if !self.eip1559 {
            let gas_fut = self.inner.get_gas_price();
            #[cfg(feature = "telemetry")]
            let gas: u128 = gas_fut
                .instrument(tracing::info_span!("get_gas_price", chain = %self.chain))
                .await?;
            #[cfg(not(feature = "telemetry"))]
            let gas: u128 = gas_fut.await?;
            tx.set_gas_price(gas);
        }

        let pending = self.inner.send_transaction(tx).await?;
        #[cfg(feature = "telemetry")]
        tracing::debug!(chain = %self.chain, tx = %pending.tx_hash(), "Transaction submitted");

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(EvmChainError::TransactionReverted(receipt.transaction_hash));
        }
        Ok(receipt)
    }

    /// Deploys `code` (bytecode plus encoded constructor arguments) and
    /// returns the new contract's address.
    ///
    /// # Errors
    ///
    /// As [`EvmChainProvider::send_transaction`], plus
    /// [`EvmChainError::MissingContractAddress`].
    pub async fn deploy(&self, code: Bytes) -> Result<Address, EvmChainError> {
        let tx = TransactionRequest::default().with_deploy_code(code);
        let receipt = self.send_transaction(tx).await?;
        receipt
            .contract_address
            .ok_or(EvmChainError::MissingContractAddress(receipt.transaction_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(urls: &[&str]) -> ConnectionConfig {
        ConnectionConfig {
            chain_id: 31337,
            rpc_urls: urls
                .iter()
                .map(|url| RpcEndpoint {
                    url: url.parse().unwrap(),
                    rate_limit: None,
                })
                .collect(),
            confirmations: 1,
            receipt_timeout_secs: 5,
            eip1559: true,
        }
    }

    #[test]
    fn test_rpc_client_requires_http_endpoint() {
        let result =
            EvmChainProvider::rpc_client("anvil", &connection(&["ws://localhost:8546"]).rpc_urls);
        assert!(matches!(result, Err(EvmChainError::NoRpcEndpoints(ref c)) if c == "anvil"));
    }

    #[tokio::test]
    async fn test_new_uses_signer_address() {
        let signer: PrivateKeySigner =
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .parse()
                .unwrap();
        let expected = signer.address();
        let provider =
            EvmChainProvider::new("anvil", &connection(&["http://localhost:8545"]), signer)
                .unwrap();
        assert_eq!(provider.signer_address(), expected);
        assert_eq!(provider.chain_id(), 31337);
        assert_eq!(provider.chain(), "anvil");
    }
}
