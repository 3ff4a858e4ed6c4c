//! In-memory chain used by the unit tests.

use alloy_primitives::{Address, B256, U256, address};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::app::{RemoteTransfer, TokenRouterClient, TransactionHandle};
use crate::chain::{ChainMap, ChainMetadataProvider, Domain, NativeToken};
use crate::error::ChainError;
use crate::metadata::{OnChainToken, TokenReader};
use crate::router::{RouterDeployer, RouterPlan};
use crate::token::{AssetClass, RouterConfig, TokenConfig, WarpRouteConfig};

/// Builds a chain entry with fixed mailbox, paymaster and owner.
pub fn route_config(token: TokenConfig) -> WarpRouteConfig {
    WarpRouteConfig {
        router: RouterConfig {
            mailbox: address!("0x0000000000000000000000000000000000000b01"),
            interchain_gas_paymaster: address!("0x0000000000000000000000000000000000000b02"),
            owner: address!("0x0000000000000000000000000000000000000b03"),
            gas: None,
        },
        token,
    }
}

/// A state-changing call recorded by [`MockChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Deploy {
        chain: String,
        plan: RouterPlan,
    },
    Enroll {
        chain: String,
        router: Address,
        remotes: Vec<(Domain, Address)>,
    },
    DestinationGas {
        chain: String,
        router: Address,
        gas: Vec<(Domain, u64)>,
    },
    TransferOwnership {
        chain: String,
        router: Address,
        owner: Address,
    },
    TransferRemote {
        chain: String,
        router: Address,
        transfer: RemoteTransfer,
    },
}

#[derive(Debug, Default)]
struct State {
    domains: ChainMap<Domain>,
    natives: ChainMap<NativeToken>,
    tokens: HashMap<(String, Address), OnChainToken>,
    signer: Address,
    gas_quote: U256,
    balances: HashMap<(Address, Address), U256>,
    owners: HashMap<(Address, U256), Address>,
    reads: usize,
    calls: Vec<Call>,
}

/// Recording implementation of every chain collaborator trait.
#[derive(Debug, Clone, Default)]
pub struct MockChain(Arc<Mutex<State>>);

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.0.lock().unwrap()
    }

    pub fn with_domain(self, chain: &str, domain: Domain) -> Self {
        self.state().domains.insert(chain, domain);
        self
    }

    pub fn with_native(self, chain: &str, native: NativeToken) -> Self {
        self.state().natives.insert(chain, native);
        self
    }

    pub fn with_token(self, chain: &str, token: Address, metadata: OnChainToken) -> Self {
        self.state()
            .tokens
            .insert((chain.to_owned(), token), metadata);
        self
    }

    pub fn with_signer(self, signer: Address) -> Self {
        self.state().signer = signer;
        self
    }

    pub fn with_gas_quote(self, quote: U256) -> Self {
        self.state().gas_quote = quote;
        self
    }

    pub fn with_balance(self, router: Address, account: Address, balance: U256) -> Self {
        self.state().balances.insert((router, account), balance);
        self
    }

    pub fn with_owner(self, router: Address, token_id: U256, owner: Address) -> Self {
        self.state().owners.insert((router, token_id), owner);
        self
    }

    /// Number of token contract reads.
    pub fn read_count(&self) -> usize {
        self.state().reads
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn deployed_plans(&self) -> Vec<(String, RouterPlan)> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Deploy { chain, plan } => Some((chain.clone(), plan.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn submitted_transfers(&self) -> Vec<RemoteTransfer> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::TransferRemote { transfer, .. } => Some(*transfer),
                _ => None,
            })
            .collect()
    }
}

impl ChainMetadataProvider for MockChain {
    fn domain_id(&self, chain: &str) -> Option<Domain> {
        self.state().domains.get(chain).copied()
    }

    fn native_token(&self, chain: &str) -> Option<NativeToken> {
        self.state().natives.get(chain).cloned()
    }
}

#[async_trait::async_trait]
impl TokenReader for MockChain {
    async fn read_token(
        &self,
        chain: &str,
        token: Address,
        _asset_class: AssetClass,
    ) -> Result<OnChainToken, ChainError> {
        let mut state = self.state();
        state.reads += 1;
        state
            .tokens
            .get(&(chain.to_owned(), token))
            .cloned()
            .ok_or_else(|| format!("execution reverted: no token at {token} on {chain}").into())
    }
}

#[async_trait::async_trait]
impl RouterDeployer for MockChain {
    async fn deploy_router(&self, chain: &str, plan: &RouterPlan) -> Result<Address, ChainError> {
        let mut state = self.state();
        state.calls.push(Call::Deploy {
            chain: chain.to_owned(),
            plan: plan.clone(),
        });
        let nonce = u8::try_from(state.calls.len()).unwrap_or(u8::MAX);
        Ok(Address::with_last_byte(nonce))
    }

    async fn enroll_remote_routers(
        &self,
        chain: &str,
        router: Address,
        remotes: &[(Domain, Address)],
    ) -> Result<(), ChainError> {
        self.state().calls.push(Call::Enroll {
            chain: chain.to_owned(),
            router,
            remotes: remotes.to_vec(),
        });
        Ok(())
    }

    async fn set_destination_gas(
        &self,
        chain: &str,
        router: Address,
        gas: &[(Domain, u64)],
    ) -> Result<(), ChainError> {
        self.state().calls.push(Call::DestinationGas {
            chain: chain.to_owned(),
            router,
            gas: gas.to_vec(),
        });
        Ok(())
    }

    async fn transfer_ownership(
        &self,
        chain: &str,
        router: Address,
        owner: Address,
    ) -> Result<(), ChainError> {
        self.state().calls.push(Call::TransferOwnership {
            chain: chain.to_owned(),
            router,
            owner,
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl TokenRouterClient for MockChain {
    async fn signer_address(&self, _chain: &str) -> Result<Address, ChainError> {
        Ok(self.state().signer)
    }

    async fn quote_gas_payment(
        &self,
        _chain: &str,
        _router: Address,
        _destination: Domain,
    ) -> Result<U256, ChainError> {
        Ok(self.state().gas_quote)
    }

    async fn balance_of(
        &self,
        _chain: &str,
        router: Address,
        account: Address,
    ) -> Result<U256, ChainError> {
        Ok(self
            .state()
            .balances
            .get(&(router, account))
            .copied()
            .unwrap_or_default())
    }

    async fn owner_of(
        &self,
        _chain: &str,
        router: Address,
        token_id: U256,
    ) -> Result<Address, ChainError> {
        self.state()
            .owners
            .get(&(router, token_id))
            .copied()
            .ok_or_else(|| "execution reverted: ERC721: invalid token ID".into())
    }

    async fn transfer_remote(
        &self,
        chain: &str,
        router: Address,
        transfer: &RemoteTransfer,
    ) -> Result<TransactionHandle, ChainError> {
        self.state().calls.push(Call::TransferRemote {
            chain: chain.to_owned(),
            router,
            transfer: *transfer,
        });
        Ok(TransactionHandle {
            chain: chain.to_owned(),
            transaction_hash: B256::with_last_byte(1),
            block_number: Some(1),
            gas_payment: transfer.gas_payment,
        })
    }
}
