//! Warp route deployment orchestrator.
//!
//! Deployment runs in three sequential phases over the chains of a route:
//!
//! 1. collateral and native routers are deployed and initialized;
//! 2. the shared token metadata is resolved and synthetic routers are
//!    deployed with it, per-chain fields overriding the shared ones;
//! 3. every router enrolls the others, sets their destination gas and is
//!    handed over to its configured owner.
//!
//! Chains already present in the [`DeployedRouterSet`] passed in are not
//! redeployed, so an interrupted run can be resumed with the partial set.

use std::fmt;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::chain::{ChainMap, Domain};
use crate::error::WarpError;
use crate::gas::gas_overhead;
use crate::metadata::{SyntheticSupply, TokenReader, resolve_metadata};
use crate::router::{DeployedRouter, DeployedRouterSet, RouterDeployer, RouterKind, RouterPlan};
use crate::token::{AssetClass, WarpRouteConfig};

/// Deploys the routers of one warp route.
pub struct WarpRouteDeployer<D> {
    chain: D,
    configs: ChainMap<WarpRouteConfig>,
    asset_class: AssetClass,
    supply: SyntheticSupply,
    gas: ChainMap<u64>,
    domains: ChainMap<Domain>,
}

impl<D> fmt::Debug for WarpRouteDeployer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarpRouteDeployer")
            .field("chains", &self.configs.chains().collect::<Vec<_>>())
            .field("asset_class", &self.asset_class)
            .field("supply", &self.supply)
            .finish_non_exhaustive()
    }
}

impl<D> WarpRouteDeployer<D>
where
    D: RouterDeployer + TokenReader,
{
    /// Validates the route and prepares a deployer for it.
    ///
    /// Every chain is checked before any chain work starts: it needs a
    /// router contract and gas default for its variant, and a domain id.
    ///
    /// # Errors
    ///
    /// [`WarpError::InvalidTokenType`], [`WarpError::UnknownDomain`] or
    /// [`WarpError::DuplicateDomain`].
    pub fn new(
        chain: D,
        configs: ChainMap<WarpRouteConfig>,
        asset_class: AssetClass,
    ) -> Result<Self, WarpError> {
        let gas = configs.try_map(|_, config| {
            RouterKind::select(asset_class, config.token.variant())?;
            gas_overhead(asset_class, config)
        })?;
        let domains = configs.try_map(|name, _| {
            chain
                .domain_id(name)
                .ok_or_else(|| WarpError::UnknownDomain(name.clone()))
        })?;
        for (index, (second, domain)) in domains.iter().enumerate() {
            if let Some((first, _)) = domains.iter().take(index).find(|(_, d)| *d == domain) {
                return Err(WarpError::DuplicateDomain {
                    domain: *domain,
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        }
        Ok(Self {
            chain,
            configs,
            asset_class,
            supply: SyntheticSupply::default(),
            gas,
            domains,
        })
    }

    /// Sets the initial supply policy of collateral-backed synthetic routers.
    #[must_use]
    pub const fn with_supply(mut self, supply: SyntheticSupply) -> Self {
        self.supply = supply;
        self
    }

    /// Per-chain configuration of the route.
    #[must_use]
    pub const fn configs(&self) -> &ChainMap<WarpRouteConfig> {
        &self.configs
    }

    /// Destination gas overhead of every chain.
    #[must_use]
    pub const fn gas(&self) -> &ChainMap<u64> {
        &self.gas
    }

    /// Deploys every chain of the route missing from `routers` and wires
    /// the whole route together.
    ///
    /// `routers` is updated as each router lands, so on error it holds
    /// everything deployed so far.
    ///
    /// # Errors
    ///
    /// [`WarpError::NoMetadataFound`] or [`WarpError::MetadataNotPopulated`]
    /// when synthetic chains cannot be initialized; chain failures as
    /// [`WarpError::Chain`].
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err, fields(asset_class = %self.asset_class)))]
    pub async fn deploy(&self, routers: &mut DeployedRouterSet) -> Result<(), WarpError> {
        self.deploy_backed(routers).await?;
        self.deploy_synthetic(routers).await?;
        self.wire(routers).await
    }

    async fn deploy_backed(&self, routers: &mut DeployedRouterSet) -> Result<(), WarpError> {
        for (chain, config) in self.configs.iter() {
            if config.token.is_synthetic() || routers.contains(chain) {
                continue;
            }
            let plan = RouterPlan::backed(self.asset_class, config)?;
            self.deploy_one(chain, &plan, routers).await?;
        }
        Ok(())
    }

    async fn deploy_synthetic(&self, routers: &mut DeployedRouterSet) -> Result<(), WarpError> {
        let pending: Vec<_> = self
            .configs
            .iter()
            .filter(|(chain, config)| config.token.is_synthetic() && !routers.contains(chain))
            .collect();
        if pending.is_empty() {
            return Ok(());
        }

        let shared =
            resolve_metadata(&self.configs, self.asset_class, self.supply, &self.chain).await?;
        for (chain, config) in pending {
            let overrides = config.token.synthetic_metadata().cloned().unwrap_or_default();
            let metadata = overrides
                .overlay(&shared)
                .complete(self.asset_class)
                .ok_or_else(|| WarpError::MetadataNotPopulated {
                    chain: chain.clone(),
                    asset_class: self.asset_class,
                })?;
            let plan = RouterPlan::synthetic(chain, self.asset_class, config, metadata)?;
            self.deploy_one(chain, &plan, routers).await?;
        }
        Ok(())
    }

    async fn deploy_one(
        &self,
        chain: &str,
        plan: &RouterPlan,
        routers: &mut DeployedRouterSet,
    ) -> Result<(), WarpError> {
        let router = self.chain.deploy_router(chain, plan).await?;
        #[cfg(feature = "telemetry")]
        tracing::info!(%chain, %router, kind = %plan.kind, "Deployed router");
        routers.insert(
            chain,
            DeployedRouter {
                router,
                kind: plan.kind,
            },
        );
        Ok(())
    }

    async fn wire(&self, routers: &DeployedRouterSet) -> Result<(), WarpError> {
        let mut members = Vec::with_capacity(self.configs.len());
        for (chain, config) in self.configs.iter() {
            let deployed = routers
                .get(chain)
                .ok_or_else(|| WarpError::UnknownChain(chain.clone()))?;
            let domain = self
                .domains
                .get(chain)
                .copied()
                .ok_or_else(|| WarpError::UnknownDomain(chain.clone()))?;
            let gas = self
                .gas
                .get(chain)
                .copied()
                .ok_or_else(|| WarpError::UnknownChain(chain.clone()))?;
            members.push((chain, config, deployed.router, domain, gas));
        }

        for &(chain, config, router, _, _) in &members {
            let others = || members.iter().filter(move |m| m.0 != chain);
            let remotes: Vec<_> = others().map(|m| (m.3, m.2)).collect();
            let gas: Vec<_> = others().map(|m| (m.3, m.4)).collect();
            if !remotes.is_empty() {
                self.chain
                    .enroll_remote_routers(chain, router, &remotes)
                    .await?;
                self.chain.set_destination_gas(chain, router, &gas).await?;
            }
            self.chain
                .transfer_ownership(chain, router, config.router.owner)
                .await?;
            #[cfg(feature = "telemetry")]
            tracing::info!(%chain, %router, remotes = remotes.len(), "Wired router");
        }
        Ok(())
    }
}
