//! Builds the [`MultiProvider`] for the chains of a route.

use std::path::PathBuf;

use alloy_signer_local::PrivateKeySigner;
use warp_route::chain::{ChainMap, ChainMetadata};
use warp_route_evm::{Artifacts, EvmChainProvider, MultiProvider, known_chain};

use crate::config::DeployerConfig;
use crate::error::DeployerError;

/// Connects to every chain in `chains` with `signer`.
///
/// Chain metadata is the registry entry overridden by the chain config, and
/// artifacts come from `artifacts` or else the config file's directory.
///
/// # Errors
///
/// [`DeployerError::Config`] for unconfigured chains or missing chain
/// metadata, [`DeployerError::Evm`] when a chain has no usable endpoint.
pub fn connect<'a>(
    config: &DeployerConfig,
    chains: impl IntoIterator<Item = &'a str>,
    signer: &PrivateKeySigner,
    artifacts: Option<PathBuf>,
) -> Result<MultiProvider, DeployerError> {
    let mut metadata = ChainMap::<ChainMetadata>::new();
    let mut connections = Vec::new();
    for chain in chains {
        let chain_config = config.chain(chain)?;
        let chain_metadata = chain_config.metadata(chain, known_chain(chain).as_ref())?;
        connections.push((chain, chain_config.connection(chain_metadata.chain_id)));
        metadata.insert(chain, chain_metadata);
    }

    let mut multi = MultiProvider::new(metadata);
    if let Some(dir) = artifacts.or_else(|| config.artifacts.clone()) {
        multi = multi.with_artifacts(Artifacts::new(dir));
    }
    for (chain, connection) in connections {
        multi.add_provider(EvmChainProvider::new(chain, &connection, signer.clone())?);
    }
    Ok(multi)
}
