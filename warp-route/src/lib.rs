#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Chain-agnostic core for Hyperlane warp routes.
//!
//! A warp route bridges one token across several chains: a collateral or
//! native router locks the original asset on its home chain and synthetic
//! routers mint a representation of it everywhere else. This crate holds the
//! logic that turns a per-chain token configuration into deployed, wired
//! routers, and the client-side transfer flow over them. Everything that
//! touches a chain goes through the collaborator traits, implemented for EVM
//! chains by `warp-route-evm`.
//!
//! # Modules
//!
//! - [`amount`] - 256-bit amount parsing and serde helpers
//! - [`app`] - Cross-chain transfers over deployed routers
//! - [`chain`] - Chain names, domains, ordered chain maps and chain metadata
//! - [`deploy`] - Three-phase deployment orchestrator
//! - [`error`] - Error types
//! - [`gas`] - Default destination gas overheads
//! - [`metadata`] - Shared token metadata resolution
//! - [`router`] - Router variants, deployment plans and the deployer trait
//! - [`token`] - Token configuration model and validation
//!
//! # Feature Flags
//!
//! - `cli` - `clap::ValueEnum` for [`AssetClass`] and [`SyntheticSupply`]
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod amount;
pub mod app;
pub mod chain;
pub mod deploy;
pub mod error;
pub mod gas;
pub mod metadata;
pub mod router;
pub mod token;

#[cfg(test)]
mod testing;

pub use app::{RemoteTransfer, TokenRouterClient, TransactionHandle, WarpTokenApp};
pub use chain::{ChainMap, ChainMetadata, ChainMetadataProvider, ChainName, Domain, NativeToken};
pub use deploy::WarpRouteDeployer;
pub use error::{ChainError, InvalidTokenConfig, WarpError};
pub use gas::default_gas_overhead;
pub use metadata::{OnChainToken, SyntheticSupply, TokenReader, resolve_metadata};
pub use router::{DeployedRouter, DeployedRouterSet, RouterDeployer, RouterKind, RouterPlan};
pub use token::{AssetClass, TokenConfig, TokenMetadata, TokenVariant, WarpRouteConfig};
