#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM chain binding for Hyperlane warp routes.
//!
//! Implements the collaborator traits of the `warp-route` core on top of
//! alloy: router bytecode comes from Hardhat or Foundry artifacts, every
//! chain gets a signing provider over throttled, fallback HTTP transports,
//! and [`MultiProvider`] routes each call to the right chain.
//!
//! # Modules
//!
//! - [`artifacts`] - Router creation bytecode and constructor encoding
//! - [`chain`] - Per-chain connection config and signing provider
//! - [`contract`] - `sol!` bindings of router and token interfaces
//! - [`error`] - EVM binding error types
//! - [`multi_provider`] - Collaborator trait implementations over all chains
//! - [`networks`] - Known Hyperlane EVM chains
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod artifacts;
pub mod chain;
pub mod contract;
pub mod error;
pub mod multi_provider;
pub mod networks;

pub use artifacts::Artifacts;
pub use chain::{ConnectionConfig, EvmChainProvider, RpcEndpoint};
pub use error::{ArtifactError, EvmChainError};
pub use multi_provider::MultiProvider;
pub use networks::{known_chain, known_chains};
