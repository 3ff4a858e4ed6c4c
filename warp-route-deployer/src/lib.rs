//! Command line deployer for Hyperlane warp routes.
//!
//! Loads the chain and token configuration files, connects to every chain of
//! the route and drives the deployment and transfer flows of `warp-route`.
//!
//! # Modules
//!
//! - [`config`] - Chain configuration with environment variable expansion
//! - [`connect`] - Multi-provider construction
//! - [`error`] - Deployer error types
//! - [`files`] - JSON file helpers and deployment records
//! - [`token_config`] - Token configuration file and router defaults

pub mod config;
pub mod connect;
pub mod error;
pub mod files;
pub mod token_config;

pub use config::{ChainConfig, DeployerConfig};
pub use connect::connect;
pub use error::{ConfigError, DeployerError};
pub use token_config::{TokenRouteEntry, load_token_config, resolve_route};
