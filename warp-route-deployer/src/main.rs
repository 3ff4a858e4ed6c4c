//! Hyperlane warp route deployer.
//!
//! # Usage
//!
//! ```bash
//! # Deploy a route described by token.json to the chains in chains.toml
//! warp-route-deployer deploy --token-config token.json --artifacts ./artifacts
//!
//! # Resume a partial deployment
//! warp-route-deployer deploy --token-config token.json --deployment deployment.json
//!
//! # Send 1 token (18 decimals) over a deployed route
//! warp-route-deployer transfer --deployment deployment.json \
//!     --origin goerli --destination fuji --recipient 0x… --amount 1000000000000000000
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to the chain configuration (default: `chains.toml`)
//! - `PRIVATE_KEY` - Hex private key of the deployer and sender
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

use std::path::PathBuf;

use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use warp_route::amount::parse_u256;
use warp_route::metadata::SyntheticSupply;
use warp_route::router::DeployedRouterSet;
use warp_route::token::AssetClass;
use warp_route::{WarpRouteDeployer, WarpTokenApp};

use warp_route_deployer::config::DeployerConfig;
use warp_route_deployer::connect;
use warp_route_deployer::files::{load_deployment, read_json, save_deployment};
use warp_route_deployer::token_config::{load_token_config, resolve_route};

#[derive(Debug, Parser)]
#[command(version, about = "Deploy and use Hyperlane warp routes")]
struct Cli {
    /// Chain configuration file.
    #[arg(long, env = "CONFIG", default_value = "chains.toml", global = true)]
    chain_config: PathBuf,

    /// Private key of the signer on every chain.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true, global = true)]
    private_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deploy (or resume deploying) a warp route.
    Deploy(DeployArgs),
    /// Send tokens from one chain of a deployed route to another.
    Transfer(TransferArgs),
}

#[derive(Debug, Args)]
struct DeployArgs {
    /// Token configuration file (JSON, chain name to entry).
    #[arg(long)]
    token_config: PathBuf,

    /// Directory of router contract artifacts.
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Token standard bridged by the route.
    #[arg(long, value_enum, default_value = "erc20")]
    asset_class: AssetClass,

    /// Initial supply of collateral-backed synthetic routers.
    #[arg(long, value_enum, default_value = "mint-on-demand")]
    supply: SyntheticSupply,

    /// Earlier deployment to resume.
    #[arg(long)]
    deployment: Option<PathBuf>,

    /// Where to write the deployed routers.
    #[arg(long, default_value = "deployment.json")]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct TransferArgs {
    /// Deployed routers of the route.
    #[arg(long, default_value = "deployment.json")]
    deployment: PathBuf,

    /// Chain to send from.
    #[arg(long)]
    origin: String,

    /// Chain to send to.
    #[arg(long)]
    destination: String,

    /// Recipient on the destination chain.
    #[arg(long)]
    recipient: Address,

    /// Amount in base units, or the token ID for ERC-721 routes.
    #[arg(long, value_parser = parse_u256)]
    amount: U256,

    /// Token standard bridged by the route.
    #[arg(long, value_enum, default_value = "erc20")]
    asset_class: AssetClass,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing with RUST_LOG env filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("Warp route deployer failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DeployerConfig::load_from(&cli.chain_config)?;
    tracing::info!(
        path = %cli.chain_config.display(),
        chains = config.chains.len(),
        "Loaded chain configuration"
    );

    let key = cli
        .private_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or("no private key: pass --private-key or set PRIVATE_KEY")?;
    let signer: PrivateKeySigner = key.parse()?;

    match cli.command {
        Command::Deploy(args) => deploy(&config, &signer, args).await,
        Command::Transfer(args) => transfer(&config, &signer, args).await,
    }
}

async fn deploy(
    config: &DeployerConfig,
    signer: &PrivateKeySigner,
    args: DeployArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = load_token_config(&args.token_config)?;
    let route = resolve_route(&entries, config, signer.address())?;
    let multi = connect(config, route.chains().map(String::as_str), signer, args.artifacts)?;

    let deployer = WarpRouteDeployer::new(multi, route, args.asset_class)?.with_supply(args.supply);
    let mut routers = load_deployment(args.deployment.as_deref())?;
    tracing::info!(
        chains = deployer.configs().len(),
        already_deployed = routers.len(),
        asset_class = %args.asset_class,
        "Deploying warp route"
    );

    let outcome = deployer.deploy(&mut routers).await;
    // Keep partial progress so the next run can resume from it.
    save_deployment(&args.out, &routers, outcome)?;

    print_json(&routers)
}

async fn transfer(
    config: &DeployerConfig,
    signer: &PrivateKeySigner,
    args: TransferArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let routers: DeployedRouterSet = read_json(&args.deployment)?;
    let multi = connect(config, routers.chains().map(String::as_str), signer, None)?;
    let app = WarpTokenApp::new(multi, routers, args.asset_class);

    let handle = app
        .transfer(&args.origin, &args.destination, args.recipient, args.amount)
        .await?;
    tracing::info!(
        chain = %handle.chain,
        tx = %handle.transaction_hash,
        gas_payment = %handle.gas_payment,
        "Transfer submitted"
    );
    print_json(&handle)
}

#[allow(clippy::print_stdout)]
fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
