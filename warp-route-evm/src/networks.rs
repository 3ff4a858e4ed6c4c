//! Known Hyperlane EVM chains: EIP-155 chain IDs, Hyperlane domains and
//! native assets.
//!
//! Mainnet domains are the ASCII tag of the chain packed into a `u32`
//! (`"eth"` is `0x657468`); testnets mostly reuse their chain ID.

use warp_route::chain::{ChainMap, ChainMetadata, Domain, NativeToken};

/// Ethereum Mainnet domain (`"eth"`).
pub const ETHEREUM_DOMAIN: Domain = 0x0065_7468;

/// Arbitrum One domain (`"arb"`).
pub const ARBITRUM_DOMAIN: Domain = 0x0061_7262;

/// Avalanche C-Chain domain (`"avax"`).
pub const AVALANCHE_DOMAIN: Domain = 0x6176_6178;

/// BNB Smart Chain domain (`"bsc"`).
pub const BSC_DOMAIN: Domain = 0x0062_7363;

/// Celo domain (`"celo"`).
pub const CELO_DOMAIN: Domain = 0x6365_6c6f;

/// Optimism domain (`"op"`).
pub const OPTIMISM_DOMAIN: Domain = 0x6f70;

/// Polygon domain (`"poly"`).
pub const POLYGON_DOMAIN: Domain = 0x706f_6c79;

/// Moonbeam domain (`"moon"`).
pub const MOONBEAM_DOMAIN: Domain = 0x6d6f_6f6e;

/// BSC testnet domain (`"bs-t"`).
pub const BSC_TESTNET_DOMAIN: Domain = 0x6273_2d74;

/// Moonbase Alpha domain (`"mo-a"`).
pub const MOONBASE_ALPHA_DOMAIN: Domain = 0x6d6f_2d61;

struct KnownChain {
    name: &'static str,
    chain_id: u64,
    domain_id: Domain,
    native: (&'static str, &'static str),
}

const fn chain(
    name: &'static str,
    chain_id: u64,
    domain_id: Domain,
    native: (&'static str, &'static str),
) -> KnownChain {
    KnownChain {
        name,
        chain_id,
        domain_id,
        native,
    }
}

const ETHER: (&str, &str) = ("Ether", "ETH");

const KNOWN_CHAINS: &[KnownChain] = &[
    chain("ethereum", 1, ETHEREUM_DOMAIN, ETHER),
    chain("arbitrum", 42161, ARBITRUM_DOMAIN, ETHER),
    chain("avalanche", 43114, AVALANCHE_DOMAIN, ("Avalanche", "AVAX")),
    chain("bsc", 56, BSC_DOMAIN, ("BNB", "BNB")),
    chain("celo", 42220, CELO_DOMAIN, ("CELO", "CELO")),
    chain("optimism", 10, OPTIMISM_DOMAIN, ETHER),
    chain("polygon", 137, POLYGON_DOMAIN, ("Matic", "MATIC")),
    chain("moonbeam", 1284, MOONBEAM_DOMAIN, ("Moonbeam", "GLMR")),
    chain("alfajores", 44787, 1000, ("CELO", "CELO")),
    chain("arbitrumgoerli", 421_613, 421_613, ETHER),
    chain("bsctestnet", 97, BSC_TESTNET_DOMAIN, ("BNB", "BNB")),
    chain("fuji", 43113, 43113, ("Avalanche", "AVAX")),
    chain("goerli", 5, 5, ETHER),
    chain("moonbasealpha", 1287, MOONBASE_ALPHA_DOMAIN, ("DEV", "DEV")),
    chain("mumbai", 80001, 80001, ("Matic", "MATIC")),
    chain("optimismgoerli", 420, 420, ETHER),
    chain("test1", 13371, 13371, ETHER),
    chain("test2", 13372, 13372, ETHER),
    chain("test3", 13373, 13373, ETHER),
];

impl KnownChain {
    fn metadata(&self) -> ChainMetadata {
        ChainMetadata {
            chain_id: self.chain_id,
            domain_id: self.domain_id,
            native_token: Some(NativeToken {
                name: self.native.0.to_owned(),
                symbol: self.native.1.to_owned(),
                decimals: 18,
            }),
        }
    }
}

/// Metadata of every known chain, keyed by Hyperlane chain name.
#[must_use]
pub fn known_chains() -> ChainMap<ChainMetadata> {
    KNOWN_CHAINS
        .iter()
        .map(|known| (known.name, known.metadata()))
        .collect()
}

/// Metadata of a known chain.
#[must_use]
pub fn known_chain(name: &str) -> Option<ChainMetadata> {
    KNOWN_CHAINS
        .iter()
        .find(|known| known.name == name)
        .map(KnownChain::metadata)
}
