//! Solidity interface definitions for warp route routers and the tokens they wrap.
//!
//! Only the functions the deployer and the transfer flow call are declared:
//! - [`IRouterInitializer`] / [`ISyntheticInitializer`] - router `initialize` overloads
//! - [`IGasRouter`] - remote router enrollment and destination gas
//! - [`IOwnable`] - ownership handover
//! - [`ITokenRouter`] - gas quotes, balances and `transferRemote`
//! - [`IERC20Metadata`] / [`IERC721Metadata`] - wrapped token metadata

use alloy_sol_types::sol;

sol! {
    /// Initializer of collateral and native routers.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IRouterInitializer {
        function initialize(address mailbox, address interchainGasPaymaster) external;
    }
}

sol! {
    /// Initializer of synthetic routers, which also mints the initial supply.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface ISyntheticInitializer {
        function initialize(
            address mailbox,
            address interchainGasPaymaster,
            uint256 totalSupply,
            string name,
            string symbol
        ) external;
    }
}

sol! {
    /// Remote router registry and per-destination gas of a Hyperlane gas router.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IGasRouter {
        struct GasRouterConfig {
            uint32 domain;
            uint256 gas;
        }

        function routers(uint32 domain) external view returns (bytes32);
        function enrollRemoteRouters(uint32[] domains, bytes32[] routers) external;
        function destinationGas(uint32 domain) external view returns (uint256);
        function setDestinationGas(GasRouterConfig[] gasConfigs) external;
    }
}

sol! {
    /// `OpenZeppelin` `Ownable`.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IOwnable {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
    }
}

sol! {
    /// Cross-chain token router. `balanceOf` and `ownerOf` are served by the
    /// router itself for synthetic routers and forwarded for collateral ones.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface ITokenRouter {
        function quoteGasPayment(uint32 destinationDomain) external view returns (uint256);
        function transferRemote(
            uint32 destination,
            bytes32 recipient,
            uint256 amountOrId
        ) external payable returns (bytes32 messageId);
        function balanceOf(address account) external view returns (uint256);
        function ownerOf(uint256 tokenId) external view returns (address);
    }
}

sol! {
    /// ERC-20 metadata extension.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
    }
}

sol! {
    /// ERC-721 metadata extension.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC721Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
    }
}
