//! Configuration types for the bridge deployment orchestrator.
//!
//! This crate provides:
//! - The `Network` registry (origin chain, paradise sidechain, BSC testnet)
//! - One declarative `DeployConfig` per network
//! - Validation of the declarative data before any transaction is issued

pub mod deploy;
pub mod network;

use thiserror::Error;

pub use deploy::{
    AddressRef, BridgeApprovalEntry, BridgeErc20Deploy, BridgeableToken, ContractEntry,
    DeployConfig, TokenBridgeConfig, TokenApprovalConfig,
};
pub use network::Network;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The network selector does not name a registered network
    #[error("unconfigured network: \"{0}\"")]
    UnknownNetwork(String),

    /// A token identifier appears more than once in a per-token list
    #[error("duplicate token \"{token}\" in {list}")]
    DuplicateToken { list: &'static str, token: String },
}
