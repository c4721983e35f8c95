//! Network registry for the bridge deployment.
//!
//! The bridge spans three networks: the origin chain (Rinkeby), the
//! paradise sidechain, and BSC testnet. The selector is an exhaustive enum
//! so that an unconfigured network is rejected before any transaction is
//! issued.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Networks the orchestrator can deploy to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Origin chain (Ethereum Rinkeby testnet)
    Rinkeby,
    /// Paradise sidechain
    Paradise,
    /// BSC testnet
    BscTest,
}

impl Network {
    /// All registered networks.
    pub const ALL: [Self; 3] = [Self::Rinkeby, Self::Paradise, Self::BscTest];

    /// Chain ID of the network.
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::Rinkeby => 4,
            Self::Paradise => 1919,
            Self::BscTest => 97,
        }
    }

    /// Key used for per-network state files (ledger, token table).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Rinkeby => "rinkeby",
            Self::Paradise => "paradise",
            Self::BscTest => "bsctest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rinkeby" => Ok(Self::Rinkeby),
            "paradise" => Ok(Self::Paradise),
            "bsctest" => Ok(Self::BscTest),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}
