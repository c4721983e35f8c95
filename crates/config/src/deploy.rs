//! Declarative deployment configuration, one record per network.
//!
//! The configuration is data, not behavior: it lists which contracts to
//! deploy, which addresses to grant the approver role, which tokens to
//! register as bridgeable, and how much collateral to deposit. The
//! orchestrator and setup pipeline interpret it.

use crate::{ConfigError, Network};
use alloy_primitives::{address, Address, U256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;

/// An address in the configuration: either a literal address, or a
/// reference to the active deployer signer, resolved at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRef {
    /// A concrete address
    Literal(Address),
    /// The active signer address ("deployer" in the serialized form)
    DeployerSelf,
}

impl AddressRef {
    /// Resolve the reference against the active deployer address.
    pub const fn resolve(self, deployer: Address) -> Address {
        match self {
            Self::Literal(address) => address,
            Self::DeployerSelf => deployer,
        }
    }
}

impl Serialize for AddressRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(address) => address.serialize(serializer),
            Self::DeployerSelf => serializer.serialize_str("deployer"),
        }
    }
}

impl<'de> Deserialize<'de> for AddressRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "deployer" {
            return Ok(Self::DeployerSelf);
        }
        raw.parse::<Address>()
            .map(Self::Literal)
            .map_err(de::Error::custom)
    }
}

/// Per-token bridge policy, mirroring the on-chain struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBridgeConfig {
    pub enabled: bool,
    pub burn: bool,
    pub min_bridge_amount: U256,
    pub max_bridge_amount: U256,
    pub bridge_fee: U256,
}

impl TokenBridgeConfig {
    /// The policy every network ships with: enabled, lock-and-mint (no
    /// burn), unbounded amounts, no fee.
    pub const fn open() -> Self {
        Self {
            enabled: true,
            burn: false,
            min_bridge_amount: U256::ZERO,
            max_bridge_amount: U256::MAX,
            bridge_fee: U256::ZERO,
        }
    }
}

/// Per-token transfer-approval policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenApprovalConfig {
    pub enabled: bool,
    pub transfer_allowed: bool,
}

/// A token to register as bridgeable.
///
/// `token` is either a literal address or the configured name of a locally
/// deployed auxiliary token, resolved through the token-address table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeableToken {
    pub token: String,
    pub target_chain_id: u64,
    pub config: TokenBridgeConfig,
}

/// A token approval-policy registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeApprovalEntry {
    pub token: String,
    pub config: TokenApprovalConfig,
}

/// An auxiliary BridgeERC20 token to deploy with the bridge as controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeErc20Deploy {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply_with_decimals: u64,
}

impl BridgeErc20Deploy {
    /// Total supply in base units: `total_supply_with_decimals * 10^decimals`.
    pub fn total_supply(&self) -> U256 {
        U256::from(self.total_supply_with_decimals)
            * U256::from(10u64).pow(U256::from(self.decimals))
    }
}

/// An entry in the contract list to deploy on a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEntry {
    /// One implementation, one beacon, one proxy
    Single(String),
    /// One implementation and beacon for `base`, one proxy per child,
    /// each child an independent instance sharing the base's logic
    Grouped { base: String, children: Vec<String> },
}

/// Declarative deployment configuration for one network, immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    pub network: Network,
    /// Contracts deployed through the implementation/beacon/proxy stages
    pub contracts: Vec<ContractEntry>,
    pub fee_recipient: AddressRef,
    pub bridge_running_status: bool,
    pub global_fee_status: bool,
    /// When set, reconcile the bridge-to-native approval flag
    pub bridge_to_native_approval_status: Option<bool>,
    pub bridge_approvers: Vec<AddressRef>,
    pub bridgeable_tokens: Vec<BridgeableToken>,
    pub bridge_approval_configs: Vec<BridgeApprovalEntry>,
    pub bridge_erc20_deploy_configs: Vec<BridgeErc20Deploy>,
    /// When set, apply this policy to the chain's native token
    pub native_tokens_bridge_config: Option<TokenBridgeConfig>,
    /// When set and nonzero, deposit this much collateral (in ether)
    pub deposit_native_tokens_amount_ether: Option<u64>,
}

impl DeployConfig {
    /// Configuration for a registered network.
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Rinkeby => Self::rinkeby(),
            Network::Paradise => Self::paradise(),
            Network::BscTest => Self::bsc_test(),
        }
    }

    /// Origin chain: register the pre-existing PDT token as bridgeable
    /// towards the paradise sidechain.
    pub fn rinkeby() -> Self {
        Self {
            network: Network::Rinkeby,
            contracts: vec![ContractEntry::Single("ParadiseBridge".to_string())],
            fee_recipient: AddressRef::DeployerSelf,
            bridge_running_status: true,
            global_fee_status: false,
            bridge_to_native_approval_status: None,
            bridge_approvers: vec![],
            bridgeable_tokens: vec![BridgeableToken {
                token: RINKEBY_PDT.to_string(),
                target_chain_id: Network::Paradise.chain_id(),
                config: TokenBridgeConfig::open(),
            }],
            bridge_approval_configs: vec![],
            bridge_erc20_deploy_configs: vec![],
            native_tokens_bridge_config: None,
            deposit_native_tokens_amount_ether: None,
        }
    }

    /// Paradise sidechain: the bridge pays out in native tokens, so it
    /// needs the approver role, a native bridge policy and collateral.
    pub fn paradise() -> Self {
        Self {
            network: Network::Paradise,
            contracts: vec![ContractEntry::Single("ParadiseBridge".to_string())],
            fee_recipient: AddressRef::DeployerSelf,
            bridge_running_status: true,
            global_fee_status: false,
            bridge_to_native_approval_status: Some(true),
            bridge_approvers: vec![AddressRef::DeployerSelf],
            bridgeable_tokens: vec![],
            bridge_approval_configs: vec![],
            bridge_erc20_deploy_configs: vec![],
            native_tokens_bridge_config: Some(TokenBridgeConfig::open()),
            deposit_native_tokens_amount_ether: Some(1_000_000),
        }
    }

    /// BSC testnet: deploy the wrapped PDT token and register it as
    /// bridgeable towards the paradise sidechain.
    pub fn bsc_test() -> Self {
        Self {
            network: Network::BscTest,
            contracts: vec![ContractEntry::Single("ParadiseBridge".to_string())],
            fee_recipient: AddressRef::DeployerSelf,
            bridge_running_status: true,
            global_fee_status: false,
            bridge_to_native_approval_status: None,
            bridge_approvers: vec![],
            bridgeable_tokens: vec![BridgeableToken {
                token: "BridgePDT".to_string(),
                target_chain_id: Network::Paradise.chain_id(),
                config: TokenBridgeConfig::open(),
            }],
            bridge_approval_configs: vec![BridgeApprovalEntry {
                token: "BridgePDT".to_string(),
                config: TokenApprovalConfig {
                    enabled: true,
                    transfer_allowed: true,
                },
            }],
            bridge_erc20_deploy_configs: vec![BridgeErc20Deploy {
                name: "BridgePDT".to_string(),
                symbol: "BPDT".to_string(),
                decimals: 18,
                total_supply_with_decimals: 10_000_000,
            }],
            native_tokens_bridge_config: None,
            deposit_native_tokens_amount_ether: None,
        }
    }

    /// Collateral deposit amount in wei, `None` when absent or zero.
    pub fn deposit_native_tokens_amount_wei(&self) -> Option<U256> {
        match self.deposit_native_tokens_amount_ether {
            None | Some(0) => None,
            Some(amount) => {
                Some(U256::from(amount) * U256::from(10u64).pow(U256::from(18u64)))
            }
        }
    }

    /// Check the per-token lists for duplicate identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unique(
            "bridgeable_tokens",
            self.bridgeable_tokens.iter().map(|t| t.token.as_str()),
        )?;
        check_unique(
            "bridge_approval_configs",
            self.bridge_approval_configs.iter().map(|e| e.token.as_str()),
        )?;
        check_unique(
            "bridge_erc20_deploy_configs",
            self.bridge_erc20_deploy_configs
                .iter()
                .map(|e| e.name.as_str()),
        )?;
        Ok(())
    }
}

fn check_unique<'a>(
    list: &'static str,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for token in tokens {
        if !seen.insert(token) {
            return Err(ConfigError::DuplicateToken {
                list,
                token: token.to_string(),
            });
        }
    }
    Ok(())
}

/// PDT token on the origin chain, registered as bridgeable there.
const RINKEBY_PDT: Address = address!("0xFfE41F21961B75cb96C833d34164b1463A167EF0");
