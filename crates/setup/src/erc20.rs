//! Auxiliary BridgeERC20 token deployment.
//!
//! Tokens deploy as plain contracts (no proxy stages) with the bridge as
//! their controller, and their addresses land in the token-address table
//! so the registration steps can refer to them by configured name.

use crate::{Step, StepOutcome};
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_sol_types::SolConstructor;
use binding::token::BridgeERC20;
use config::BridgeErc20Deploy;
use deployer::ContractDeployer;
use ledger::TokenAddressTable;

pub struct DeployBridgeErc20Tokens<'a, P> {
    deployer: &'a mut ContractDeployer<P>,
    tokens: &'a mut TokenAddressTable,
    bridge: Address,
    configs: Vec<BridgeErc20Deploy>,
}

impl<'a, P> DeployBridgeErc20Tokens<'a, P>
where
    P: Provider + Clone,
{
    pub fn new(
        deployer: &'a mut ContractDeployer<P>,
        tokens: &'a mut TokenAddressTable,
        bridge: Address,
        configs: Vec<BridgeErc20Deploy>,
    ) -> Self {
        Self {
            deployer,
            tokens,
            bridge,
            configs,
        }
    }
}

impl<P> Step for DeployBridgeErc20Tokens<'_, P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn is_completed(&self) -> eyre::Result<bool> {
        Ok(self.configs.iter().all(|config| {
            self.deployer.resolve_existing(&config.name).is_ok()
                && self.tokens.get(&config.name).is_some()
        }))
    }

    async fn execute(&mut self) -> eyre::Result<StepOutcome> {
        let mut outcome = StepOutcome::default();

        for config in &self.configs {
            let args = BridgeERC20::constructorCall {
                name: config.name.clone(),
                symbol: config.symbol.clone(),
                decimals: config.decimals,
                totalSupply: config.total_supply(),
                bridge: self.bridge,
            }
            .abi_encode();

            let record = self
                .deployer
                .deploy(&config.name, "BridgeERC20", &args)
                .await?;
            self.tokens.insert(config.name.clone(), record.address)?;

            if record.newly_created {
                outcome.tx_hashes.push(record.transaction_hash);
            }
        }

        Ok(outcome)
    }

    fn description(&self) -> String {
        format!(
            "Deploy {} bridge token(s) controlled by {}",
            self.configs.len(),
            self.bridge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockProvider;
    use alloy_primitives::TxHash;
    use deployer::ArtifactStore;
    use ledger::{DeploymentLedger, DeploymentRecord};
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bridge-erc20-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn erc20(name: &str) -> BridgeErc20Deploy {
        BridgeErc20Deploy {
            name: name.to_string(),
            symbol: "BPDT".to_string(),
            decimals: 18,
            total_supply_with_decimals: 10_000_000,
        }
    }

    // With every token in the ledger and the table, the step completes
    // without touching the provider (MockProvider panics on use).
    #[tokio::test]
    async fn test_already_deployed_tokens_complete_without_transactions() {
        let dir = temp_dir("deployed");
        let address = Address::from([0x21u8; 20]);

        let mut ledger = DeploymentLedger::open(&dir, "bsctest");
        ledger
            .record(DeploymentRecord {
                name: "BridgePDT".to_string(),
                contract_type: "BridgeERC20".to_string(),
                address,
                interface: serde_json::Value::Array(vec![]),
                transaction_hash: TxHash::from([0x03u8; 32]),
                gas_used: 1,
                newly_created: true,
            })
            .unwrap();

        let mut tokens = TokenAddressTable::load(&dir, "bsctest").unwrap();
        tokens.insert("BridgePDT".to_string(), address).unwrap();

        let mut deployer =
            ContractDeployer::new(MockProvider, ArtifactStore::new(dir.join("artifacts")), ledger);
        let step = DeployBridgeErc20Tokens::new(
            &mut deployer,
            &mut tokens,
            Address::from([1u8; 20]),
            vec![erc20("BridgePDT")],
        );

        assert!(step.is_completed().await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_table_entry_means_incomplete() {
        let dir = temp_dir("missing-table");

        let ledger = DeploymentLedger::open(&dir, "bsctest");
        let mut tokens = TokenAddressTable::load(&dir, "bsctest").unwrap();
        let mut deployer =
            ContractDeployer::new(MockProvider, ArtifactStore::new(dir.join("artifacts")), ledger);

        let step = DeployBridgeErc20Tokens::new(
            &mut deployer,
            &mut tokens,
            Address::from([1u8; 20]),
            vec![erc20("BridgePDT")],
        );

        assert!(!step.is_completed().await.unwrap());
    }
}
