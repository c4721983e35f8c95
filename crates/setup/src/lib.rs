//! Post-deployment bridge configuration.
//!
//! Each configuration step is idempotent: it reads the relevant on-chain
//! state first and only transacts on the difference, so rerunning the
//! pipeline against an already-configured bridge issues no transactions.
//! [`apply`] runs the steps in a fixed order; the collateral deposit comes
//! last so it never races the policies it depends on.

pub mod approval;
pub mod approvers;
pub mod deposit;
pub mod erc20;
pub mod flags;
pub mod native;
pub mod tokens;

use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use binding::bridge::ParadiseBridge;
use config::DeployConfig;
use deployer::ContractDeployer;
use ledger::TokenAddressTable;
use std::{future::Future, time::Duration};
use tracing::info;

pub use approval::AddBridgeApprovalConfig;
pub use approvers::GrantBridgeApprovers;
pub use deposit::DepositNativeTokens;
pub use erc20::DeployBridgeErc20Tokens;
pub use flags::SetBridgeFlags;
pub use native::{SetBridgeToNativeApproval, SetNativeTokensBridgeConfig};
pub use tokens::AddBridgeableTokens;

/// Trait for idempotent configuration steps.
pub trait Step: Send + Sync {
    /// Check whether the desired state already holds on chain.
    fn is_completed(&self) -> impl Future<Output = eyre::Result<bool>> + Send;

    /// Drive the on-chain state to the desired state.
    ///
    /// Returns the hashes of the transactions it sent.
    fn execute(&mut self) -> impl Future<Output = eyre::Result<StepOutcome>> + Send;

    /// Get a human-readable description of this step.
    fn description(&self) -> String;
}

/// Result of a configuration step.
#[derive(Debug, Default)]
pub struct StepOutcome {
    /// Transactions sent, empty when the step was a no-op
    pub tx_hashes: Vec<TxHash>,
}

/// Run one step, skipping it when the chain already matches.
pub async fn run_step(step: &mut impl Step) -> eyre::Result<StepOutcome> {
    let description = step.description();
    if step.is_completed().await? {
        info!("[Skipped] {description}");
        return Ok(StepOutcome::default());
    }

    info!(">> {description}...");
    let outcome = step.execute().await?;
    info!(
        "[Applied] {description} ({} transaction(s))",
        outcome.tx_hashes.len()
    );
    Ok(outcome)
}

/// Translate a per-token bridge policy into its on-chain form.
pub const fn token_bridge_config(
    config: &config::TokenBridgeConfig,
) -> ParadiseBridge::TokenBridgeConfig {
    ParadiseBridge::TokenBridgeConfig {
        enabled: config.enabled,
        burn: config.burn,
        minBridgeAmount: config.min_bridge_amount,
        maxBridgeAmount: config.max_bridge_amount,
        bridgeFee: config.bridge_fee,
    }
}

/// Translate a per-token approval policy into its on-chain form.
pub const fn approval_config(config: &config::TokenApprovalConfig) -> ParadiseBridge::ApprovalConfig {
    ParadiseBridge::ApprovalConfig {
        enabled: config.enabled,
        transferAllowed: config.transfer_allowed,
    }
}

/// Apply the full configuration pipeline to a deployed bridge.
///
/// Auxiliary tokens are deployed before the registration steps so their
/// addresses can be resolved through the token table, and the collateral
/// deposit runs last.
pub async fn apply<P>(
    config: &DeployConfig,
    bridge: Address,
    deployer_address: Address,
    contracts: &mut ContractDeployer<P>,
    tokens: &mut TokenAddressTable,
    timeout: Duration,
) -> eyre::Result<Vec<TxHash>>
where
    P: Provider + Clone + Send + Sync,
{
    let provider = contracts.provider().clone();
    let mut tx_hashes = Vec::new();

    let mut flags = SetBridgeFlags::new(
        provider.clone(),
        bridge,
        config.bridge_running_status,
        config.global_fee_status,
        config.fee_recipient.resolve(deployer_address),
        timeout,
    );
    tx_hashes.extend(run_step(&mut flags).await?.tx_hashes);

    if let Some(status) = config.bridge_to_native_approval_status {
        let mut step = SetBridgeToNativeApproval::new(provider.clone(), bridge, status, timeout);
        tx_hashes.extend(run_step(&mut step).await?.tx_hashes);
    }

    let approvers: Vec<Address> = config
        .bridge_approvers
        .iter()
        .map(|a| a.resolve(deployer_address))
        .collect();
    if !approvers.is_empty() {
        let mut step = GrantBridgeApprovers::new(provider.clone(), bridge, approvers, timeout);
        tx_hashes.extend(run_step(&mut step).await?.tx_hashes);
    }

    if !config.bridge_erc20_deploy_configs.is_empty() {
        let mut step = DeployBridgeErc20Tokens::new(
            contracts,
            tokens,
            bridge,
            config.bridge_erc20_deploy_configs.clone(),
        );
        tx_hashes.extend(run_step(&mut step).await?.tx_hashes);
    }

    if !config.bridgeable_tokens.is_empty() {
        let mut entries = Vec::with_capacity(config.bridgeable_tokens.len());
        for token in &config.bridgeable_tokens {
            entries.push((tokens.resolve(&token.token)?, token.config.clone()));
        }
        let mut step = AddBridgeableTokens::new(provider.clone(), bridge, entries, timeout);
        tx_hashes.extend(run_step(&mut step).await?.tx_hashes);
    }

    if !config.bridge_approval_configs.is_empty() {
        let mut entries = Vec::with_capacity(config.bridge_approval_configs.len());
        for entry in &config.bridge_approval_configs {
            entries.push((tokens.resolve(&entry.token)?, entry.config));
        }
        let mut step = AddBridgeApprovalConfig::new(provider.clone(), bridge, entries, timeout);
        tx_hashes.extend(run_step(&mut step).await?.tx_hashes);
    }

    if let Some(native) = &config.native_tokens_bridge_config {
        let mut step =
            SetNativeTokensBridgeConfig::new(provider.clone(), bridge, native.clone(), timeout);
        tx_hashes.extend(run_step(&mut step).await?.tx_hashes);
    }

    if let Some(amount) = config.deposit_native_tokens_amount_wei() {
        let mut step = DepositNativeTokens::new(provider, bridge, amount, timeout);
        tx_hashes.extend(run_step(&mut step).await?.tx_hashes);
    }

    Ok(tx_hashes)
}

#[cfg(test)]
pub(crate) mod test_utils {
    use alloy_provider::{network::Ethereum, Provider, RootProvider};

    /// Mock provider for unit tests. Panics on any RPC use, which makes it
    /// a proof that a code path issues no transactions.
    #[derive(Clone)]
    pub struct MockProvider;

    impl Provider for MockProvider {
        fn root(&self) -> &RootProvider<Ethereum> {
            todo!()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    struct FixedStep {
        completed: bool,
        executed: bool,
    }

    impl Step for FixedStep {
        async fn is_completed(&self) -> eyre::Result<bool> {
            Ok(self.completed)
        }

        async fn execute(&mut self) -> eyre::Result<StepOutcome> {
            self.executed = true;
            Ok(StepOutcome {
                tx_hashes: vec![TxHash::from([0xaau8; 32])],
            })
        }

        fn description(&self) -> String {
            "fixed step".to_string()
        }
    }

    #[tokio::test]
    async fn test_run_step_skips_completed_step() {
        let mut step = FixedStep {
            completed: true,
            executed: false,
        };

        let outcome = run_step(&mut step).await.unwrap();
        assert!(outcome.tx_hashes.is_empty());
        assert!(!step.executed);
    }

    #[tokio::test]
    async fn test_run_step_executes_incomplete_step() {
        let mut step = FixedStep {
            completed: false,
            executed: false,
        };

        let outcome = run_step(&mut step).await.unwrap();
        assert_eq!(outcome.tx_hashes.len(), 1);
        assert!(step.executed);
    }

    #[test]
    fn test_token_bridge_config_translation() {
        let policy = config::TokenBridgeConfig::open();
        let onchain = token_bridge_config(&policy);

        assert!(onchain.enabled);
        assert!(!onchain.burn);
        assert_eq!(onchain.minBridgeAmount, U256::ZERO);
        assert_eq!(onchain.maxBridgeAmount, U256::MAX);
        assert_eq!(onchain.bridgeFee, U256::ZERO);
    }

    #[test]
    fn test_approval_config_translation() {
        let policy = config::TokenApprovalConfig {
            enabled: true,
            transfer_allowed: false,
        };
        let onchain = approval_config(&policy);

        assert!(onchain.enabled);
        assert!(!onchain.transferAllowed);
    }
}
