//! Deployment workspace for one target network.
//!
//! [`Workspace`] ties together the declarative network configuration, the
//! on-disk deployment state and the signing provider, and drives the two
//! phases of a rollout: contract deployment and post-deployment bridge
//! configuration. Both phases are idempotent, so `run` can be repeated
//! until it completes.

pub mod config;

use ::config::{DeployConfig, Network};
use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use deployer::orchestrate::proxy_name;
use deployer::{deploy_grouped, ArtifactStore, ContractDeployer};
use eyre::bail;
use ledger::{DeploymentLedger, DeploymentRecord, LedgerError, TokenAddressTable};
use setup::{
    run_step, AddBridgeApprovalConfig, AddBridgeableTokens, DeployBridgeErc20Tokens,
    DepositNativeTokens, GrantBridgeApprovers, SetBridgeFlags, SetBridgeToNativeApproval,
    SetNativeTokensBridgeConfig, StepOutcome,
};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::info;

use crate::config::Config;

/// The bridge contract every network deploys.
pub const BRIDGE_CONTRACT: &str = "ParadiseBridge";

/// One independently runnable stage of the rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Deploy,
    Flags,
    NativeApproval,
    Approvers,
    Erc20Tokens,
    BridgeableTokens,
    ApprovalConfigs,
    NativeConfig,
    Deposit,
}

pub struct Workspace<P> {
    deploy_config: DeployConfig,
    contracts: ContractDeployer<P>,
    tokens: TokenAddressTable,
    deployer_address: Address,
    timeout: Duration,
}

impl<P> Workspace<P>
where
    P: Provider + Clone + Send + Sync,
{
    /// Open the workspace for a network: validate its configuration and
    /// load the on-disk deployment state.
    pub fn open(
        provider: P,
        deployer_address: Address,
        network: Network,
        config: &Config,
    ) -> eyre::Result<Self> {
        let deploy_config = DeployConfig::for_network(network);
        deploy_config.validate()?;

        let ledger = DeploymentLedger::open(&config.state_dir, network.key());
        let tokens = TokenAddressTable::load(&config.state_dir, network.key())?;
        let artifacts = ArtifactStore::new(config.artifacts_dir.clone());
        let contracts = ContractDeployer::new(provider, artifacts, ledger)
            .with_confirmation_timeout(config.confirmation_timeout())
            .with_force_redeploy(config.force_redeploy);

        Ok(Self {
            deploy_config,
            contracts,
            tokens,
            deployer_address,
            timeout: config.confirmation_timeout(),
        })
    }

    pub const fn deploy_config(&self) -> &DeployConfig {
        &self.deploy_config
    }

    /// Address of the bridge proxy, once the deploy stage has run.
    pub fn bridge_address(&self) -> eyre::Result<Address> {
        match self.contracts.resolve_existing(&proxy_name(BRIDGE_CONTRACT)) {
            Ok(record) => Ok(record.address),
            Err(LedgerError::NotFound { .. }) => {
                bail!("the {BRIDGE_CONTRACT} proxy is not deployed yet; run the deploy stage first")
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deploy the network's contract list through the implementation,
    /// beacon and proxy stages.
    pub async fn deploy(&mut self) -> eyre::Result<BTreeMap<String, DeploymentRecord>> {
        Ok(deploy_grouped(&mut self.contracts, &self.deploy_config.contracts).await?)
    }

    /// Apply the post-deployment configuration pipeline to the bridge.
    pub async fn configure(&mut self) -> eyre::Result<Vec<TxHash>> {
        let bridge = self.bridge_address()?;
        setup::apply(
            &self.deploy_config,
            bridge,
            self.deployer_address,
            &mut self.contracts,
            &mut self.tokens,
            self.timeout,
        )
        .await
    }

    /// Run the full rollout: deploy, then configure.
    pub async fn run(&mut self) -> eyre::Result<()> {
        let records = self.deploy().await?;
        let created = records.values().filter(|r| r.newly_created).count();
        info!(
            "deployment complete ({created} new contract(s), {} total)",
            records.len()
        );

        let tx_hashes = self.configure().await?;
        info!(
            "configuration complete ({} transaction(s) sent)",
            tx_hashes.len()
        );
        Ok(())
    }

    /// Run a single stage of the rollout in isolation.
    pub async fn run_stage(&mut self, stage: Stage) -> eyre::Result<Vec<TxHash>> {
        if stage == Stage::Deploy {
            let records = self.deploy().await?;
            return Ok(records
                .values()
                .filter(|r| r.newly_created)
                .map(|r| r.transaction_hash)
                .collect());
        }

        let bridge = self.bridge_address()?;
        let provider = self.contracts.provider().clone();
        let config = &self.deploy_config;

        let outcome = match stage {
            Stage::Deploy => unreachable!(),
            Stage::Flags => {
                let mut step = SetBridgeFlags::new(
                    provider,
                    bridge,
                    config.bridge_running_status,
                    config.global_fee_status,
                    config.fee_recipient.resolve(self.deployer_address),
                    self.timeout,
                );
                run_step(&mut step).await?
            }
            Stage::NativeApproval => match config.bridge_to_native_approval_status {
                Some(status) => {
                    let mut step =
                        SetBridgeToNativeApproval::new(provider, bridge, status, self.timeout);
                    run_step(&mut step).await?
                }
                None => StepOutcome::default(),
            },
            Stage::Approvers => {
                let approvers: Vec<Address> = config
                    .bridge_approvers
                    .iter()
                    .map(|a| a.resolve(self.deployer_address))
                    .collect();
                let mut step = GrantBridgeApprovers::new(provider, bridge, approvers, self.timeout);
                run_step(&mut step).await?
            }
            Stage::Erc20Tokens => {
                let configs = config.bridge_erc20_deploy_configs.clone();
                let mut step = DeployBridgeErc20Tokens::new(
                    &mut self.contracts,
                    &mut self.tokens,
                    bridge,
                    configs,
                );
                run_step(&mut step).await?
            }
            Stage::BridgeableTokens => {
                let mut entries = Vec::with_capacity(config.bridgeable_tokens.len());
                for token in &config.bridgeable_tokens {
                    entries.push((self.tokens.resolve(&token.token)?, token.config.clone()));
                }
                let mut step = AddBridgeableTokens::new(provider, bridge, entries, self.timeout);
                run_step(&mut step).await?
            }
            Stage::ApprovalConfigs => {
                let mut entries = Vec::with_capacity(config.bridge_approval_configs.len());
                for entry in &config.bridge_approval_configs {
                    entries.push((self.tokens.resolve(&entry.token)?, entry.config));
                }
                let mut step = AddBridgeApprovalConfig::new(provider, bridge, entries, self.timeout);
                run_step(&mut step).await?
            }
            Stage::NativeConfig => match &config.native_tokens_bridge_config {
                Some(native) => {
                    let mut step = SetNativeTokensBridgeConfig::new(
                        provider,
                        bridge,
                        native.clone(),
                        self.timeout,
                    );
                    run_step(&mut step).await?
                }
                None => StepOutcome::default(),
            },
            Stage::Deposit => match config.deposit_native_tokens_amount_wei() {
                Some(amount) => {
                    let mut step = DepositNativeTokens::new(provider, bridge, amount, self.timeout);
                    run_step(&mut step).await?
                }
                None => StepOutcome::default(),
            },
        };

        Ok(outcome.tx_hashes)
    }
}
