//! Native-token bridge settings.
//!
//! Only networks whose bridge pays out in native tokens carry these: the
//! bridge-to-native approval flag and the native-token bridge policy.

use crate::{token_bridge_config, Step, StepOutcome};
use alloy_primitives::Address;
use alloy_provider::Provider;
use binding::bridge::ParadiseBridge;
use config::TokenBridgeConfig;
use deployer::wait_for_receipt;
use std::time::Duration;
use tracing::info;

pub struct SetBridgeToNativeApproval<P> {
    provider: P,
    bridge: Address,
    status: bool,
    timeout: Duration,
}

impl<P> SetBridgeToNativeApproval<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, bridge: Address, status: bool, timeout: Duration) -> Self {
        Self {
            provider,
            bridge,
            status,
            timeout,
        }
    }
}

impl<P> Step for SetBridgeToNativeApproval<P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        Ok(contract.bridgeToNativeApprovalStatus().call().await? == self.status)
    }

    async fn execute(&mut self) -> eyre::Result<StepOutcome> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let pending = contract
            .setBridgeToNativeApprovalStatus(self.status)
            .send()
            .await?;
        let receipt = wait_for_receipt(pending, self.timeout).await?;
        info!("bridge-to-native approval status set to {}", self.status);

        Ok(StepOutcome {
            tx_hashes: vec![receipt.transaction_hash],
        })
    }

    fn description(&self) -> String {
        format!(
            "Set bridge-to-native approval status to {} on {}",
            self.status, self.bridge
        )
    }
}

pub struct SetNativeTokensBridgeConfig<P> {
    provider: P,
    bridge: Address,
    config: TokenBridgeConfig,
    timeout: Duration,
}

impl<P> SetNativeTokensBridgeConfig<P>
where
    P: Provider + Clone,
{
    pub const fn new(
        provider: P,
        bridge: Address,
        config: TokenBridgeConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            bridge,
            config,
            timeout,
        }
    }
}

impl<P> Step for SetNativeTokensBridgeConfig<P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let current = contract.nativeTokensBridgeConfig().call().await?;
        Ok(current == token_bridge_config(&self.config))
    }

    async fn execute(&mut self) -> eyre::Result<StepOutcome> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let pending = contract
            .setNativeTokensBridgeConfig(token_bridge_config(&self.config))
            .send()
            .await?;
        let receipt = wait_for_receipt(pending, self.timeout).await?;
        info!("native-token bridge policy updated");

        Ok(StepOutcome {
            tx_hashes: vec![receipt.transaction_hash],
        })
    }

    fn description(&self) -> String {
        format!("Set the native-token bridge policy on {}", self.bridge)
    }
}
