//! Bridge operational flags.
//!
//! The bridge deploys behind a proxy with no constructor arguments, so its
//! running flag, fee flag and fee recipient start at their defaults and
//! are reconciled here through their getter/setter pairs. Each flag gets
//! its own transaction and only when the on-chain value differs.

use crate::{Step, StepOutcome};
use alloy_primitives::Address;
use alloy_provider::Provider;
use binding::bridge::ParadiseBridge;
use deployer::wait_for_receipt;
use std::time::Duration;
use tracing::info;

pub struct SetBridgeFlags<P> {
    provider: P,
    bridge: Address,
    running_status: bool,
    global_fee_status: bool,
    fee_recipient: Address,
    timeout: Duration,
}

impl<P> SetBridgeFlags<P>
where
    P: Provider + Clone,
{
    pub const fn new(
        provider: P,
        bridge: Address,
        running_status: bool,
        global_fee_status: bool,
        fee_recipient: Address,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            bridge,
            running_status,
            global_fee_status,
            fee_recipient,
            timeout,
        }
    }
}

impl<P> Step for SetBridgeFlags<P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn is_completed(&self) -> eyre::Result<bool> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);

        Ok(contract.bridgeRunningStatus().call().await? == self.running_status
            && contract.globalFeeStatus().call().await? == self.global_fee_status
            && contract.feeRecipient().call().await? == self.fee_recipient)
    }

    async fn execute(&mut self) -> eyre::Result<StepOutcome> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let mut outcome = StepOutcome::default();

        if contract.bridgeRunningStatus().call().await? != self.running_status {
            let pending = contract
                .setBridgeRunningStatus(self.running_status)
                .send()
                .await?;
            let receipt = wait_for_receipt(pending, self.timeout).await?;
            info!("bridge running status set to {}", self.running_status);
            outcome.tx_hashes.push(receipt.transaction_hash);
        }

        if contract.globalFeeStatus().call().await? != self.global_fee_status {
            let pending = contract
                .setGlobalFeeStatus(self.global_fee_status)
                .send()
                .await?;
            let receipt = wait_for_receipt(pending, self.timeout).await?;
            info!("global fee status set to {}", self.global_fee_status);
            outcome.tx_hashes.push(receipt.transaction_hash);
        }

        if contract.feeRecipient().call().await? != self.fee_recipient {
            let pending = contract.setFeeRecipient(self.fee_recipient).send().await?;
            let receipt = wait_for_receipt(pending, self.timeout).await?;
            info!("fee recipient set to {}", self.fee_recipient);
            outcome.tx_hashes.push(receipt.transaction_hash);
        }

        Ok(outcome)
    }

    fn description(&self) -> String {
        format!(
            "Set bridge flags on {} (running: {}, fees: {}, recipient: {})",
            self.bridge, self.running_status, self.global_fee_status, self.fee_recipient
        )
    }
}
