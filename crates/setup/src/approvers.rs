//! Approver role grants.

use crate::{Step, StepOutcome};
use alloy_primitives::Address;
use alloy_provider::Provider;
use binding::bridge::ParadiseBridge;
use deployer::wait_for_receipt;
use std::time::Duration;
use tracing::info;

/// Grants the bridge approver role to each configured account, one
/// transaction per account that does not hold the role yet.
pub struct GrantBridgeApprovers<P> {
    provider: P,
    bridge: Address,
    approvers: Vec<Address>,
    timeout: Duration,
}

impl<P> GrantBridgeApprovers<P>
where
    P: Provider + Clone,
{
    pub const fn new(
        provider: P,
        bridge: Address,
        approvers: Vec<Address>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            bridge,
            approvers,
            timeout,
        }
    }
}

impl<P> Step for GrantBridgeApprovers<P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn is_completed(&self) -> eyre::Result<bool> {
        if self.approvers.is_empty() {
            return Ok(true);
        }

        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let role = contract.BRIDGE_APPROVER_ROLE().call().await?;

        for approver in &self.approvers {
            if !contract.hasRole(role, *approver).call().await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn execute(&mut self) -> eyre::Result<StepOutcome> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let role = contract.BRIDGE_APPROVER_ROLE().call().await?;
        let mut outcome = StepOutcome::default();

        for approver in &self.approvers {
            if contract.hasRole(role, *approver).call().await? {
                info!("{approver} already holds the approver role");
                continue;
            }

            let pending = contract.grantRole(role, *approver).send().await?;
            let receipt = wait_for_receipt(pending, self.timeout).await?;
            info!("approver role granted to {approver}");
            outcome.tx_hashes.push(receipt.transaction_hash);
        }

        Ok(outcome)
    }

    fn description(&self) -> String {
        format!(
            "Grant the approver role to {} account(s) on {}",
            self.approvers.len(),
            self.bridge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockProvider;

    // An empty approver list completes without touching the provider
    // (MockProvider panics on use).
    #[tokio::test]
    async fn test_empty_approver_list_is_completed() {
        let step = GrantBridgeApprovers::new(
            MockProvider,
            Address::from([1u8; 20]),
            vec![],
            Duration::from_secs(1),
        );

        assert!(step.is_completed().await.unwrap());
    }
}
