//! Transfer-approval policy registration.

use crate::{approval_config, Step, StepOutcome};
use alloy_primitives::Address;
use alloy_provider::Provider;
use binding::bridge::ParadiseBridge;
use config::TokenApprovalConfig;
use deployer::wait_for_receipt;
use std::time::Duration;
use tracing::info;

/// Registers transfer-approval policies for tokens, skipping tokens whose
/// on-chain policy already has the enabled flag set. The remainder goes in
/// one batch transaction.
pub struct AddBridgeApprovalConfig<P> {
    provider: P,
    bridge: Address,
    entries: Vec<(Address, TokenApprovalConfig)>,
    timeout: Duration,
}

impl<P> AddBridgeApprovalConfig<P>
where
    P: Provider + Clone,
{
    pub const fn new(
        provider: P,
        bridge: Address,
        entries: Vec<(Address, TokenApprovalConfig)>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            bridge,
            entries,
            timeout,
        }
    }

    async fn unregistered(&self) -> eyre::Result<Vec<(Address, TokenApprovalConfig)>> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let mut pending = Vec::new();

        for (token, config) in &self.entries {
            let registered = contract.bridgeApprovalConfigs(*token).call().await?;
            if registered.enabled {
                info!("token {token} already has an approval policy");
            } else {
                pending.push((*token, *config));
            }
        }
        Ok(pending)
    }
}

impl<P> Step for AddBridgeApprovalConfig<P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn is_completed(&self) -> eyre::Result<bool> {
        if self.entries.is_empty() {
            return Ok(true);
        }
        Ok(self.unregistered().await?.is_empty())
    }

    async fn execute(&mut self) -> eyre::Result<StepOutcome> {
        let pending = self.unregistered().await?;
        if pending.is_empty() {
            return Ok(StepOutcome::default());
        }

        let tokens: Vec<Address> = pending.iter().map(|(token, _)| *token).collect();
        let configs: Vec<ParadiseBridge::ApprovalConfig> = pending
            .iter()
            .map(|(_, config)| approval_config(config))
            .collect();

        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let request = contract
            .addBridgeApprovalConfig(tokens.clone(), configs)
            .send()
            .await?;
        let receipt = wait_for_receipt(request, self.timeout).await?;
        info!("registered approval policies for {} token(s)", tokens.len());

        Ok(StepOutcome {
            tx_hashes: vec![receipt.transaction_hash],
        })
    }

    fn description(&self) -> String {
        format!(
            "Register approval policies for {} token(s) on {}",
            self.entries.len(),
            self.bridge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockProvider;

    #[tokio::test]
    async fn test_empty_entry_list_is_completed() {
        let step = AddBridgeApprovalConfig::new(
            MockProvider,
            Address::from([1u8; 20]),
            vec![],
            Duration::from_secs(1),
        );

        assert!(step.is_completed().await.unwrap());
    }
}
