//! Native-token collateral deposit.

use crate::{Step, StepOutcome};
use alloy_primitives::{utils::format_ether, Address, U256};
use alloy_provider::Provider;
use binding::bridge::ParadiseBridge;
use deployer::wait_for_receipt;
use std::time::Duration;
use tracing::info;

/// Deposits native-token collateral into the bridge so it can pay out
/// inbound transfers.
///
/// Completion is judged by the bridge's native balance, so a rerun after a
/// successful deposit sends nothing even though the deposit itself leaves
/// no ledger record.
pub struct DepositNativeTokens<P> {
    provider: P,
    bridge: Address,
    amount: U256,
    timeout: Duration,
}

impl<P> DepositNativeTokens<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, bridge: Address, amount: U256, timeout: Duration) -> Self {
        Self {
            provider,
            bridge,
            amount,
            timeout,
        }
    }
}

impl<P> Step for DepositNativeTokens<P>
where
    P: Provider + Clone + Send + Sync,
{
    async fn is_completed(&self) -> eyre::Result<bool> {
        let balance = self.provider.get_balance(self.bridge).await?;
        Ok(balance >= self.amount)
    }

    async fn execute(&mut self) -> eyre::Result<StepOutcome> {
        let contract = ParadiseBridge::new(self.bridge, &self.provider);
        let pending = contract
            .depositNativeTokens()
            .value(self.amount)
            .send()
            .await?;
        let receipt = wait_for_receipt(pending, self.timeout).await?;
        info!(
            "deposited {} native tokens into the bridge",
            format_ether(self.amount)
        );

        Ok(StepOutcome {
            tx_hashes: vec![receipt.transaction_hash],
        })
    }

    fn description(&self) -> String {
        format!(
            "Deposit {} native tokens into bridge {}",
            format_ether(self.amount),
            self.bridge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockProvider;

    #[test]
    fn test_description_shows_amount_in_ether() {
        let step = DepositNativeTokens::new(
            MockProvider,
            Address::from([1u8; 20]),
            U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(18u64)),
            Duration::from_secs(1),
        );

        assert!(step.description().contains("1000000"));
    }
}
