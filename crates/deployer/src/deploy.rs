//! Single-contract deployment with skip-if-already-deployed.

use crate::{
    artifact::ArtifactStore,
    wait::{wait_for_receipt, DEFAULT_CONFIRMATION_TIMEOUT},
    DeployError,
};
use alloy_network::TransactionBuilder;
use alloy_provider::Provider;
use alloy_rpc_types_eth::TransactionRequest;
use ledger::{DeploymentLedger, DeploymentRecord, LedgerError};
use std::time::Duration;
use tracing::info;

/// Fixed gas ceiling for contract-creation transactions, matching the
/// limit the contracts were sized for.
pub const CREATION_GAS_LIMIT: u64 = 5_500_000;

/// Submits contract-creation transactions, waits for confirmation and
/// records outcomes in the deployment ledger.
pub struct ContractDeployer<P> {
    provider: P,
    artifacts: ArtifactStore,
    ledger: DeploymentLedger,
    confirmation_timeout: Duration,
    force_redeploy: bool,
}

impl<P> ContractDeployer<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, artifacts: ArtifactStore, ledger: DeploymentLedger) -> Self {
        Self {
            provider,
            artifacts,
            ledger,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            force_redeploy: false,
        }
    }

    /// Bound each confirmation wait (default 300s).
    pub const fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Redeploy even when the ledger already has a record.
    pub const fn with_force_redeploy(mut self, force: bool) -> Self {
        self.force_redeploy = force;
        self
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve a contract name against the ledger without deploying.
    pub fn resolve_existing(&self, name: &str) -> Result<DeploymentRecord, LedgerError> {
        self.ledger.resolve(name)
    }

    /// Deploy a contract under `name`, or return the existing record when
    /// the ledger already has one.
    ///
    /// `constructor_args` are ABI-encoded and appended to the artifact's
    /// creation bytecode. On any failure nothing is recorded; rerunning is
    /// the recovery path.
    pub async fn deploy(
        &mut self,
        name: &str,
        contract_type: &str,
        constructor_args: &[u8],
    ) -> Result<DeploymentRecord, DeployError> {
        if !self.force_redeploy {
            match self.ledger.resolve(name) {
                Ok(mut record) => {
                    record.newly_created = false;
                    info!(
                        "[Reused] contract \"{}\" (\"{}\") at \"{}\"",
                        name, contract_type, record.address
                    );
                    return Ok(record);
                }
                Err(LedgerError::NotFound { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }

        info!(">> Deploying contract \"{}\" (\"{}\")...", name, contract_type);

        let artifact = self.artifacts.load(contract_type)?;
        let mut init_code = artifact.bytecode.to_vec();
        init_code.extend_from_slice(constructor_args);

        let tx = TransactionRequest::default()
            .with_deploy_code(init_code)
            .with_gas_limit(CREATION_GAS_LIMIT);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeployError::Submission {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let receipt = wait_for_receipt(pending, self.confirmation_timeout).await?;

        let address = receipt
            .contract_address
            .ok_or_else(|| DeployError::NoContractAddress {
                name: name.to_string(),
            })?;

        let record = DeploymentRecord {
            name: name.to_string(),
            contract_type: contract_type.to_string(),
            address,
            interface: artifact.abi,
            transaction_hash: receipt.transaction_hash,
            gas_used: receipt.gas_used,
            newly_created: true,
        };
        self.ledger.record(record.clone())?;

        info!(
            "[New] contract \"{}\" (\"{}\") deployed at \"{}\"\n - tx: \"{}\"\n - gas: {}",
            name, contract_type, address, receipt.transaction_hash, receipt.gas_used
        );

        Ok(record)
    }
}
