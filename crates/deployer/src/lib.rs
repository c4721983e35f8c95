//! Contract deployment for the bridge orchestrator.
//!
//! This crate provides:
//! - The compiled-artifact store (opaque bytecode + ABI inputs)
//! - The transaction waiter (bounded wait, always settles)
//! - The contract deployer (skip-if-already-deployed, ledger recording)
//! - Grouped multi-stage deployment (implementation → beacon → proxy)

pub mod artifact;
pub mod deploy;
pub mod orchestrate;
pub mod wait;

use std::path::PathBuf;
use thiserror::Error;

pub use artifact::{ArtifactStore, ContractArtifact};
pub use deploy::{ContractDeployer, CREATION_GAS_LIMIT};
pub use orchestrate::{deploy_grouped, plan, DeployStage};
pub use wait::{wait_for_receipt, WaitError, DEFAULT_CONFIRMATION_TIMEOUT};

#[derive(Error, Debug)]
pub enum DeployError {
    /// No compiled artifact for the requested contract type
    #[error("artifact for contract type \"{contract_type}\" not found under {}", dir.display())]
    ArtifactNotFound {
        contract_type: String,
        dir: PathBuf,
    },

    /// The artifact file exists but cannot be used as a deploy input
    #[error("invalid artifact for \"{contract_type}\": {reason}")]
    InvalidArtifact {
        contract_type: String,
        reason: String,
    },

    /// The creation transaction could not be submitted
    #[error("failed to submit creation transaction for \"{name}\": {reason}")]
    Submission { name: String, reason: String },

    /// The creation receipt carries no contract address
    #[error("no contract address in creation receipt for \"{name}\"")]
    NoContractAddress { name: String },

    /// A grouped deployment needs an address an earlier stage never produced
    #[error("missing prerequisite deployment \"{required}\" for \"{name}\"")]
    MissingPrerequisite { name: String, required: String },

    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error(transparent)]
    Ledger(#[from] ledger::LedgerError),
}
