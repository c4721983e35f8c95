//! Persisted deployment state, one set of files per network.
//!
//! This crate provides:
//! - The deployment ledger: which contracts were already created, at which
//!   address, by which transaction. Consulted to skip re-creation.
//! - The token-address table: configured names of locally deployed
//!   auxiliary tokens mapped to their addresses.
//!
//! Both persist across process invocations so a killed-and-restarted run
//! picks up where the previous one left off.

pub mod record;
pub mod store;
pub mod tokens;

use thiserror::Error;

pub use record::DeploymentRecord;
pub use store::{DeploymentLedger, FileBackend, LookupBackend, MemoryBackend};
pub use tokens::TokenAddressTable;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// No backend has a record for the contract. Not inherently fatal;
    /// the deployer treats it as "deploy it now".
    #[error("no deployment record for \"{name}\"")]
    NotFound { name: String },

    /// A token identifier is neither in the token table nor a literal address
    #[error("unresolvable token \"{token}\"")]
    UnknownToken { token: String },

    #[error("ledger io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
