//! Deployment record types.

use alloy_primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};

/// One previously created contract: its name, type, address and the
/// transaction that created it.
///
/// Records are created or overwritten, never deleted. `newly_created` is
/// runtime-only: a record read back from disk or returned by a skipped
/// deploy always reports `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub name: String,
    pub contract_type: String,
    pub address: Address,
    /// ABI descriptor of the deployed interface, stored opaquely
    pub interface: serde_json::Value,
    pub transaction_hash: TxHash,
    pub gas_used: u64,
    #[serde(skip, default)]
    pub newly_created: bool,
}
