//! Transaction confirmation waiter.
//!
//! All transactions originate from one signer account and must be ordered,
//! so every submission suspends here until its receipt arrives. The wait
//! always settles: a non-success receipt is an error carrying the receipt,
//! and the wait itself is bounded.

use alloy_primitives::TxHash;
use alloy_provider::PendingTransactionBuilder;
use alloy_rpc_types_eth::TransactionReceipt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Bound on every confirmation wait.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Error, Debug)]
pub enum WaitError {
    /// The transaction confirmed with a failure status
    #[error("transaction {tx_hash} reverted (gas used: {})", receipt.gas_used)]
    Failed {
        tx_hash: TxHash,
        receipt: Box<TransactionReceipt>,
    },

    /// No receipt within the bounded wait
    #[error("transaction {tx_hash} not confirmed within {}s", timeout.as_secs())]
    Timeout { tx_hash: TxHash, timeout: Duration },

    /// The receipt could not be fetched
    #[error("error awaiting receipt for {tx_hash}: {reason}")]
    Rpc { tx_hash: TxHash, reason: String },
}

/// Suspend until the transaction is confirmed, then map its receipt status
/// to success or failure.
pub async fn wait_for_receipt(
    pending: PendingTransactionBuilder<alloy_provider::network::Ethereum>,
    timeout: Duration,
) -> Result<TransactionReceipt, WaitError> {
    let tx_hash = *pending.tx_hash();

    let receipt = tokio::time::timeout(timeout, pending.get_receipt())
        .await
        .map_err(|_| WaitError::Timeout { tx_hash, timeout })?
        .map_err(|e| WaitError::Rpc {
            tx_hash,
            reason: e.to_string(),
        })?;

    debug!(
        tx = %receipt.transaction_hash,
        block = receipt.block_number.unwrap_or_default(),
        gas_used = receipt.gas_used,
        "transaction confirmed"
    );

    if !receipt.status() {
        return Err(WaitError::Failed {
            tx_hash,
            receipt: Box::new(receipt),
        });
    }

    Ok(receipt)
}
