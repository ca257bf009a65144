//! The wallet capability consumed by the payment flow.
//!
//! The payment handler needs exactly three things from an account subsystem:
//! which network it is on, the ability to submit a raw transaction, and the
//! ability to wait for that transaction's receipt. Everything else (key
//! management, nonce sequencing, gas estimation) is the implementation's
//! concern. `ax402-evm` provides an alloy-backed implementation.

use alloy_primitives::{Address, Bytes, TxHash, U256};

use crate::networks::NetworkId;

/// Receipt of a confirmed transfer transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Hash of the mined transaction.
    pub transaction_hash: TxHash,

    /// Whether the transaction executed successfully onchain.
    pub confirmed: bool,
}

/// Errors surfaced by a wallet capability.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The configured signing key could not be parsed.
    #[error("invalid signer key: {0}")]
    InvalidKey(String),

    /// The chain the RPC endpoint serves is not the configured network.
    #[error("wallet is connected to `{actual}` but `{expected}` was configured")]
    NetworkMismatch {
        /// Network the configuration asked for.
        expected: NetworkId,
        /// Network derived from the chain's reported ID.
        actual: NetworkId,
    },

    /// The transaction was rejected before it reached the mempool.
    #[error("transaction submission failed: {0}")]
    Submit(String),

    /// No receipt was observed within the implementation's wait bound.
    #[error("no receipt for transaction {tx_hash} within {waited_secs}s")]
    ReceiptTimeout {
        /// Hash of the submitted transaction.
        tx_hash: TxHash,
        /// Seconds waited before giving up.
        waited_secs: u64,
    },

    /// The underlying RPC provider failed.
    #[error("provider error: {0}")]
    Provider(String),
}

/// The narrow interface the payment flow requires from an account subsystem.
///
/// Implementations hold the one shared resource of the flow (a signing key).
/// If multiple payment flows run concurrently against the same wallet, nonce
/// and sequencing correctness is the implementation's responsibility; callers
/// issue submissions as independent requests and do not serialize them.
#[async_trait::async_trait]
pub trait WalletCapability: Send + Sync {
    /// Returns the network this wallet is connected to.
    fn network(&self) -> NetworkId;

    /// Submits a transaction and returns its hash.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError`] if signing or submission fails.
    async fn send_transaction(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
    ) -> Result<TxHash, WalletError>;

    /// Waits until the transaction is mined and returns its receipt.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::ReceiptTimeout`] if the implementation's wait
    /// bound elapses first, or [`WalletError::Provider`] on RPC failure.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransferReceipt, WalletError>;
}
