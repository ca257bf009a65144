//! Failure classes of the pay-and-retry flow.
//!
//! The taxonomy matters to the caller because it distinguishes "no funds
//! moved" (protocol, transport, wallet submission) from "funds moved but the
//! resource is still inaccessible" — the latter is reported through the
//! result text rather than this enum, since a confirmed transfer is final.

use alloy_primitives::TxHash;
use ax402::{ProtocolError, WalletError};

/// Errors raised between payment-instruction parsing and the retried request.
#[derive(Debug, thiserror::Error)]
pub enum PaymentFlowError {
    /// Protocol precondition failed; no transaction was attempted.
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    /// Wallet or chain-level failure during submit or confirmation; funds
    /// status is uncertain but no receipt confirmed a transfer.
    #[error("{0}")]
    Wallet(#[from] WalletError),

    /// HTTP transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The transfer transaction was mined but reverted.
    #[error("transaction {tx_hash} was mined but reverted; no payment was credited")]
    Unconfirmed {
        /// Hash of the reverted transaction.
        tx_hash: TxHash,
    },

    /// A caller-supplied header name or value was not valid HTTP.
    #[error("invalid request header `{0}`")]
    InvalidHeader(String),

    /// The payment proof could not be serialized into a header value.
    #[error("could not encode payment proof: {0}")]
    Proof(#[from] serde_json::Error),
}
