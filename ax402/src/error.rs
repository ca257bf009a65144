//! Protocol error taxonomy.
//!
//! Every variant that can occur before a transaction is submitted fails
//! closed: an unsupported network or an unparsable 402 body terminates the
//! flow with no onchain effect.

use crate::networks::NetworkId;

/// Errors in the x402 payment protocol itself, as opposed to transport or
/// wallet failures.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The wallet is on a network outside the payment allow-list.
    ///
    /// Hard precondition, not a retry trigger: no transaction is attempted.
    #[error("network `{0}` is not supported for x402 payments (supported: base-mainnet, base-sepolia)")]
    UnsupportedNetwork(NetworkId),

    /// The 402 response body was missing required fields or was not JSON.
    #[error("malformed payment instructions: {0}")]
    MalformedInstructions(#[source] serde_json::Error),

    /// The instructed amount was not a base-10 integer within 256 bits.
    #[error("invalid payment amount `{amount}`: {reason}")]
    InvalidAmount {
        /// The amount string as received.
        amount: String,
        /// Why it could not be parsed.
        reason: String,
    },

    /// No default token contract is known for the network.
    #[error("no default token contract for network `{0}`")]
    NoDefaultToken(NetworkId),
}
