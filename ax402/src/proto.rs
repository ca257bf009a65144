//! Wire types for the x402 payment-required exchange.
//!
//! Two shapes cross the trust boundary: [`PaymentInstructions`], parsed from a
//! server's 402 response body, and [`PaymentProof`], attached as a header on
//! the retried request. Instructions come from a remote server and feed a
//! value-transfer operation, so they are treated as untrusted input: parsing
//! is permissive about extra fields but fails closed when `amount` or
//! `recipient` is missing.

use alloy_primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ProtocolError;

/// Request header carrying the JSON-encoded [`PaymentProof`] on the retried request.
pub const PAYMENT_PROOF_HEADER: &str = "X-402-Payment-Proof";

/// Payment instructions parsed from a 402 response body.
///
/// Server-defined contract: a JSON object with at minimum `amount` (a base-10
/// integer string in the token's smallest unit) and `recipient` (a hex
/// address), optionally `token` (the contract to pay through) and
/// `facilitator` (a settlement service URL). Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentInstructions {
    /// Amount to transfer, as a base-10 integer string.
    pub amount: String,

    /// Address the payment is credited to.
    pub recipient: Address,

    /// Token contract to transfer through. Falls back to the network's
    /// default stablecoin when absent.
    #[serde(default)]
    pub token: Option<Address>,

    /// Facilitator that can verify the payment. Falls back to the configured
    /// facilitator when absent.
    #[serde(default)]
    pub facilitator: Option<Url>,
}

impl PaymentInstructions {
    /// Parses payment instructions from a 402 response body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MalformedInstructions`] if the body is not a
    /// JSON object with the required `amount` and `recipient` fields. The
    /// caller must not attempt a transaction in that case.
    pub fn from_json(body: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(body).map_err(ProtocolError::MalformedInstructions)
    }
}

/// Proof of a confirmed onchain payment, sent with the retried request.
///
/// Only constructed after the transfer transaction has a confirmed receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProof {
    /// Hash of the confirmed transfer transaction.
    pub transaction_hash: TxHash,

    /// Facilitator the server can use to verify the transfer.
    pub facilitator: Url,
}

impl PaymentProof {
    /// Serializes the proof into the value of [`PAYMENT_PROOF_HEADER`].
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn header_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    #[test]
    fn test_instructions_minimal_body() {
        let parsed = PaymentInstructions::from_json(
            r#"{"amount":"1000000","recipient":"0x036CbD53842c5426634e7929541eC2318f3dCF7e"}"#,
        )
        .unwrap();
        assert_eq!(parsed.amount, "1000000");
        assert_eq!(
            parsed.recipient,
            address!("036CbD53842c5426634e7929541eC2318f3dCF7e")
        );
        assert!(parsed.token.is_none());
        assert!(parsed.facilitator.is_none());
    }

    #[test]
    fn test_instructions_ignore_unknown_fields() {
        let parsed = PaymentInstructions::from_json(
            r#"{"amount":"5","recipient":"0x036CbD53842c5426634e7929541eC2318f3dCF7e","memo":"hi","expires":9}"#,
        )
        .unwrap();
        assert_eq!(parsed.amount, "5");
    }

    #[test]
    fn test_instructions_missing_required_fields() {
        assert!(PaymentInstructions::from_json(r#"{"amount":"5"}"#).is_err());
        assert!(
            PaymentInstructions::from_json(
                r#"{"recipient":"0x036CbD53842c5426634e7929541eC2318f3dCF7e"}"#
            )
            .is_err()
        );
        assert!(PaymentInstructions::from_json("not json").is_err());
    }

    #[test]
    fn test_proof_header_value_shape() {
        let proof = PaymentProof {
            transaction_hash: b256!(
                "1111111111111111111111111111111111111111111111111111111111111111"
            ),
            facilitator: Url::parse("https://x402.org/facilitator").unwrap(),
        };
        let value = proof.header_value().unwrap();
        assert_eq!(
            value,
            "{\"transactionHash\":\"0x1111111111111111111111111111111111111111111111111111111111111111\",\"facilitator\":\"https://x402.org/facilitator\"}"
        );
    }
}
