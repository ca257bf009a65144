//! Supported network identifiers and their default token deployments.
//!
//! Payments are gated behind an explicit allow-list: exactly two networks are
//! supported, each with one default USDC contract. A 402 response received on
//! any other network terminates the flow before a transaction is attempted.

use std::fmt;

use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};

/// Identifier of the Base mainnet network.
pub const BASE_MAINNET: &str = "base-mainnet";

/// Identifier of the Base Sepolia (testnet) network.
pub const BASE_SEPOLIA: &str = "base-sepolia";

/// USDC contract address on Base Mainnet.
pub const USDC_BASE: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

/// USDC contract address on Base Sepolia.
pub const USDC_BASE_SEPOLIA: Address = address!("036CbD53842c5426634e7929541eC2318f3dCF7e");

/// An opaque network identifier reported by a wallet capability.
///
/// Values like `base-mainnet` or `base-sepolia` are meaningful to the payment
/// flow; anything else is representable but unsupported, which makes the
/// allow-list check in the handler explicit rather than implicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(String);

impl NetworkId {
    /// Creates a network identifier from an arbitrary string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The Base mainnet identifier.
    #[must_use]
    pub fn base_mainnet() -> Self {
        Self(BASE_MAINNET.to_owned())
    }

    /// The Base Sepolia identifier.
    #[must_use]
    pub fn base_sepolia() -> Self {
        Self(BASE_SEPOLIA.to_owned())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NetworkId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Returns whether payments are enabled on the given network.
#[must_use]
pub fn is_supported(network: &NetworkId) -> bool {
    matches!(network.as_str(), BASE_MAINNET | BASE_SEPOLIA)
}

/// Returns the default stablecoin contract for a supported network.
///
/// Used when a 402 response does not name a token contract explicitly.
/// Returns `None` for unsupported networks.
#[must_use]
pub fn default_token(network: &NetworkId) -> Option<Address> {
    match network.as_str() {
        BASE_MAINNET => Some(USDC_BASE),
        BASE_SEPOLIA => Some(USDC_BASE_SEPOLIA),
        _ => None,
    }
}
