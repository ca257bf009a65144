#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for agent-side [x402](https://www.x402.org) pay-per-request flows.
//!
//! The x402 convention uses the HTTP `402 Payment Required` status code to signal
//! that a resource must be paid for in a stablecoin before it is served. This crate
//! provides the building blocks consumed by the retry handler in `ax402-http`:
//! the request specification, the payment instructions parsed from a 402 body,
//! the payment proof attached to the retried request, the hand-rolled ERC-20
//! transfer encoding, and the narrow wallet capability the flow depends on.
//!
//! Everything here is invocation-scoped: a request spec is attempted at most
//! twice (once unauthenticated, once with proof), and no state survives an
//! invocation. Wallet implementations live in separate crates (`ax402-evm`).
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration with hardcoded fallbacks
//! - [`encoding`] - Byte-level ERC-20 `transfer(address,uint256)` call encoding
//! - [`error`] - Protocol error taxonomy
//! - [`networks`] - Supported network identifiers and default token contracts
//! - [`proto`] - Payment instructions and payment proof wire types
//! - [`request`] - The outbound request specification
//! - [`wallet`] - The wallet capability trait

pub mod config;
pub mod encoding;
pub mod error;
pub mod networks;
pub mod proto;
pub mod request;
pub mod wallet;

pub use config::PayConfig;
pub use error::ProtocolError;
pub use networks::NetworkId;
pub use proto::{PAYMENT_PROOF_HEADER, PaymentInstructions, PaymentProof};
pub use request::{HttpMethod, PaymentRequestSpec};
pub use wallet::{TransferReceipt, WalletCapability, WalletError};
