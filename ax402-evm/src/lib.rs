#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Alloy-backed [`WalletCapability`] for EVM chains.
//!
//! Provides [`EvmWallet`], a single-signer wallet over an HTTP JSON-RPC
//! endpoint. Gas, nonce, and chain-id filling are delegated to alloy's
//! provider fillers; receipt waiting polls with an explicit, caller-supplied
//! timeout so a hung chain cannot suspend a payment flow forever.
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation
//!
//! [`WalletCapability`]: ax402::WalletCapability

mod wallet;

pub use wallet::{BASE_MAINNET_CHAIN_ID, BASE_SEPOLIA_CHAIN_ID, EvmWallet, network_for_chain_id};
