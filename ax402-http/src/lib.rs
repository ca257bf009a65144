#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! The x402 payment-retry handler.
//!
//! [`PaymentRetryHandler`] turns one outbound HTTP call that may require
//! payment into a deterministic two-step protocol: probe the resource, and if
//! (and only if) the response is `402 Payment Required`, pay onchain and retry
//! the original request exactly once with a payment proof header. Every branch
//! returns a human-readable result string; the consumer is a language-model
//! agent, not a program.
//!
//! The money path is deliberately narrow: all onchain effects are gated
//! behind the explicit 402 status check plus an explicit network allow-list,
//! because the 402 code is overloaded by many unrelated servers.
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation

mod error;
mod handler;

pub use error::PaymentFlowError;
pub use handler::PaymentRetryHandler;
