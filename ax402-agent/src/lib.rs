#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Explicit action registry and session context for LLM agents.
//!
//! An agent toolkit needs a way to expose callable actions to a language
//! model. This crate does that with plain data instead of runtime reflection:
//! an [`ActionRegistry`] maps action names to handlers paired with declared
//! JSON input schemas, and a [`Session`] is an explicitly constructed context
//! object holding the wallet and the payment handler. There is no hidden
//! first-call initialization and no process-wide mutable state; build a
//! session, pass it around, drop it.
//!
//! The built-in [`http_request`](actions::http_request) action wraps the
//! pay-per-request flow from `ax402-http` and returns human-readable result
//! text suitable for feeding back to a model.
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation

pub mod actions;
mod registry;
mod session;

pub use registry::{ActionDef, ActionHandler, ActionRegistry, BoxFuture};
pub use session::Session;
