//! Explicitly constructed invocation context for agent actions.

use std::sync::Arc;

use ax402::{PayConfig, WalletCapability};
use ax402_http::PaymentRetryHandler;

/// Everything an action needs for one agent session.
///
/// Constructed once from configuration and a wallet, then passed by reference
/// into every action dispatch. Sessions share nothing with each other; the
/// wallet is the only resource an action can observe across invocations.
#[allow(missing_debug_implementations)] // dyn WalletCapability does not implement Debug
pub struct Session {
    wallet: Arc<dyn WalletCapability>,
    handler: PaymentRetryHandler,
    config: PayConfig,
}

impl Session {
    /// Creates a session from configuration and a wallet capability.
    #[must_use]
    pub fn new(config: PayConfig, wallet: Arc<dyn WalletCapability>) -> Self {
        let handler = PaymentRetryHandler::new(&config);
        Self {
            wallet,
            handler,
            config,
        }
    }

    /// The session's wallet.
    #[must_use]
    pub fn wallet(&self) -> &dyn WalletCapability {
        self.wallet.as_ref()
    }

    /// The session's payment-retry handler.
    #[must_use]
    pub const fn handler(&self) -> &PaymentRetryHandler {
        &self.handler
    }

    /// The configuration the session was built from.
    #[must_use]
    pub const fn config(&self) -> &PayConfig {
        &self.config
    }
}
