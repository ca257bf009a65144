//! Environment-driven configuration with hardcoded fallbacks.
//!
//! Configuration is read once, explicitly, at session construction; nothing
//! here is cached in module state. A `.env` file is honored when present.

use url::Url;

use crate::networks::NetworkId;

/// Facilitator used when neither the server's instructions nor the
/// environment name one.
pub const DEFAULT_FACILITATOR_URL: &str = "https://x402.org/facilitator";

/// Environment variable overriding the default facilitator URL.
pub const ENV_FACILITATOR_URL: &str = "X402_FACILITATOR_URL";

/// Environment variable holding the wallet signing key.
pub const ENV_PRIVATE_KEY: &str = "WALLET_PRIVATE_KEY";

/// Environment variable holding the JSON-RPC endpoint URL.
pub const ENV_RPC_URL: &str = "RPC_URL";

/// Environment variable selecting the network identifier.
pub const ENV_NETWORK_ID: &str = "NETWORK_ID";

/// Errors reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A URL-valued variable did not parse.
    #[error("invalid URL in `{var}`: {source}")]
    InvalidUrl {
        /// Name of the offending variable.
        var: &'static str,
        /// The underlying parse error.
        source: url::ParseError,
    },
}

/// Configuration for the payment flow.
#[derive(Debug, Clone)]
pub struct PayConfig {
    /// Default facilitator used when a 402 response names none.
    pub facilitator: Url,

    /// Network the session's wallet should operate on.
    pub network: NetworkId,

    /// JSON-RPC endpoint for the wallet provider, when configured.
    pub rpc_url: Option<Url>,

    /// Wallet signing key, when configured.
    pub private_key: Option<String>,
}

impl PayConfig {
    /// Reads configuration from the process environment, honoring `.env`.
    ///
    /// Missing variables fall back to defaults: the facilitator falls back to
    /// [`DEFAULT_FACILITATOR_URL`] and the network to `base-sepolia`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if a URL-valued variable is set
    /// but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let facilitator = match lookup(ENV_FACILITATOR_URL) {
            Some(raw) => Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
                var: ENV_FACILITATOR_URL,
                source,
            })?,
            None => Self::default_facilitator(),
        };
        let rpc_url = lookup(ENV_RPC_URL)
            .map(|raw| {
                Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
                    var: ENV_RPC_URL,
                    source,
                })
            })
            .transpose()?;
        let network = lookup(ENV_NETWORK_ID)
            .map_or_else(NetworkId::base_sepolia, NetworkId::new);
        Ok(Self {
            facilitator,
            network,
            rpc_url,
            private_key: lookup(ENV_PRIVATE_KEY),
        })
    }

    /// The hardcoded facilitator fallback as a parsed URL.
    #[must_use]
    pub fn default_facilitator() -> Url {
        Url::parse(DEFAULT_FACILITATOR_URL).expect("default facilitator URL is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = PayConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.facilitator.as_str(), DEFAULT_FACILITATOR_URL);
        assert_eq!(config.network, NetworkId::base_sepolia());
        assert!(config.rpc_url.is_none());
        assert!(config.private_key.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = PayConfig::from_lookup(lookup_from(&[
            (ENV_FACILITATOR_URL, "https://pay.example.com/verify"),
            (ENV_NETWORK_ID, "base-mainnet"),
            (ENV_RPC_URL, "https://mainnet.base.org"),
            (ENV_PRIVATE_KEY, "0xdeadbeef"),
        ]))
        .unwrap();
        assert_eq!(config.facilitator.as_str(), "https://pay.example.com/verify");
        assert_eq!(config.network, NetworkId::base_mainnet());
        assert_eq!(config.rpc_url.unwrap().as_str(), "https://mainnet.base.org/");
        assert_eq!(config.private_key.as_deref(), Some("0xdeadbeef"));
    }

    #[test]
    fn test_invalid_facilitator_url_rejected() {
        let result = PayConfig::from_lookup(lookup_from(&[(ENV_FACILITATOR_URL, "not a url")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidUrl {
                var: ENV_FACILITATOR_URL,
                ..
            })
        ));
    }
}
