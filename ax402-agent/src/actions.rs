//! Built-in agent actions.

use ax402::PaymentRequestSpec;
use serde_json::Value;

use crate::registry::{ActionDef, ActionRegistry, BoxFuture};
use crate::session::Session;

/// The `http_request` action: fetch a URL, paying for it if the server
/// answers `402 Payment Required` on a supported network.
///
/// Arguments deserialize into [`PaymentRequestSpec`]; invalid arguments (a
/// relative URL, an unknown method) produce an explanatory string rather than
/// an error, because the caller is a language model.
#[must_use]
pub fn http_request() -> ActionDef {
    ActionDef {
        name: "http_request",
        description: "Make an HTTP request, automatically paying for the resource if the server requires an x402 payment.",
        schema: serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "Absolute URL of the resource",
                },
                "method": {
                    "type": "string",
                    "enum": ["GET", "POST", "PUT", "DELETE"],
                    "default": "GET",
                },
                "body": {
                    "type": "string",
                    "description": "Request body, sent as-is",
                },
                "headers": {
                    "type": "object",
                    "additionalProperties": { "type": "string" },
                },
            },
            "required": ["url"],
        }),
        handler: Box::new(run_http_request),
    }
}

fn run_http_request(session: &Session, args: Value) -> BoxFuture<'_, String> {
    Box::pin(async move {
        let spec: PaymentRequestSpec = match serde_json::from_value(args) {
            Ok(spec) => spec,
            Err(err) => return format!("Invalid http_request arguments: {err}"),
        };
        session.handler().execute(&spec, session.wallet()).await
    })
}

/// Returns a registry with all built-in actions registered.
#[must_use]
pub fn builtin_registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(http_request());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes, TxHash, U256, b256};
    use ax402::{NetworkId, PayConfig, TransferReceipt, WalletCapability, WalletError};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StubWallet(NetworkId);

    #[async_trait::async_trait]
    impl WalletCapability for StubWallet {
        fn network(&self) -> NetworkId {
            self.0.clone()
        }

        async fn send_transaction(
            &self,
            _to: Address,
            _value: U256,
            _data: Bytes,
        ) -> Result<TxHash, WalletError> {
            Ok(b256!(
                "2222222222222222222222222222222222222222222222222222222222222222"
            ))
        }

        async fn wait_for_receipt(
            &self,
            tx_hash: TxHash,
        ) -> Result<TransferReceipt, WalletError> {
            Ok(TransferReceipt {
                transaction_hash: tx_hash,
                confirmed: true,
            })
        }
    }

    fn test_session() -> Session {
        let config = PayConfig {
            facilitator: PayConfig::default_facilitator(),
            network: NetworkId::base_sepolia(),
            rpc_url: None,
            private_key: None,
        };
        Session::new(config, Arc::new(StubWallet(NetworkId::base_sepolia())))
    }

    #[tokio::test]
    async fn test_unknown_action_lists_available() {
        let registry = builtin_registry();
        let result = registry
            .dispatch(&test_session(), "transfer_funds", serde_json::json!({}))
            .await;
        assert!(result.contains("Unknown action `transfer_funds`"), "{result}");
        assert!(result.contains("http_request"), "{result}");
    }

    #[tokio::test]
    async fn test_invalid_arguments_reported_without_request() {
        let registry = builtin_registry();
        let result = registry
            .dispatch(
                &test_session(),
                "http_request",
                serde_json::json!({ "url": "/relative" }),
            )
            .await;
        assert!(result.starts_with("Invalid http_request arguments:"), "{result}");

        let result = registry
            .dispatch(&test_session(), "http_request", serde_json::json!({}))
            .await;
        assert!(result.contains("url"), "{result}");
    }

    #[tokio::test]
    async fn test_http_request_action_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/free"))
            .respond_with(ResponseTemplate::new(200).set_body_string("no payment needed"))
            .expect(1)
            .mount(&server)
            .await;

        let registry = builtin_registry();
        let result = registry
            .dispatch(
                &test_session(),
                "http_request",
                serde_json::json!({ "url": format!("{}/free", server.uri()) }),
            )
            .await;
        assert_eq!(result, "Request succeeded: no payment needed");
    }

    #[test]
    fn test_schema_declares_url_required() {
        let action = http_request();
        assert_eq!(action.schema["required"][0], "url");
        assert_eq!(action.schema["properties"]["method"]["default"], "GET");
    }

    #[test]
    fn test_registry_names_sorted() {
        let registry = builtin_registry();
        assert_eq!(registry.names(), vec!["http_request"]);
        assert_eq!(registry.definitions().count(), 1);
    }
}
