//! Single-signer EVM wallet over an HTTP JSON-RPC endpoint.

use std::fmt;
use std::time::Duration;

use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy_provider::{Identity, Provider, ProviderBuilder, RootProvider};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use ax402::{NetworkId, TransferReceipt, WalletCapability, WalletError};
use url::Url;

/// Base Mainnet chain ID.
pub const BASE_MAINNET_CHAIN_ID: u64 = 8453;

/// Base Sepolia (testnet) chain ID.
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

/// How often the receipt wait polls the RPC endpoint.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Concrete provider type from `ProviderBuilder::new().wallet(...).connect_http(...)`.
type WalletProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider,
>;

/// Maps a numeric EIP-155 chain ID to the network identifier the payment
/// flow gates on.
///
/// Unknown chains map to `eip155-{id}`, which is representable but outside
/// the payment allow-list.
#[must_use]
pub fn network_for_chain_id(chain_id: u64) -> NetworkId {
    match chain_id {
        BASE_MAINNET_CHAIN_ID => NetworkId::base_mainnet(),
        BASE_SEPOLIA_CHAIN_ID => NetworkId::base_sepolia(),
        other => NetworkId::new(format!("eip155-{other}")),
    }
}

/// A [`WalletCapability`] backed by a single alloy signer.
///
/// Gas, nonce, and chain-id filling are handled by alloy's provider fillers,
/// so concurrent payment flows can share one wallet without coordinating
/// submissions themselves.
pub struct EvmWallet {
    network: NetworkId,
    provider: WalletProvider,
    receipt_timeout: Duration,
}

impl EvmWallet {
    /// Connects to an RPC endpoint serving the configured network.
    ///
    /// The chain's reported ID is cross-checked against `network`: a Sepolia
    /// RPC configured as `base-mainnet` (or vice versa) is refused instead of
    /// silently operating on whatever chain the endpoint happens to serve.
    ///
    /// `receipt_timeout` bounds every [`wait_for_receipt`] call; a chain that
    /// stops producing receipts fails the payment flow instead of suspending
    /// it indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidKey`] if the private key does not parse,
    /// [`WalletError::Provider`] if the chain ID query fails, or
    /// [`WalletError::NetworkMismatch`] if the chain's reported ID does not
    /// map to `network`.
    ///
    /// [`wait_for_receipt`]: WalletCapability::wait_for_receipt
    pub async fn connect(
        private_key: &str,
        network: NetworkId,
        rpc_url: Url,
        receipt_timeout: Duration,
    ) -> Result<Self, WalletError> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|err| WalletError::InvalidKey(format!("{err}")))?;
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(rpc_url);
        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|err| WalletError::Provider(err.to_string()))?;
        let actual = network_for_chain_id(chain_id);
        if actual != network {
            return Err(WalletError::NetworkMismatch {
                expected: network,
                actual,
            });
        }
        #[cfg(feature = "telemetry")]
        tracing::info!(%network, chain_id, "Connected EVM wallet");
        Ok(Self {
            network,
            provider,
            receipt_timeout,
        })
    }

    async fn poll_receipt(&self, tx_hash: TxHash) -> Result<TransferReceipt, WalletError> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|err| WalletError::Provider(err.to_string()))?;
            if let Some(receipt) = receipt {
                #[cfg(feature = "telemetry")]
                tracing::debug!(%tx_hash, status = receipt.status(), "Transaction receipt observed");
                return Ok(TransferReceipt {
                    transaction_hash: receipt.transaction_hash,
                    confirmed: receipt.status(),
                });
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
    }
}

impl fmt::Debug for EvmWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvmWallet")
            .field("network", &self.network)
            .field("receipt_timeout", &self.receipt_timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl WalletCapability for EvmWallet {
    fn network(&self) -> NetworkId {
        self.network.clone()
    }

    async fn send_transaction(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
    ) -> Result<TxHash, WalletError> {
        let request = TransactionRequest::default()
            .with_to(to)
            .with_value(value)
            .with_input(data);
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|err| WalletError::Submit(err.to_string()))?;
        let tx_hash = *pending.tx_hash();
        #[cfg(feature = "telemetry")]
        tracing::info!(%tx_hash, %to, "Submitted transaction");
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<TransferReceipt, WalletError> {
        match tokio::time::timeout(self.receipt_timeout, self.poll_receipt(tx_hash)).await {
            Ok(result) => result,
            Err(_) => Err(WalletError::ReceiptTimeout {
                tx_hash,
                waited_secs: self.receipt_timeout.as_secs(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    use super::*;

    const TEST_KEY: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";

    /// Answers every JSON-RPC call as `eth_chainId` for a fixed chain.
    struct ChainIdResponder(u64);

    impl Respond for ChainIdResponder {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: serde_json::Value =
                serde_json::from_slice(&request.body).unwrap_or_default();
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": body.get("id").cloned().unwrap_or(serde_json::json!(1)),
                "result": format!("0x{:x}", self.0),
            }))
        }
    }

    async fn rpc_for_chain(chain_id: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ChainIdResponder(chain_id))
            .mount(&server)
            .await;
        server
    }

    fn rpc_url(server: &MockServer) -> Url {
        server.uri().parse().unwrap()
    }

    #[tokio::test]
    async fn test_connect_accepts_matching_chain() {
        let server = rpc_for_chain(BASE_SEPOLIA_CHAIN_ID).await;
        let wallet = EvmWallet::connect(
            TEST_KEY,
            NetworkId::base_sepolia(),
            rpc_url(&server),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
        assert_eq!(wallet.network(), NetworkId::base_sepolia());
    }

    #[tokio::test]
    async fn test_connect_refuses_mismatched_chain() {
        let server = rpc_for_chain(BASE_SEPOLIA_CHAIN_ID).await;
        let err = EvmWallet::connect(
            TEST_KEY,
            NetworkId::base_mainnet(),
            rpc_url(&server),
            Duration::from_secs(1),
        )
        .await
        .unwrap_err();
        match err {
            WalletError::NetworkMismatch { expected, actual } => {
                assert_eq!(expected, NetworkId::base_mainnet());
                assert_eq!(actual, NetworkId::base_sepolia());
            }
            other => panic!("expected NetworkMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_known_chain_ids_map_to_supported_networks() {
        assert_eq!(
            network_for_chain_id(BASE_MAINNET_CHAIN_ID),
            NetworkId::base_mainnet()
        );
        assert_eq!(
            network_for_chain_id(BASE_SEPOLIA_CHAIN_ID),
            NetworkId::base_sepolia()
        );
    }

    #[test]
    fn test_unknown_chain_id_is_representable_but_unsupported() {
        let network = network_for_chain_id(1);
        assert_eq!(network.as_str(), "eip155-1");
        assert!(!ax402::networks::is_supported(&network));
    }
}
