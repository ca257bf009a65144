//! The probe → detect → pay → retry sequence.

use alloy_primitives::U256;
use ax402::{
    HttpMethod, NetworkId, PAYMENT_PROOF_HEADER, PayConfig, PaymentInstructions, PaymentProof,
    PaymentRequestSpec, ProtocolError, WalletCapability, encoding, networks,
};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use url::Url;

use crate::error::PaymentFlowError;

/// Executes the x402 request → detect → pay → retry sequence.
///
/// The handler holds no per-invocation state: a single instance can run many
/// flows concurrently against different targets. The wallet passed to
/// [`execute`](Self::execute) is the one shared resource; nonce sequencing
/// under concurrency is the wallet's responsibility.
#[derive(Debug, Clone)]
pub struct PaymentRetryHandler {
    http: reqwest::Client,
    facilitator: Url,
}

impl PaymentRetryHandler {
    /// Creates a handler from configuration, with a fresh HTTP client.
    #[must_use]
    pub fn new(config: &PayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config.facilitator.clone())
    }

    /// Creates a handler with an explicit HTTP client and default facilitator.
    #[must_use]
    pub const fn with_client(http: reqwest::Client, facilitator: Url) -> Self {
        Self { http, facilitator }
    }

    /// Runs one pay-per-request flow and describes the outcome as text.
    ///
    /// The request is attempted at most twice: once unauthenticated and, if
    /// the server answered `402 Payment Required` on a supported network,
    /// once more with an `X-402-Payment-Proof` header after the transfer
    /// transaction is confirmed. A non-402 response never touches the wallet.
    /// Every branch, including every failure, is reported as a result string
    /// that says which side effects occurred.
    pub async fn execute(&self, spec: &PaymentRequestSpec, wallet: &dyn WalletCapability) -> String {
        let first = match self.send(spec, None).await {
            Ok(response) => response,
            Err(err) => return format!("Request to {} failed: {err}", spec.url),
        };

        let status = first.status();
        if status != StatusCode::PAYMENT_REQUIRED {
            let body = read_body(first).await;
            if status.is_success() {
                return format!("Request succeeded: {body}");
            }
            return format!("Request failed with status {status}: {body}");
        }

        #[cfg(feature = "telemetry")]
        tracing::info!(url = %spec.url, "Received 402 Payment Required");

        let body = read_body(first).await;
        let instructions = match PaymentInstructions::from_json(&body) {
            Ok(instructions) => instructions,
            Err(err) => {
                return format!(
                    "Received 402 Payment Required but the payment instructions could not be parsed: {err}"
                );
            }
        };

        // Hard precondition: all onchain effects are gated behind the
        // network allow-list. Unsupported networks fail closed here.
        let network = wallet.network();
        if !networks::is_supported(&network) {
            return format!(
                "Cannot pay for this resource: {}",
                ProtocolError::UnsupportedNetwork(network)
            );
        }

        match self.pay_and_retry(spec, wallet, &network, &instructions).await {
            Ok(text) => text,
            Err(err) => format!("Payment failed: {err}"),
        }
    }

    /// Pays the instructed amount and reissues the original request once.
    async fn pay_and_retry(
        &self,
        spec: &PaymentRequestSpec,
        wallet: &dyn WalletCapability,
        network: &NetworkId,
        instructions: &PaymentInstructions,
    ) -> Result<String, PaymentFlowError> {
        let token = match instructions.token {
            Some(token) => token,
            None => networks::default_token(network)
                .ok_or_else(|| ProtocolError::NoDefaultToken(network.clone()))?,
        };
        let amount = encoding::parse_amount(&instructions.amount)?;
        let data = encoding::encode_transfer(instructions.recipient, amount);

        // The zero-value transaction goes to the token contract; the
        // recipient is embedded in the call data per ERC-20 semantics.
        let tx_hash = wallet.send_transaction(token, U256::ZERO, data).await?;

        #[cfg(feature = "telemetry")]
        tracing::info!(%tx_hash, %token, "Payment submitted, waiting for confirmation");

        let receipt = wallet.wait_for_receipt(tx_hash).await?;
        if !receipt.confirmed {
            return Err(PaymentFlowError::Unconfirmed {
                tx_hash: receipt.transaction_hash,
            });
        }

        let facilitator = instructions
            .facilitator
            .clone()
            .unwrap_or_else(|| self.facilitator.clone());
        let proof = PaymentProof {
            transaction_hash: receipt.transaction_hash,
            facilitator,
        };
        let header = proof.header_value()?;

        let retry = self.send(spec, Some(&header)).await?;
        let status = retry.status();
        let body = read_body(retry).await;
        let tx_hash = proof.transaction_hash;
        if status.is_success() {
            Ok(format!("Payment sent (tx {tx_hash}). Request succeeded: {body}"))
        } else {
            Ok(format!(
                "Payment sent (tx {tx_hash}) but the resource request failed with status {status}: {body}"
            ))
        }
    }

    /// Issues the request exactly as specified, with the JSON content-type
    /// default merged under caller headers.
    async fn send(
        &self,
        spec: &PaymentRequestSpec,
        proof: Option<&str>,
    ) -> Result<Response, PaymentFlowError> {
        let method = match spec.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(extra) = &spec.headers {
            for (name, value) in extra {
                let header_name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| PaymentFlowError::InvalidHeader(name.clone()))?;
                let header_value = HeaderValue::from_str(value)
                    .map_err(|_| PaymentFlowError::InvalidHeader(name.clone()))?;
                headers.insert(header_name, header_value);
            }
        }
        if let Some(proof) = proof {
            let value = HeaderValue::from_str(proof)
                .map_err(|_| PaymentFlowError::InvalidHeader(PAYMENT_PROOF_HEADER.to_owned()))?;
            headers.insert(
                HeaderName::from_bytes(PAYMENT_PROOF_HEADER.as_bytes())
                    .map_err(|_| PaymentFlowError::InvalidHeader(PAYMENT_PROOF_HEADER.to_owned()))?,
                value,
            );
        }

        let mut request = self
            .http
            .request(method, spec.url.clone())
            .headers(headers);
        if let Some(body) = &spec.body {
            request = request.body(body.clone());
        }
        Ok(request.send().await?)
    }
}

async fn read_body(response: Response) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(err) => format!("<failed to read response body: {err}>"),
    }
}
