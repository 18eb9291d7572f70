// JSON-RPC transport layer implementation
// This file implements the EVM JSON-RPC client used to fetch pending
// nonces and gas prices for bundle sequencing
//
// Numan Thabit 2025 Nov

use crate::errors::RpcError;
use crate::metrics::{REQ_ERRORS, REQ_LATENCY};
use alloy_primitives::U256;
use async_trait::async_trait;
use backoff::{future::retry, ExponentialBackoff};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;
use url::Url;

/// Source of account nonces and gas prices for EVM chains.
#[async_trait]
pub trait NonceSource: Send + Sync + Debug {
    /// Next nonce for `address`, counting pending transactions.
    async fn pending_nonce(&self, chain: &str, address: &str) -> Result<u64, RpcError>;

    async fn gas_price(&self, chain: &str) -> Result<U256, RpcError>;
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC clients keyed by lowercase chain name.
#[derive(Debug, Clone)]
pub struct EvmRpc {
    http: Client,
    urls: HashMap<String, Url>,
}

impl EvmRpc {
    pub fn new(urls: HashMap<String, Url>, timeout: Duration) -> Result<Self, RpcError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            urls: urls
                .into_iter()
                .map(|(chain, url)| (chain.to_lowercase(), url))
                .collect(),
        })
    }

    pub fn endpoint(&self, chain: &str) -> Option<&Url> {
        self.urls.get(&chain.to_lowercase())
    }

    pub fn chains(&self) -> impl Iterator<Item = &str> {
        self.urls.keys().map(String::as_str)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        chain: &str,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<T, RpcError> {
        let url = self
            .endpoint(chain)
            .ok_or_else(|| RpcError::UnconfiguredChain(chain.to_string()))?;
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let backoff = ExponentialBackoff {
            initial_interval: Duration::from_millis(100),
            max_interval: Duration::from_secs(1),
            max_elapsed_time: Some(Duration::from_secs(3)),
            multiplier: 2.0,
            ..Default::default()
        };

        let http = &self.http;
        let payload = &payload;
        let _timer = REQ_LATENCY.with_label_values(&["evm_rpc", method]).start_timer();
        let result = retry(backoff, || async move {
            let resp = http
                .post(url.clone())
                .json(payload)
                .send()
                .await
                .map_err(|e| backoff::Error::transient(RpcError::Transport(e)))?;
            let status = resp.status();
            if status.is_server_error() {
                return Err(backoff::Error::transient(RpcError::Status(status.as_u16())));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(RpcError::Status(status.as_u16())));
            }
            resp.json::<RpcResponse<T>>()
                .await
                .map_err(|e| backoff::Error::permanent(RpcError::Transport(e)))
        })
        .await;

        let body = result.map_err(|e| {
            REQ_ERRORS.with_label_values(&["evm_rpc", method]).inc();
            e
        })?;
        if let Some(err) = body.error {
            REQ_ERRORS.with_label_values(&["evm_rpc", method]).inc();
            return Err(RpcError::Node {
                code: err.code,
                message: err.message,
            });
        }
        body.result.ok_or_else(|| RpcError::Node {
            code: 0,
            message: format!("{method} returned no result"),
        })
    }
}

/// Parses a `0x`-prefixed hex quantity.
pub fn parse_quantity(raw: &str) -> Result<U256, RpcError> {
    let digits = raw
        .strip_prefix("0x")
        .filter(|d| !d.is_empty() && d.len() <= 64)
        .ok_or_else(|| RpcError::InvalidQuantity(raw.to_string()))?;
    U256::from_str_radix(digits, 16).map_err(|_| RpcError::InvalidQuantity(raw.to_string()))
}

#[async_trait]
impl NonceSource for EvmRpc {
    async fn pending_nonce(&self, chain: &str, address: &str) -> Result<u64, RpcError> {
        let raw: String = self
            .call(chain, "eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        let nonce = parse_quantity(&raw)?;
        u64::try_from(nonce).map_err(|_| RpcError::InvalidQuantity(raw))
    }

    async fn gas_price(&self, chain: &str) -> Result<U256, RpcError> {
        let raw: String = self.call(chain, "eth_gasPrice", json!([])).await?;
        parse_quantity(&raw)
    }
}
