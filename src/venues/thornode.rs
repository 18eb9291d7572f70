// THORNode-style memo venue
// Shared implementation behind THORChain and Mayachain: asset naming,
// inbound-address status, quote retrieval and router deposit building,
// with sequential endpoint failover
//
// Numan Thabit 2025 Nov

use crate::approval;
use crate::chains::{self, ChainKind};
use crate::config::NodeConfig;
use crate::errors::ProviderError;
use crate::metrics::{REQ_ERRORS, REQ_LATENCY};
use crate::quant::{from_node_units, to_node_units};
use crate::types::{Asset, ProviderStatus, Quote, QuoteRequest, SwapRequest, SwapResult, TxData};
use crate::venues::contracts::IThorRouter;
use crate::venues::provider::{ProviderId, ProviderResult, SwapProvider};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Gas limit for a router `depositWithExpiry` call.
pub const DEPOSIT_GAS_LIMIT: u64 = 120_000;

/// Deposit deadline used when a quote carries no expiry.
const DEFAULT_DEPOSIT_WINDOW_SECS: u64 = 15 * 60;

const STREAMING_INTERVAL: &str = "3";
const STREAMING_QUANTITY: &str = "0";

/// Static description of one memo-based network.
#[derive(Debug, Clone, Copy)]
pub struct NodeProtocol {
    pub id: ProviderId,
    /// API path segment, `thorchain` or `mayachain`.
    pub path: &'static str,
    pub networks: &'static [(&'static str, &'static str)],
    /// Chain the network itself runs on; it has no inbound address record.
    pub home_chain: &'static str,
}

impl NodeProtocol {
    pub fn network(&self, chain: &str) -> Option<&'static str> {
        chains::network_code(self.networks, chain)
    }

    /// `NETWORK.SYMBOL` for native coins, `NETWORK.SYMBOL-ADDRESS` for tokens.
    pub fn asset_name(&self, asset: &Asset) -> ProviderResult<String> {
        let network = self
            .network(&asset.chain)
            .ok_or_else(|| ProviderError::UnsupportedChain(asset.chain.clone()))?;
        Ok(format_asset_name(network, asset))
    }
}

pub fn format_asset_name(network: &str, asset: &Asset) -> String {
    if asset.is_native() {
        format!("{}.{}", network, asset.symbol)
    } else {
        format!(
            "{}.{}-{}",
            network,
            asset.symbol,
            asset.address.to_uppercase()
        )
    }
}

/// Entry of `/{path}/inbound_addresses`.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundAddress {
    pub chain: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub router: Option<String>,
    #[serde(default)]
    pub halted: bool,
    #[serde(default)]
    pub global_trading_paused: bool,
    #[serde(default)]
    pub chain_trading_paused: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gas_rate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dust_threshold: Option<String>,
}

impl InboundAddress {
    pub fn is_tradable(&self) -> bool {
        !self.halted && !self.global_trading_paused && !self.chain_trading_paused
    }
}

/// Body of `/{path}/quote/swap`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub inbound_address: Option<String>,
    #[serde(default)]
    pub router: Option<String>,
    #[serde(default)]
    pub expiry: i64,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(deserialize_with = "lenient_required_string")]
    pub expected_amount_out: String,
    #[serde(default)]
    pub max_streaming_quantity: Option<u64>,
    #[serde(default)]
    pub streaming_swap_blocks: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommended_min_amount_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Accepts either a JSON string or number; nodes are not consistent.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_required_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_string(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("expected a string or number"))
}

/// Strict base-10 parse; rejects signs, hex prefixes and empty strings.
pub fn parse_decimal_amount(field: &'static str, value: &str) -> ProviderResult<U256> {
    let invalid = || ProviderError::InvalidAmount {
        field,
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    U256::from_str_radix(value, 10).map_err(|_| invalid())
}

/// HTTP client over an ordered endpoint list. Endpoints are tried one at a
/// time; the first success wins and the rest are never contacted.
#[derive(Debug, Clone)]
pub struct NodeClient {
    http: Client,
    endpoints: Vec<String>,
    path: &'static str,
    venue: &'static str,
}

impl NodeClient {
    pub fn new(protocol: &NodeProtocol, config: &NodeConfig) -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            http,
            endpoints: config
                .endpoints
                .iter()
                .map(|e| e.trim_end_matches('/').to_string())
                .collect(),
            path: protocol.path,
            venue: protocol.id.name(),
        })
    }

    pub async fn inbound_addresses(&self) -> ProviderResult<Vec<InboundAddress>> {
        self.fetch("inbound_addresses", "inbound_addresses", &[]).await
    }

    pub async fn quote_swap(&self, query: &[(&'static str, String)]) -> ProviderResult<QuoteResponse> {
        self.fetch("quote_swap", "quote/swap", query).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: &'static str,
        route: &str,
        query: &[(&'static str, String)],
    ) -> ProviderResult<T> {
        let mut attempts = Vec::with_capacity(self.endpoints.len());
        for endpoint in &self.endpoints {
            let _timer = REQ_LATENCY
                .with_label_values(&[self.venue, method])
                .start_timer();
            match self.fetch_once(endpoint, route, query).await {
                Ok(body) => return Ok(body),
                Err(err) => {
                    REQ_ERRORS.with_label_values(&[self.venue, method]).inc();
                    if !err.is_failover() {
                        return Err(err);
                    }
                    warn!(
                        venue = self.venue,
                        endpoint = %endpoint,
                        error = %err,
                        "node endpoint failed; trying next"
                    );
                    attempts.push(format!("{endpoint}: {err}"));
                }
            }
        }
        Err(ProviderError::EndpointsExhausted { attempts })
    }

    async fn fetch_once<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        route: &str,
        query: &[(&'static str, String)],
    ) -> ProviderResult<T> {
        let url = format!("{}/{}/{}", endpoint, self.path, route);
        let resp = self.http.get(&url).query(query).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_slice(&body).map_err(|e| ProviderError::Decode(format!("{url}: {e}")))
    }
}

/// Provider for a THORNode-compatible network.
#[derive(Debug, Clone)]
pub struct NodeVenue {
    protocol: NodeProtocol,
    priority: i32,
    client: NodeClient,
}

impl NodeVenue {
    pub fn new(protocol: NodeProtocol, config: &NodeConfig) -> ProviderResult<Self> {
        Ok(Self {
            client: NodeClient::new(&protocol, config)?,
            priority: protocol.id.default_priority(),
            protocol,
        })
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn status_from_records(&self, chain: &str, network: &str, records: &[InboundAddress]) -> ProviderStatus {
        if chain == self.protocol.home_chain {
            let paused = records.iter().any(|r| r.global_trading_paused);
            return ProviderStatus {
                chain: chain.to_string(),
                available: !paused,
                global_trading_paused: paused,
                ..ProviderStatus::default()
            };
        }

        match records.iter().find(|r| r.chain.eq_ignore_ascii_case(network)) {
            Some(record) => ProviderStatus {
                chain: chain.to_string(),
                available: record.is_tradable(),
                halted: record.halted,
                global_trading_paused: record.global_trading_paused,
                chain_trading_paused: record.chain_trading_paused,
                router: record.router.clone().filter(|r| !r.is_empty()),
                inbound_address: Some(record.address.clone()).filter(|a| !a.is_empty()),
            },
            None => ProviderStatus {
                chain: chain.to_string(),
                available: false,
                ..ProviderStatus::default()
            },
        }
    }

    fn quote_query(&self, req: &QuoteRequest) -> ProviderResult<Vec<(&'static str, String)>> {
        let from_asset = self.protocol.asset_name(&req.from_asset)?;
        let to_asset = self.protocol.asset_name(&req.to_asset)?;
        if req.destination.is_empty() {
            return Err(ProviderError::MissingField("destination"));
        }

        let invalid_amount = || ProviderError::InvalidAmount {
            field: "amount",
            value: req.amount.to_string(),
        };
        let node_amount =
            to_node_units(req.amount, req.from_asset.decimals).ok_or_else(invalid_amount)?;
        if node_amount.is_zero() {
            return Err(invalid_amount());
        }

        let mut query = vec![
            ("from_asset", from_asset),
            ("to_asset", to_asset),
            ("amount", node_amount.to_string()),
            ("destination", req.destination.clone()),
            ("streaming_interval", STREAMING_INTERVAL.to_string()),
            ("streaming_quantity", STREAMING_QUANTITY.to_string()),
        ];
        if let Some(bps) = req.tolerance_bps {
            query.push(("tolerance_bps", bps.to_string()));
        }
        Ok(query)
    }

    fn quote_from_response(&self, req: &QuoteRequest, resp: QuoteResponse) -> ProviderResult<Quote> {
        let node_out = parse_decimal_amount("expected_amount_out", &resp.expected_amount_out)?;
        let expected_output = from_node_units(node_out, req.to_asset.decimals).ok_or_else(|| {
            ProviderError::InvalidAmount {
                field: "expected_amount_out",
                value: resp.expected_amount_out.clone(),
            }
        })?;
        let minimum_output = match req.tolerance_bps {
            Some(bps) => {
                let keep = U256::from(10_000u32.saturating_sub(bps));
                expected_output
                    .checked_mul(keep)
                    .map(|scaled| scaled / U256::from(10_000u32))
                    .ok_or_else(|| ProviderError::InvalidAmount {
                        field: "expected_amount_out",
                        value: resp.expected_amount_out.clone(),
                    })?
            }
            None => expected_output,
        };

        let router = resp.router.unwrap_or_default();
        let needs_approval = approval::requires_approval(&req.from_asset);

        Ok(Quote {
            provider: self.protocol.id,
            from_asset: req.from_asset.clone(),
            to_asset: req.to_asset.clone(),
            from_amount: req.amount,
            expected_output,
            minimum_output,
            memo: resp.memo.unwrap_or_default(),
            inbound_address: resp.inbound_address.unwrap_or_default(),
            approval_spender: needs_approval.then(|| router.clone()).filter(|r| !r.is_empty()),
            approval_amount: needs_approval.then_some(req.amount),
            router,
            expiry: u64::try_from(resp.expiry).unwrap_or(0),
            streaming_swap: resp.streaming_swap_blocks.unwrap_or(0) > 0,
            needs_approval,
        })
    }

    fn deposit_tx(&self, quote: &Quote, chain_id: u64) -> ProviderResult<TxData> {
        if quote.router.is_empty() {
            return Err(ProviderError::MissingField("router"));
        }
        let vault = parse_address(&quote.inbound_address)?;
        let asset = if quote.from_asset.is_native() {
            Address::ZERO
        } else {
            parse_address(&quote.from_asset.address)?
        };
        let expiration = if quote.expiry > 0 {
            quote.expiry
        } else {
            unix_now() + DEFAULT_DEPOSIT_WINDOW_SECS
        };

        let call = IThorRouter::depositWithExpiryCall {
            vault,
            asset,
            amount: quote.from_amount,
            memo: quote.memo.clone(),
            expiration: U256::from(expiration),
        };

        Ok(TxData {
            to: quote.router.clone(),
            value: if quote.from_asset.is_native() {
                quote.from_amount
            } else {
                U256::ZERO
            },
            data: Bytes::from(call.abi_encode()),
            gas_limit: Some(DEPOSIT_GAS_LIMIT),
            chain_id: Some(chain_id),
            memo: quote.memo.clone(),
            ..TxData::default()
        })
    }
}

fn parse_address(raw: &str) -> ProviderResult<Address> {
    Address::from_str(raw).map_err(|_| ProviderError::InvalidAddress(raw.to_string()))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[async_trait]
impl SwapProvider for NodeVenue {
    fn id(&self) -> ProviderId {
        self.protocol.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supported_chains(&self) -> Vec<&'static str> {
        self.protocol.networks.iter().map(|(chain, _)| *chain).collect()
    }

    fn supports_route(&self, from: &Asset, to: &Asset) -> bool {
        self.protocol.network(&from.chain).is_some() && self.protocol.network(&to.chain).is_some()
    }

    async fn is_available(&self, chain: &str) -> ProviderResult<bool> {
        Ok(self.get_status(chain).await?.available)
    }

    async fn get_status(&self, chain: &str) -> ProviderResult<ProviderStatus> {
        let network = self
            .protocol
            .network(chain)
            .ok_or_else(|| ProviderError::UnsupportedChain(chain.to_string()))?;
        let records = self.client.inbound_addresses().await?;
        let status = self.status_from_records(chain, network, &records);
        debug!(
            venue = self.protocol.id.name(),
            chain = chain,
            available = status.available,
            halted = status.halted,
            "inbound status"
        );
        Ok(status)
    }

    #[tracing::instrument(skip_all, fields(venue = %self.protocol.id, from = %req.from_asset, to = %req.to_asset))]
    async fn get_quote(&self, req: &QuoteRequest) -> ProviderResult<Quote> {
        let query = self.quote_query(req)?;
        let resp = self.client.quote_swap(&query).await?;
        if let Some(min_in) = &resp.recommended_min_amount_in {
            debug!(recommended_min_amount_in = %min_in, "node quote minimum");
        }
        let quote = self.quote_from_response(req, resp)?;
        debug!(
            expected_output = %quote.expected_output,
            streaming = quote.streaming_swap,
            expiry = quote.expiry,
            "node quote received"
        );
        Ok(quote)
    }

    async fn build_tx(&self, req: &SwapRequest) -> ProviderResult<SwapResult> {
        let quote = &req.quote;
        if quote.memo.is_empty() {
            return Err(ProviderError::MissingField("memo"));
        }

        let tx = match chains::chain_kind(&quote.from_asset.chain) {
            Some(ChainKind::Evm(chain_id)) => self.deposit_tx(quote, chain_id)?,
            Some(_) => TxData {
                to: quote.inbound_address.clone(),
                value: quote.from_amount,
                memo: quote.memo.clone(),
                ..TxData::default()
            },
            None => return Err(ProviderError::UnsupportedChain(quote.from_asset.chain.clone())),
        };

        let needs_approval = quote.needs_approval || approval::requires_approval(&quote.from_asset);
        Ok(SwapResult {
            provider: self.protocol.id,
            tx,
            expected_out: quote.expected_output,
            needs_approval,
            approval_spender: if needs_approval {
                quote.resolved_spender().map(str::to_string)
            } else {
                None
            },
            approval_amount: if needs_approval {
                quote.resolved_approval_amount()
            } else {
                None
            },
        })
    }
}
