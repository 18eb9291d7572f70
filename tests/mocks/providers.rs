//! Mock providers and nonce source
//!
//! Every trait method bumps a shared counter so tests can assert which
//! providers the router actually touched.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy_primitives::{Bytes, U256};
use async_trait::async_trait;
use swap_aggr::approval::requires_approval;
use swap_aggr::errors::{ProviderError, RpcError};
use swap_aggr::transport::NonceSource;
use swap_aggr::types::{
    Asset, ProviderStatus, Quote, QuoteRequest, SwapRequest, SwapResult, TxData,
};
use swap_aggr::venues::provider::{ProviderId, ProviderResult, SwapProvider};

pub const ROUTER: &str = "0xd37bbe5744d730a1d98d8dc97c42f0ca46ad7146";

/// How `get_quote` answers.
#[derive(Debug, Clone)]
pub enum QuoteBehavior {
    Succeed(U256),
    Fail,
    /// Never resolves; used for cancellation tests.
    Hang,
}

#[derive(Debug, Clone)]
pub struct MockProvider {
    id: ProviderId,
    priority: i32,
    supports: bool,
    available: bool,
    availability_error: bool,
    quote: QuoteBehavior,
    availability_calls: Arc<AtomicUsize>,
    quote_calls: Arc<AtomicUsize>,
    build_calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            priority: id.default_priority(),
            supports: true,
            available: true,
            availability_error: false,
            quote: QuoteBehavior::Succeed(U256::from(1_000u64)),
            availability_calls: Arc::new(AtomicUsize::new(0)),
            quote_calls: Arc::new(AtomicUsize::new(0)),
            build_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn unsupported(mut self) -> Self {
        self.supports = false;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn availability_error(mut self) -> Self {
        self.availability_error = true;
        self
    }

    pub fn quoting(mut self, behavior: QuoteBehavior) -> Self {
        self.quote = behavior;
        self
    }

    pub fn availability_calls(&self) -> usize {
        self.availability_calls.load(Ordering::Relaxed)
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_calls.load(Ordering::Relaxed)
    }

    pub fn build_calls(&self) -> usize {
        self.build_calls.load(Ordering::Relaxed)
    }

    pub fn total_calls(&self) -> usize {
        self.availability_calls() + self.quote_calls() + self.build_calls()
    }

    pub fn arc(&self) -> Arc<dyn SwapProvider> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl SwapProvider for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supported_chains(&self) -> Vec<&'static str> {
        vec!["Ethereum", "Base", "Bitcoin"]
    }

    fn supports_route(&self, _from: &Asset, _to: &Asset) -> bool {
        self.supports
    }

    async fn is_available(&self, _chain: &str) -> ProviderResult<bool> {
        self.availability_calls.fetch_add(1, Ordering::Relaxed);
        if self.availability_error {
            return Err(ProviderError::Status {
                status: 503,
                message: "mock outage".to_string(),
            });
        }
        Ok(self.available)
    }

    async fn get_status(&self, chain: &str) -> ProviderResult<ProviderStatus> {
        Ok(ProviderStatus {
            chain: chain.to_string(),
            available: self.is_available(chain).await?,
            ..ProviderStatus::default()
        })
    }

    async fn get_quote(&self, req: &QuoteRequest) -> ProviderResult<Quote> {
        self.quote_calls.fetch_add(1, Ordering::Relaxed);
        let expected_output = match &self.quote {
            QuoteBehavior::Succeed(out) => *out,
            QuoteBehavior::Fail => {
                return Err(ProviderError::Status {
                    status: 400,
                    message: "mock quote rejected".to_string(),
                })
            }
            QuoteBehavior::Hang => std::future::pending().await,
        };
        Ok(Quote {
            provider: self.id,
            from_asset: req.from_asset.clone(),
            to_asset: req.to_asset.clone(),
            from_amount: req.amount,
            expected_output,
            minimum_output: expected_output,
            memo: "=:ETH.ETH:0xdest".to_string(),
            inbound_address: "0x1c8b5f1f8d1e36a8a6d9a48a7b0f0b7d2e3f4a5b".to_string(),
            router: ROUTER.to_string(),
            expiry: 0,
            streaming_swap: false,
            needs_approval: requires_approval(&req.from_asset),
            approval_spender: None,
            approval_amount: None,
        })
    }

    async fn build_tx(&self, req: &SwapRequest) -> ProviderResult<SwapResult> {
        self.build_calls.fetch_add(1, Ordering::Relaxed);
        let quote = &req.quote;
        Ok(SwapResult {
            provider: self.id,
            tx: TxData {
                to: quote.router.clone(),
                value: if quote.from_asset.is_native() {
                    quote.from_amount
                } else {
                    U256::ZERO
                },
                data: Bytes::from_static(&[0xde, 0xad]),
                memo: quote.memo.clone(),
                ..TxData::default()
            },
            expected_out: quote.expected_output,
            needs_approval: quote.needs_approval,
            approval_spender: quote.resolved_spender().map(str::to_string),
            approval_amount: quote.resolved_approval_amount(),
        })
    }
}

/// Nonce source returning a fixed pending nonce.
#[derive(Debug, Clone)]
pub struct MockNonceSource {
    nonce: u64,
    gas_price: Option<U256>,
    nonce_calls: Arc<AtomicUsize>,
}

impl MockNonceSource {
    pub fn new(nonce: u64) -> Self {
        Self {
            nonce,
            gas_price: Some(U256::from(30_000_000_000u64)),
            nonce_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// `gas_price` fails with a node error.
    pub fn without_gas_price(mut self) -> Self {
        self.gas_price = None;
        self
    }

    pub fn nonce_calls(&self) -> usize {
        self.nonce_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NonceSource for MockNonceSource {
    async fn pending_nonce(&self, _chain: &str, _address: &str) -> Result<u64, RpcError> {
        self.nonce_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.nonce)
    }

    async fn gas_price(&self, _chain: &str) -> Result<U256, RpcError> {
        self.gas_price.ok_or(RpcError::Node {
            code: -32000,
            message: "gas price unavailable".to_string(),
        })
    }
}
