// Aggregator venue adapters
// LiFi, 1inch, Jupiter and Uniswap: route predicates and availability
// come from static chain whitelists; quoting and building are not wired yet
//
// Numan Thabit 2025 Nov

use crate::chains::{JUPITER_CHAINS, LIFI_CHAINS, ONEINCH_CHAINS, UNISWAP_CHAINS};
use crate::errors::ProviderError;
use crate::types::{Asset, ProviderStatus, Quote, QuoteRequest, SwapRequest, SwapResult};
use crate::venues::provider::{ProviderId, ProviderResult, SwapProvider};
use async_trait::async_trait;

/// Which chain pairs a venue can route between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteScope {
    /// Any two whitelisted chains (bridging aggregator).
    CrossChain,
    /// Both legs on one whitelisted chain (single-chain DEX).
    SameChain,
}

#[derive(Debug, Clone)]
pub struct AggregatorVenue {
    id: ProviderId,
    priority: i32,
    chains: &'static [&'static str],
    scope: RouteScope,
}

impl AggregatorVenue {
    pub fn new(id: ProviderId, chains: &'static [&'static str], scope: RouteScope) -> Self {
        Self {
            id,
            priority: id.default_priority(),
            chains,
            scope,
        }
    }

    pub fn lifi() -> Self {
        Self::new(ProviderId::Lifi, LIFI_CHAINS, RouteScope::CrossChain)
    }

    pub fn one_inch() -> Self {
        Self::new(ProviderId::OneInch, ONEINCH_CHAINS, RouteScope::SameChain)
    }

    pub fn jupiter() -> Self {
        Self::new(ProviderId::Jupiter, JUPITER_CHAINS, RouteScope::SameChain)
    }

    pub fn uniswap() -> Self {
        Self::new(ProviderId::Uniswap, UNISWAP_CHAINS, RouteScope::SameChain)
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn covers(&self, chain: &str) -> bool {
        self.chains.contains(&chain)
    }

    fn not_implemented(&self, operation: &'static str) -> ProviderError {
        ProviderError::NotImplemented {
            provider: self.id,
            operation,
        }
    }
}

#[async_trait]
impl SwapProvider for AggregatorVenue {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supported_chains(&self) -> Vec<&'static str> {
        self.chains.to_vec()
    }

    fn supports_route(&self, from: &Asset, to: &Asset) -> bool {
        let legs = self.covers(&from.chain) && self.covers(&to.chain);
        match self.scope {
            RouteScope::CrossChain => legs,
            RouteScope::SameChain => legs && from.chain == to.chain,
        }
    }

    async fn is_available(&self, chain: &str) -> ProviderResult<bool> {
        Ok(self.covers(chain))
    }

    async fn get_status(&self, chain: &str) -> ProviderResult<ProviderStatus> {
        Ok(ProviderStatus {
            chain: chain.to_string(),
            available: self.covers(chain),
            ..ProviderStatus::default()
        })
    }

    async fn get_quote(&self, _req: &QuoteRequest) -> ProviderResult<Quote> {
        Err(self.not_implemented("get_quote"))
    }

    async fn build_tx(&self, _req: &SwapRequest) -> ProviderResult<SwapResult> {
        Err(self.not_implemented("build_tx"))
    }
}
