// Swap router
// This file implements the priority-ordered provider registry and the
// first-fit fallback walk used for route discovery and quoting
//
// Numan Thabit 2025 Nov

use crate::config::RouterConfig;
use crate::errors::RouterError;
use crate::metrics::ROUTE_OUTCOMES;
use crate::router::routes::{ProviderFailure, RouteResult, SkipReason};
use crate::transport::NonceSource;
use crate::types::{Asset, ProviderStatus, Quote, QuoteRequest, SwapRequest, SwapResult};
use crate::venues::default_providers;
use crate::venues::provider::{ProviderId, ProviderResult, SwapProvider};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes swaps across venues in ascending priority order. First fit wins;
/// there is no price comparison between venues.
#[derive(Debug, Clone)]
pub struct Router {
    providers: Vec<Arc<dyn SwapProvider>>,
    index: HashMap<ProviderId, usize>,
    nonce_source: Option<Arc<dyn NonceSource>>,
}

impl Router {
    pub fn new(mut providers: Vec<Arc<dyn SwapProvider>>) -> Self {
        // sort_by_key is stable, equal priorities keep registration order
        providers.sort_by_key(|p| p.priority());

        let mut index = HashMap::with_capacity(providers.len());
        for (pos, provider) in providers.iter().enumerate() {
            match index.entry(provider.id()) {
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
                Entry::Occupied(_) => {
                    warn!(
                        provider = %provider.id(),
                        priority = provider.priority(),
                        "duplicate provider id; lookups keep the higher-priority entry"
                    );
                }
            }
        }

        Self {
            providers,
            index,
            nonce_source: None,
        }
    }

    /// Router over THORChain, Mayachain, LiFi, 1inch, Jupiter and Uniswap.
    pub fn with_default_providers(config: &RouterConfig) -> ProviderResult<Self> {
        Ok(Self::new(default_providers(config)?))
    }

    pub fn with_nonce_source(mut self, source: Arc<dyn NonceSource>) -> Self {
        self.nonce_source = Some(source);
        self
    }

    pub fn nonce_source(&self) -> Option<&Arc<dyn NonceSource>> {
        self.nonce_source.as_ref()
    }

    pub fn providers(&self) -> &[Arc<dyn SwapProvider>] {
        &self.providers
    }

    pub fn provider(&self, id: ProviderId) -> Option<&Arc<dyn SwapProvider>> {
        self.index.get(&id).map(|pos| &self.providers[*pos])
    }

    /// Provider names in priority order.
    pub fn list_providers(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub(crate) fn require_provider(&self, id: ProviderId) -> Result<&Arc<dyn SwapProvider>, RouterError> {
        self.provider(id).ok_or(RouterError::ProviderNotFound(id))
    }

    /// Route support and availability on both legs.
    async fn admit(
        &self,
        provider: &dyn SwapProvider,
        from: &Asset,
        to: &Asset,
    ) -> Result<(), SkipReason> {
        if !provider.supports_route(from, to) {
            return Err(SkipReason::RouteUnsupported);
        }
        let mut chains = vec![from.chain.as_str()];
        if to.chain != from.chain {
            chains.push(to.chain.as_str());
        }
        for chain in chains {
            match provider.is_available(chain).await {
                Ok(true) => {}
                Ok(false) => {
                    return Err(SkipReason::Unavailable {
                        chain: chain.to_string(),
                    })
                }
                Err(source) => {
                    return Err(SkipReason::AvailabilityCheck {
                        chain: chain.to_string(),
                        source,
                    })
                }
            }
        }
        Ok(())
    }

    fn record_skip(failures: &mut Vec<ProviderFailure>, provider: ProviderId, reason: SkipReason) {
        debug!(provider = %provider, reason = %reason, "provider skipped");
        ROUTE_OUTCOMES
            .with_label_values(&[provider.name(), reason.label()])
            .inc();
        failures.push(ProviderFailure { provider, reason });
    }

    fn no_route(from: &Asset, to: &Asset, failures: Vec<ProviderFailure>) -> RouterError {
        RouterError::NoRouteAvailable {
            from: from.to_string(),
            to: to.to_string(),
            failures,
        }
    }

    fn ensure_providers(&self) -> Result<(), RouterError> {
        if self.providers.is_empty() {
            return Err(RouterError::NoProvidersConfigured);
        }
        Ok(())
    }

    /// First provider that supports the pair and is available on both legs.
    #[tracing::instrument(skip_all, fields(from = %from, to = %to))]
    pub async fn find_route(&self, from: &Asset, to: &Asset) -> Result<RouteResult, RouterError> {
        self.ensure_providers()?;
        let mut failures = Vec::new();
        for provider in &self.providers {
            match self.admit(provider.as_ref(), from, to).await {
                Ok(()) => {
                    info!(provider = %provider.id(), "route selected");
                    ROUTE_OUTCOMES
                        .with_label_values(&[provider.name(), "selected"])
                        .inc();
                    return Ok(RouteResult::supported(provider.id()));
                }
                Err(reason) => Self::record_skip(&mut failures, provider.id(), reason),
            }
        }
        Err(Self::no_route(from, to, failures))
    }

    /// Quote from the first eligible provider that answers; a failing quote
    /// moves the walk on to the next candidate.
    #[tracing::instrument(skip_all, fields(from = %req.from_asset, to = %req.to_asset, amount = %req.amount))]
    pub async fn get_quote(&self, req: &QuoteRequest) -> Result<Quote, RouterError> {
        self.ensure_providers()?;
        let mut failures = Vec::new();
        for provider in &self.providers {
            if let Err(reason) = self
                .admit(provider.as_ref(), &req.from_asset, &req.to_asset)
                .await
            {
                Self::record_skip(&mut failures, provider.id(), reason);
                continue;
            }
            match provider.get_quote(req).await {
                Ok(quote) => {
                    info!(
                        provider = %provider.id(),
                        expected_output = %quote.expected_output,
                        "quote selected"
                    );
                    ROUTE_OUTCOMES
                        .with_label_values(&[provider.name(), "selected"])
                        .inc();
                    return Ok(quote);
                }
                Err(err) => {
                    warn!(provider = %provider.id(), error = %err, "quote failed; trying next provider");
                    Self::record_skip(&mut failures, provider.id(), SkipReason::Quote(err));
                }
            }
        }
        Err(Self::no_route(&req.from_asset, &req.to_asset, failures))
    }

    pub async fn quote_route(&self, req: &QuoteRequest) -> Result<RouteResult, RouterError> {
        self.get_quote(req).await.map(RouteResult::quoted)
    }

    /// Quote from one named provider, without fallback.
    #[tracing::instrument(skip_all, fields(provider = %id))]
    pub async fn quote_from(&self, id: ProviderId, req: &QuoteRequest) -> Result<Quote, RouterError> {
        let provider = self.require_provider(id)?;
        match self
            .admit(provider.as_ref(), &req.from_asset, &req.to_asset)
            .await
        {
            Ok(()) => {}
            Err(SkipReason::Unavailable { chain }) => {
                return Err(RouterError::ProviderUnavailable { provider: id, chain })
            }
            Err(SkipReason::AvailabilityCheck { source, .. }) | Err(SkipReason::Quote(source)) => {
                return Err(RouterError::Provider {
                    provider: id,
                    source,
                })
            }
            Err(reason @ SkipReason::RouteUnsupported) => {
                return Err(Self::no_route(
                    &req.from_asset,
                    &req.to_asset,
                    vec![ProviderFailure {
                        provider: id,
                        reason,
                    }],
                ))
            }
        }
        provider
            .get_quote(req)
            .await
            .map_err(|source| RouterError::Provider {
                provider: id,
                source,
            })
    }

    /// Builds the swap transaction with the provider that issued the quote.
    #[tracing::instrument(skip_all, fields(provider = %req.quote.provider))]
    pub async fn build_tx(&self, req: &SwapRequest) -> Result<SwapResult, RouterError> {
        let id = req.quote.provider;
        let provider = self.require_provider(id)?;
        provider
            .build_tx(req)
            .await
            .map_err(|source| RouterError::Provider {
                provider: id,
                source,
            })
    }

    pub async fn provider_status(
        &self,
        id: ProviderId,
        chain: &str,
    ) -> Result<ProviderStatus, RouterError> {
        self.require_provider(id)?
            .get_status(chain)
            .await
            .map_err(|source| RouterError::Provider {
                provider: id,
                source,
            })
    }
}
