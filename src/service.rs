// Swap service facade
// Request validation and display-amount conversion in front of the
// router, shared by the HTTP API and embedding callers
//
// Numan Thabit 2025 Nov

use crate::errors::RouterError;
use crate::quant;
use crate::router::routes::RouteResult;
use crate::router::Router;
use crate::types::{Asset, ProviderStatus, Quote, QuoteRequest, SwapBundle, SwapRequest};
use crate::venues::provider::{ProviderId, UnknownProvider};
use alloy_primitives::U256;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

pub const MAX_TOLERANCE_BPS: u32 = 10_000;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    UnknownProvider(#[from] UnknownProvider),
    #[error(transparent)]
    Router(#[from] RouterError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteParams {
    pub from: Asset,
    pub to: Asset,
}

/// Quote input with the amount in display units, e.g. `"0.5"`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteParams {
    pub from: Asset,
    pub to: Asset,
    pub amount: String,
    pub destination: String,
    #[serde(default)]
    pub tolerance_bps: Option<u32>,
    /// Restrict quoting to one provider instead of walking all of them.
    #[serde(default)]
    pub provider: Option<ProviderId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BundleParams {
    pub quote: Quote,
    pub sender: String,
    pub destination: String,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub gas_price: Option<U256>,
}

#[derive(Debug, Clone)]
pub struct SwapService {
    router: Arc<Router>,
}

impl SwapService {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    pub fn providers(&self) -> Vec<&'static str> {
        self.router.list_providers()
    }

    pub async fn route(&self, params: &RouteParams) -> Result<RouteResult, ServiceError> {
        Ok(self.router.find_route(&params.from, &params.to).await?)
    }

    pub fn quote_request(params: &QuoteParams) -> Result<QuoteRequest, ServiceError> {
        let amount = quant::parse_units(&params.amount, params.from.decimals)
            .map_err(|e| ServiceError::InvalidRequest(format!("{e:#}")))?;
        if amount.is_zero() {
            return Err(ServiceError::InvalidRequest("amount must be positive".into()));
        }
        if params.destination.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("destination is required".into()));
        }
        if let Some(bps) = params.tolerance_bps {
            if bps > MAX_TOLERANCE_BPS {
                return Err(ServiceError::InvalidRequest(format!(
                    "tolerance_bps {bps} exceeds {MAX_TOLERANCE_BPS}"
                )));
            }
        }
        Ok(QuoteRequest {
            from_asset: params.from.clone(),
            to_asset: params.to.clone(),
            amount,
            destination: params.destination.trim().to_string(),
            tolerance_bps: params.tolerance_bps,
        })
    }

    pub async fn quote(&self, params: &QuoteParams) -> Result<Quote, ServiceError> {
        let req = Self::quote_request(params)?;
        let quote = match params.provider {
            Some(id) => self.router.quote_from(id, &req).await?,
            None => self.router.get_quote(&req).await?,
        };
        Ok(quote)
    }

    pub async fn bundle(&self, params: BundleParams) -> Result<SwapBundle, ServiceError> {
        if params.sender.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("sender is required".into()));
        }
        let req = SwapRequest {
            quote: params.quote,
            sender: params.sender,
            destination: params.destination,
            nonce: params.nonce,
            gas_price: params.gas_price,
        };
        Ok(self.router.build_swap_bundle(&req).await?)
    }

    pub async fn status(&self, provider: &str, chain: &str) -> Result<ProviderStatus, ServiceError> {
        let id: ProviderId = provider.parse()?;
        Ok(self.router.provider_status(id, chain).await?)
    }
}
