// Route types
// This file defines the outcome of a route walk and the per-provider
// reasons a candidate was passed over
//
// Numan Thabit 2025 Nov

use crate::errors::ProviderError;
use crate::types::Quote;
use crate::venues::provider::ProviderId;
use serde::Serialize;
use std::fmt;

/// Winning provider of a walk, with its quote when one was requested.
#[derive(Debug, Clone, Serialize)]
pub struct RouteResult {
    pub provider: ProviderId,
    pub is_supported: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
}

impl RouteResult {
    pub fn supported(provider: ProviderId) -> Self {
        Self {
            provider,
            is_supported: true,
            quote: None,
        }
    }

    pub fn quoted(quote: Quote) -> Self {
        Self {
            provider: quote.provider,
            is_supported: true,
            quote: Some(quote),
        }
    }
}

/// Why a candidate did not produce the route.
#[derive(Debug)]
pub enum SkipReason {
    RouteUnsupported,
    Unavailable { chain: String },
    AvailabilityCheck { chain: String, source: ProviderError },
    Quote(ProviderError),
}

impl SkipReason {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::RouteUnsupported => "unsupported",
            SkipReason::Unavailable { .. } => "unavailable",
            SkipReason::AvailabilityCheck { .. } => "availability_error",
            SkipReason::Quote(_) => "quote_error",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::RouteUnsupported => f.write_str("route not supported"),
            SkipReason::Unavailable { chain } => write!(f, "unavailable on {chain}"),
            SkipReason::AvailabilityCheck { chain, source } => {
                write!(f, "availability check on {chain} failed: {source}")
            }
            SkipReason::Quote(source) => write!(f, "quote failed: {source}"),
        }
    }
}

/// One skipped candidate, in walk order.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub reason: SkipReason,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.reason)
    }
}
