// Swap provider abstraction
// This file defines the capability set every venue implements and the
// closed set of venue identifiers the router keys its lookups on
//
// Numan Thabit 2025 Nov

use crate::errors::ProviderError;
use crate::types::{Asset, ProviderStatus, Quote, QuoteRequest, SwapRequest, SwapResult};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug};
use std::str::FromStr;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Venues known to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    Thorchain,
    Mayachain,
    Lifi,
    OneInch,
    Jupiter,
    Uniswap,
}

impl ProviderId {
    pub const ALL: [ProviderId; 6] = [
        ProviderId::Thorchain,
        ProviderId::Mayachain,
        ProviderId::Lifi,
        ProviderId::OneInch,
        ProviderId::Jupiter,
        ProviderId::Uniswap,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ProviderId::Thorchain => "THORChain",
            ProviderId::Mayachain => "Mayachain",
            ProviderId::Lifi => "LiFi",
            ProviderId::OneInch => "1inch",
            ProviderId::Jupiter => "Jupiter",
            ProviderId::Uniswap => "Uniswap",
        }
    }

    /// Position in the default priority order (lower is tried first).
    pub const fn default_priority(self) -> i32 {
        match self {
            ProviderId::Thorchain => 1,
            ProviderId::Mayachain => 2,
            ProviderId::Lifi => 3,
            ProviderId::OneInch => 4,
            ProviderId::Jupiter => 5,
            ProviderId::Uniswap => 6,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown provider {:?}", self.0)
    }
}

impl std::error::Error for UnknownProvider {}

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

impl Serialize for ProviderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Capability set of a swap venue.
///
/// `supports_route` must stay a local table lookup: the router calls it on
/// every candidate before paying for network availability checks.
#[async_trait]
pub trait SwapProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    fn name(&self) -> &'static str {
        self.id().name()
    }

    /// Lower values are tried first.
    fn priority(&self) -> i32;

    fn supported_chains(&self) -> Vec<&'static str>;

    fn supports_route(&self, from: &Asset, to: &Asset) -> bool;

    async fn is_available(&self, chain: &str) -> ProviderResult<bool>;

    async fn get_status(&self, chain: &str) -> ProviderResult<ProviderStatus>;

    async fn get_quote(&self, req: &QuoteRequest) -> ProviderResult<Quote>;

    async fn build_tx(&self, req: &SwapRequest) -> ProviderResult<SwapResult>;
}
