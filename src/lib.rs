// Library root module for swap-aggr
// This file defines the public API and module structure for the cross-chain
// swap router library
//
// Numan Thabit 2025 Nov

pub mod approval;
pub mod chains;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod quant;
pub mod router;
pub mod service;
pub mod transport;
pub mod types;
pub mod venues;

pub use errors::{CalldataError, ProviderError, RouterError, RpcError};
pub use router::Router;
pub use types::{Asset, ProviderStatus, Quote, QuoteRequest, SwapBundle, SwapRequest, SwapResult, TxData};
pub use venues::provider::{ProviderId, SwapProvider};
