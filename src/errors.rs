// Error types and error handling module
// This file defines the error taxonomy shared by venues, the router,
// the approval encoder and the EVM JSON-RPC source
//
// Numan Thabit 2025 Nov

use crate::router::routes::ProviderFailure;
use crate::venues::provider::ProviderId;
use thiserror::Error;

/// Errors raised while building or decoding ERC-20 `approve` calldata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalldataError {
    #[error("invalid spender address {0:?}: expected 40 hex characters")]
    InvalidSpender(String),
    #[error("approval amount is {0} bytes long, at most 32 fit in a uint256 word")]
    AmountTooLarge(usize),
    #[error("approve calldata must be 68 bytes, got {0}")]
    InvalidLength(usize),
    #[error("calldata selector 0x{0} is not approve(address,uint256)")]
    SelectorMismatch(String),
    #[error("spender word has non-zero padding")]
    DirtyAddressPadding,
}

/// Venue-local failures. The router swallows these while it still has
/// candidates left and reports them per provider otherwise.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http {status}: {message}")]
    Status { status: u16, message: String },
    #[error("decode response: {0}")]
    Decode(String),
    #[error("invalid {field} amount {value:?}")]
    InvalidAmount { field: &'static str, value: String },
    #[error("chain {0} is not supported by this venue")]
    UnsupportedChain(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
    #[error("{provider}: {operation} not implemented")]
    NotImplemented {
        provider: ProviderId,
        operation: &'static str,
    },
    #[error("all endpoints failed: {}", .attempts.join("; "))]
    EndpointsExhausted { attempts: Vec<String> },
    #[error("calldata: {0}")]
    Calldata(#[from] CalldataError),
}

impl ProviderError {
    /// Whether the next configured endpoint of the same venue should be tried.
    pub fn is_failover(&self) -> bool {
        match self {
            ProviderError::Http(_) => true,
            ProviderError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Errors from the EVM JSON-RPC nonce/gas source.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("no JSON-RPC endpoint configured for chain {0}")]
    UnconfiguredChain(String),
    #[error("jsonrpc transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("jsonrpc http {0}")]
    Status(u16),
    #[error("jsonrpc error {code}: {message}")]
    Node { code: i64, message: String },
    #[error("invalid hex quantity {0:?}")]
    InvalidQuantity(String),
}

/// Errors surfaced by the router and its bundle builder.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("no providers configured")]
    NoProvidersConfigured,
    #[error("no route available for {from} -> {to}{}", render_failures(.failures))]
    NoRouteAvailable {
        from: String,
        to: String,
        failures: Vec<ProviderFailure>,
    },
    #[error("provider {provider} unavailable for chain {chain}")]
    ProviderUnavailable { provider: ProviderId, chain: String },
    #[error("provider not found: {0}")]
    ProviderNotFound(ProviderId),
    #[error("{provider}: {source}")]
    Provider {
        provider: ProviderId,
        #[source]
        source: ProviderError,
    },
    #[error("chain {0} is unknown; cannot resolve an EVM chain id")]
    UnknownChain(String),
    #[error("approval required but neither approval spender nor router is set")]
    MissingApprovalSpender,
    #[error("approval required but no approval amount is resolvable")]
    MissingApprovalAmount,
    #[error("approval required but the source asset has no token address")]
    MissingTokenAddress,
    #[error("no nonce supplied and no nonce source configured for chain {0}")]
    NonceUnavailable(String),
    #[error("nonce {0} cannot be advanced for the swap transaction")]
    NonceOverflow(u64),
    #[error("nonce source: {0}")]
    Rpc(#[from] RpcError),
    #[error("calldata: {0}")]
    Calldata(#[from] CalldataError),
}

fn render_failures(failures: &[ProviderFailure]) -> String {
    if failures.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
    format!(" ({})", parts.join("; "))
}

impl RouterError {
    /// Last observed provider failure of a failed walk.
    pub fn last_failure(&self) -> Option<&ProviderFailure> {
        match self {
            RouterError::NoRouteAvailable { failures, .. } => failures.last(),
            _ => None,
        }
    }
}
