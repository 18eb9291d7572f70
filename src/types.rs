// Shared value types for routing and transaction building
// This file defines assets, quotes, swap requests/results, unsigned transactions
// and the approval + swap bundle
//
// Numan Thabit 2025 Nov

use crate::venues::provider::ProviderId;
use alloy_primitives::{Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A coin or token identified by chain, symbol, contract address and decimals.
/// An empty address denotes the chain's native coin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub chain: String,
    pub symbol: String,
    #[serde(default)]
    pub address: String,
    pub decimals: u8,
}

impl Asset {
    pub fn native(chain: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            chain: chain.into(),
            symbol: symbol.into(),
            address: String::new(),
            decimals,
        }
    }

    pub fn token(
        chain: impl Into<String>,
        symbol: impl Into<String>,
        address: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            chain: chain.into(),
            symbol: symbol.into(),
            address: address.into(),
            decimals,
        }
    }

    pub fn is_native(&self) -> bool {
        self.address.is_empty()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "{}.{}", self.chain, self.symbol)
        } else {
            write!(f, "{}.{}-{}", self.chain, self.symbol, self.address)
        }
    }
}

/// Request for a priced quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub from_asset: Asset,
    pub to_asset: Asset,
    /// Amount of `from_asset` in its base units.
    pub amount: U256,
    /// Address receiving `to_asset`.
    pub destination: String,
    /// Slippage tolerance in basis points
    #[serde(default)]
    pub tolerance_bps: Option<u32>,
}

/// A time-bounded offer issued by exactly one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub provider: ProviderId,
    pub from_asset: Asset,
    pub to_asset: Asset,
    pub from_amount: U256,
    pub expected_output: U256,
    pub minimum_output: U256,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub inbound_address: String,
    /// Spender / contract address receiving the deposit on EVM chains.
    #[serde(default)]
    pub router: String,
    /// Unix seconds.
    #[serde(default)]
    pub expiry: u64,
    #[serde(default)]
    pub streaming_swap: bool,
    #[serde(default)]
    pub needs_approval: bool,
    #[serde(default)]
    pub approval_spender: Option<String>,
    #[serde(default)]
    pub approval_amount: Option<U256>,
}

impl Quote {
    /// Spender for the approval: explicit spender, else the router.
    pub fn resolved_spender(&self) -> Option<&str> {
        self.approval_spender
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| Some(self.router.as_str()).filter(|s| !s.is_empty()))
    }

    /// Exact approval amount: explicit amount, else the swap amount.
    /// Never widened to an unlimited allowance.
    pub fn resolved_approval_amount(&self) -> Option<U256> {
        self.approval_amount
            .or(Some(self.from_amount))
            .filter(|amount| !amount.is_zero())
    }
}

/// Input to `build_tx` / `build_swap_bundle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    pub quote: Quote,
    pub sender: String,
    pub destination: String,
    /// Base nonce; fetched from the nonce source when absent.
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub gas_price: Option<U256>,
}

/// One unsigned transaction. For UTXO / Cosmos sources only `to`, `value`
/// and `memo` are meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxData {
    pub to: String,
    pub value: U256,
    #[serde(default)]
    pub data: Bytes,
    #[serde(default)]
    pub nonce: Option<u64>,
    #[serde(default)]
    pub gas_limit: Option<u64>,
    #[serde(default)]
    pub gas_price: Option<U256>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub memo: String,
}

/// Output of a provider's `build_tx`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResult {
    pub provider: ProviderId,
    pub tx: TxData,
    pub expected_out: U256,
    pub needs_approval: bool,
    pub approval_spender: Option<String>,
    pub approval_amount: Option<U256>,
}

impl SwapResult {
    pub fn value(&self) -> U256 {
        self.tx.value
    }

    pub fn to_address(&self) -> &str {
        &self.tx.to
    }

    pub fn memo(&self) -> &str {
        &self.tx.memo
    }
}

/// Optional approval plus its dependent swap, nonce-sequenced for joint
/// signing. Only the router's bundle builder constructs one, so an approval
/// never leaves the crate without the swap it funds.
#[derive(Debug, Clone, Serialize)]
pub struct SwapBundle {
    approval_tx: Option<TxData>,
    swap_tx: TxData,
    provider: ProviderId,
    expected_output: U256,
    quote: Quote,
}

impl SwapBundle {
    pub(crate) fn new(
        approval_tx: Option<TxData>,
        swap_tx: TxData,
        provider: ProviderId,
        expected_output: U256,
        quote: Quote,
    ) -> Self {
        Self {
            approval_tx,
            swap_tx,
            provider,
            expected_output,
            quote,
        }
    }

    pub fn approval_tx(&self) -> Option<&TxData> {
        self.approval_tx.as_ref()
    }

    pub fn swap_tx(&self) -> &TxData {
        &self.swap_tx
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn expected_output(&self) -> U256 {
        self.expected_output
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    /// Transactions in signing / submission order.
    pub fn transactions(&self) -> Vec<&TxData> {
        self.approval_tx.iter().chain(Some(&self.swap_tx)).collect()
    }
}

/// Point-in-time venue snapshot for one chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub chain: String,
    pub available: bool,
    pub halted: bool,
    pub global_trading_paused: bool,
    pub chain_trading_paused: bool,
    pub router: Option<String>,
    pub inbound_address: Option<String>,
}
