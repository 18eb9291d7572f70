// Transport layer
// EVM JSON-RPC access for nonce and gas price lookups
//
// Numan Thabit 2025 Nov

pub mod jsonrpc;

pub use jsonrpc::{EvmRpc, NonceSource};
