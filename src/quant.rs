// Amount quantization module
// This file converts between display amounts, asset base units and the
// fixed 1e8 units spoken by THORNode/Mayanode
//
// Numan Thabit 2025 Nov

use alloy_primitives::U256;
use anyhow::{ensure, Context, Result};

/// Decimals of the node quote API amounts.
pub const NODE_DECIMALS: u8 = 8;

/// Largest decimals value whose power of ten fits a U256.
const MAX_DECIMALS: u8 = 77;

fn pow10(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Parse a display amount such as `"1.5"` into base units.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    ensure!(decimals <= MAX_DECIMALS, "decimals {decimals} out of range");
    let amount = amount.trim();
    ensure!(!amount.is_empty(), "amount must not be empty");

    let (whole, frac) = match amount.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (amount, ""),
    };
    ensure!(
        !whole.is_empty() || !frac.is_empty(),
        "amount {amount:?} has no digits"
    );
    ensure!(
        whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()),
        "amount {amount:?} is not a non-negative decimal number"
    );
    ensure!(
        frac.len() <= decimals as usize,
        "amount {amount:?} has more than {decimals} fractional digits"
    );

    let padded = format!("{whole}{frac:0<width$}", width = decimals as usize);
    let digits = padded.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).with_context(|| format!("amount {amount:?} overflows uint256"))
}

/// Scale an amount in `decimals` base units to node 1e8 units, truncating.
pub fn to_node_units(amount: U256, decimals: u8) -> Option<U256> {
    rescale(amount, decimals, NODE_DECIMALS)
}

/// Scale a node 1e8 amount into `decimals` base units.
pub fn from_node_units(amount: U256, decimals: u8) -> Option<U256> {
    rescale(amount, NODE_DECIMALS, decimals)
}

fn rescale(amount: U256, from: u8, to: u8) -> Option<U256> {
    if from.max(to) > MAX_DECIMALS {
        return None;
    }
    if from >= to {
        Some(amount / pow10(from - to))
    } else {
        amount.checked_mul(pow10(to - from))
    }
}
