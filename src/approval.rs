// ERC-20 approval calldata
// Byte-exact encoder/decoder for approve(address,uint256) and the
// rule deciding when a swap input needs an allowance first
//
// Numan Thabit 2025 Nov

use crate::chains;
use crate::errors::CalldataError;
use crate::types::Asset;
use alloy_primitives::U256;

/// `keccak256("approve(address,uint256)")[..4]`
pub const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

pub const APPROVE_CALLDATA_LEN: usize = 68;

const SPENDER_OFFSET: usize = 16;
const AMOUNT_OFFSET: usize = 36;

/// Native coins never need an allowance; ERC-20 tokens on EVM chains do.
pub fn requires_approval(asset: &Asset) -> bool {
    !asset.is_native() && chains::is_evm(&asset.chain)
}

fn parse_spender(spender: &str) -> Result<[u8; 20], CalldataError> {
    let trimmed = spender.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if hex_part.len() != 40 {
        return Err(CalldataError::InvalidSpender(spender.to_string()));
    }
    let mut out = [0u8; 20];
    hex::decode_to_slice(hex_part, &mut out)
        .map_err(|_| CalldataError::InvalidSpender(spender.to_string()))?;
    Ok(out)
}

/// Encode `approve(spender, amount)` from a big-endian amount of any width.
/// Leading zero bytes do not count towards the 32-byte limit.
pub fn encode_approve_calldata_be(
    spender: &str,
    amount_be: &[u8],
) -> Result<Vec<u8>, CalldataError> {
    let spender = parse_spender(spender)?;
    let first_significant = amount_be
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(amount_be.len());
    let amount = &amount_be[first_significant..];
    if amount.len() > 32 {
        return Err(CalldataError::AmountTooLarge(amount.len()));
    }

    let mut data = vec![0u8; APPROVE_CALLDATA_LEN];
    data[..4].copy_from_slice(&APPROVE_SELECTOR);
    data[SPENDER_OFFSET..AMOUNT_OFFSET].copy_from_slice(&spender);
    data[APPROVE_CALLDATA_LEN - amount.len()..].copy_from_slice(amount);
    Ok(data)
}

pub fn encode_approve_calldata(spender: &str, amount: U256) -> Result<Vec<u8>, CalldataError> {
    encode_approve_calldata_be(spender, &amount.to_be_bytes::<32>())
}

/// Inverse of [`encode_approve_calldata`]; returns the lowercase 0x spender.
pub fn decode_approve_calldata(data: &[u8]) -> Result<(String, U256), CalldataError> {
    if data.len() != APPROVE_CALLDATA_LEN {
        return Err(CalldataError::InvalidLength(data.len()));
    }
    if data[..4] != APPROVE_SELECTOR {
        return Err(CalldataError::SelectorMismatch(hex::encode(&data[..4])));
    }
    if data[4..SPENDER_OFFSET].iter().any(|b| *b != 0) {
        return Err(CalldataError::DirtyAddressPadding);
    }
    let spender = format!("0x{}", hex::encode(&data[SPENDER_OFFSET..AMOUNT_OFFSET]));
    let amount = U256::from_be_slice(&data[AMOUNT_OFFSET..]);
    Ok((spender, amount))
}
