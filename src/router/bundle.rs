// Approval + swap bundle builder
// This file sequences an optional ERC-20 approval and the swap it funds
// into consecutive nonces on the same chain
//
// Numan Thabit 2025 Nov

use crate::approval;
use crate::chains::{self, ChainKind};
use crate::errors::RouterError;
use crate::router::Router;
use crate::types::{SwapBundle, SwapRequest, TxData};
use crate::venues::thornode::DEPOSIT_GAS_LIMIT;
use alloy_primitives::{Bytes, U256};
use tracing::{debug, info, warn};

/// Gas limit for `approve(address,uint256)`.
pub const APPROVAL_GAS_LIMIT: u64 = 60_000;

/// Swap gas limit when the provider leaves it unset.
pub const DEFAULT_SWAP_GAS_LIMIT: u64 = DEPOSIT_GAS_LIMIT;

impl Router {
    /// Builds the swap and, for ERC-20 inputs, the exact-amount approval
    /// that must be mined before it. Fails without a partial bundle.
    #[tracing::instrument(skip_all, fields(provider = %req.quote.provider, chain = %req.quote.from_asset.chain))]
    pub async fn build_swap_bundle(&self, req: &SwapRequest) -> Result<SwapBundle, RouterError> {
        let quote = &req.quote;
        let result = self.build_tx(req).await?;
        let chain = quote.from_asset.chain.as_str();

        let chain_id = match chains::chain_kind(chain) {
            Some(ChainKind::Evm(id)) => id,
            Some(kind) => {
                debug!(?kind, "non-EVM source; memo transaction only");
                return Ok(SwapBundle::new(
                    None,
                    result.tx,
                    result.provider,
                    result.expected_out,
                    quote.clone(),
                ));
            }
            None => return Err(RouterError::UnknownChain(chain.to_string())),
        };

        let needs_approval = quote.needs_approval || approval::requires_approval(&quote.from_asset);
        let approval = if needs_approval {
            let spender = quote
                .resolved_spender()
                .ok_or(RouterError::MissingApprovalSpender)?;
            let amount = quote
                .resolved_approval_amount()
                .ok_or(RouterError::MissingApprovalAmount)?;
            if quote.from_asset.address.is_empty() {
                return Err(RouterError::MissingTokenAddress);
            }
            let data = approval::encode_approve_calldata(spender, amount)?;
            Some((quote.from_asset.address.clone(), data))
        } else {
            None
        };

        let nonce = self.base_nonce(req, chain).await?;
        let gas_price = self.gas_price(req, chain).await;

        let (approval_tx, swap_nonce) = match approval {
            Some((token, data)) => {
                let swap_nonce = nonce.checked_add(1).ok_or(RouterError::NonceOverflow(nonce))?;
                let tx = TxData {
                    to: token,
                    value: U256::ZERO,
                    data: Bytes::from(data),
                    nonce: Some(nonce),
                    gas_limit: Some(APPROVAL_GAS_LIMIT),
                    gas_price,
                    chain_id: Some(chain_id),
                    memo: String::new(),
                };
                (Some(tx), swap_nonce)
            }
            None => (None, nonce),
        };

        let mut swap_tx = result.tx;
        swap_tx.nonce = Some(swap_nonce);
        swap_tx.chain_id = Some(chain_id);
        swap_tx.gas_limit = swap_tx.gas_limit.or(Some(DEFAULT_SWAP_GAS_LIMIT));
        swap_tx.gas_price = gas_price;

        info!(
            approval = approval_tx.is_some(),
            swap_nonce = swap_nonce,
            chain_id = chain_id,
            "swap bundle built"
        );
        Ok(SwapBundle::new(
            approval_tx,
            swap_tx,
            result.provider,
            result.expected_out,
            quote.clone(),
        ))
    }

    async fn base_nonce(&self, req: &SwapRequest, chain: &str) -> Result<u64, RouterError> {
        if let Some(nonce) = req.nonce {
            return Ok(nonce);
        }
        let source = self
            .nonce_source()
            .ok_or_else(|| RouterError::NonceUnavailable(chain.to_string()))?;
        Ok(source.pending_nonce(chain, &req.sender).await?)
    }

    async fn gas_price(&self, req: &SwapRequest, chain: &str) -> Option<U256> {
        if req.gas_price.is_some() {
            return req.gas_price;
        }
        let source = self.nonce_source()?;
        match source.gas_price(chain).await {
            Ok(price) => Some(price),
            Err(err) => {
                warn!(chain = chain, error = %err, "gas price lookup failed; leaving unset");
                None
            }
        }
    }
}
