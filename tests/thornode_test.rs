//! THORNode venue tests against a local mock node

mod mocks;

use alloy_primitives::U256;
use axum::http::StatusCode;
use mocks::node_server::{dead_endpoint, eth_btc_quote, healthy_inbound};
use mocks::{MockNode, NodeReply};
use serde_json::json;
use swap_aggr::config::{NodeConfig, RouterConfig};
use swap_aggr::errors::{ProviderError, RouterError};
use swap_aggr::router::Router;
use swap_aggr::types::{Asset, QuoteRequest};
use swap_aggr::venues::provider::{ProviderId, SwapProvider};
use swap_aggr::venues::thornode::NodeVenue;
use swap_aggr::venues::{mayachain, thorchain};

fn venue(endpoints: Vec<String>) -> NodeVenue {
    thorchain::venue(&NodeConfig::with_endpoints(endpoints)).unwrap()
}

fn eth_to_btc() -> QuoteRequest {
    QuoteRequest {
        from_asset: Asset::native("Ethereum", "ETH", 18),
        to_asset: Asset::native("Bitcoin", "BTC", 8),
        amount: U256::from(1_000_000_000_000_000u64),
        destination: "bc1qdest".to_string(),
        tolerance_bps: Some(300),
    }
}

#[tokio::test]
async fn test_status_from_inbound_addresses() {
    let inbound = json!([
        { "chain": "BTC", "address": "bc1qvault", "halted": false,
          "global_trading_paused": false, "chain_trading_paused": false },
        { "chain": "ETH", "address": "0xvault", "router": "0xrouter", "halted": true,
          "global_trading_paused": false, "chain_trading_paused": false },
        { "chain": "DOGE", "address": "Dvault", "halted": false,
          "global_trading_paused": false, "chain_trading_paused": true }
    ]);
    let node = MockNode::healthy(inbound, json!({})).await;
    let venue = venue(vec![node.base_url.clone()]);

    let btc = venue.get_status("Bitcoin").await.unwrap();
    assert!(btc.available);
    assert_eq!(btc.inbound_address.as_deref(), Some("bc1qvault"));

    let eth = venue.get_status("Ethereum").await.unwrap();
    assert!(!eth.available);
    assert!(eth.halted);
    assert_eq!(eth.router.as_deref(), Some("0xrouter"));

    assert!(!venue.is_available("Dogecoin").await.unwrap());
    // no record for LTC: unavailable, not an error
    assert!(!venue.is_available("Litecoin").await.unwrap());
    // home chain has no record of its own
    assert!(venue.is_available("THORChain").await.unwrap());

    assert!(matches!(
        venue.get_status("Arbitrum").await,
        Err(ProviderError::UnsupportedChain(_))
    ));
    assert_eq!(node.hits(), 5);
}

#[tokio::test]
async fn test_quote_query_and_scaling() {
    let node = MockNode::healthy(healthy_inbound(), eth_btc_quote()).await;
    let venue = venue(vec![node.base_url.clone()]);

    let quote = venue.get_quote(&eth_to_btc()).await.unwrap();
    let query = node.last_query().expect("quote query recorded");
    assert_eq!(query["from_asset"], "ETH.ETH");
    assert_eq!(query["to_asset"], "BTC.BTC");
    assert_eq!(query["amount"], "100000");
    assert_eq!(query["destination"], "bc1qdest");
    assert_eq!(query["streaming_interval"], "3");
    assert_eq!(query["streaming_quantity"], "0");
    assert_eq!(query["tolerance_bps"], "300");

    assert_eq!(quote.provider, ProviderId::Thorchain);
    assert_eq!(quote.expected_output, U256::from(7_350u64));
    assert_eq!(quote.minimum_output, U256::from(7_129u64));
    assert_eq!(quote.memo, "=:BTC.BTC:bc1qdest:0/3/0");
    assert!(!quote.needs_approval);
    assert!(!quote.streaming_swap);
    assert_eq!(quote.approval_spender, None);
}

#[tokio::test]
async fn test_token_quote_scales_output_to_target_decimals() {
    let body = json!({
        "inbound_address": "bc1qvault",
        "memo": "=:ETH.USDC-0XA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48:0xdest",
        "expected_amount_out": "6500000000000",
        "streaming_swap_blocks": 10
    });
    let node = MockNode::healthy(healthy_inbound(), body).await;
    let venue = venue(vec![node.base_url.clone()]);

    let req = QuoteRequest {
        from_asset: Asset::native("Bitcoin", "BTC", 8),
        to_asset: Asset::token(
            "Ethereum",
            "USDC",
            "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            6,
        ),
        amount: U256::from(100_000_000u64),
        destination: "0xdest".to_string(),
        tolerance_bps: None,
    };
    let quote = venue.get_quote(&req).await.unwrap();
    let query = node.last_query().unwrap();
    assert_eq!(
        query["to_asset"],
        "ETH.USDC-0XA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48"
    );
    assert!(!query.contains_key("tolerance_bps"));
    // 65000 USDC in 1e8 node units -> 6 decimals
    assert_eq!(quote.expected_output, U256::from(65_000_000_000u64));
    assert_eq!(quote.minimum_output, quote.expected_output);
    assert!(quote.streaming_swap);
}

#[tokio::test]
async fn test_non_decimal_output_rejected() {
    let node = MockNode::healthy(
        healthy_inbound(),
        json!({ "memo": "=:BTC.BTC:bc1qdest", "expected_amount_out": "0x1ca6" }),
    )
    .await;
    let venue = venue(vec![node.base_url.clone()]);
    assert!(matches!(
        venue.get_quote(&eth_to_btc()).await,
        Err(ProviderError::InvalidAmount {
            field: "expected_amount_out",
            ..
        })
    ));
}

#[tokio::test]
async fn test_failover_in_order() {
    let dead = dead_endpoint().await;
    let broken = MockNode::failing(StatusCode::SERVICE_UNAVAILABLE).await;
    let good = MockNode::healthy(healthy_inbound(), eth_btc_quote()).await;
    let spare = MockNode::healthy(healthy_inbound(), eth_btc_quote()).await;
    let venue = venue(vec![
        dead,
        broken.base_url.clone(),
        good.base_url.clone(),
        spare.base_url.clone(),
    ]);

    let quote = venue.get_quote(&eth_to_btc()).await.unwrap();
    assert_eq!(quote.expected_output, U256::from(7_350u64));
    assert_eq!(broken.hits(), 1);
    assert_eq!(good.hits(), 1);
    assert_eq!(spare.hits(), 0);
}

#[tokio::test]
async fn test_client_error_is_terminal() {
    let rejecting = MockNode::spawn(
        NodeReply::ok(healthy_inbound()),
        NodeReply::error(StatusCode::BAD_REQUEST, "amount less than dust threshold"),
    )
    .await;
    let good = MockNode::healthy(healthy_inbound(), eth_btc_quote()).await;
    let venue = venue(vec![rejecting.base_url.clone(), good.base_url.clone()]);

    match venue.get_quote(&eth_to_btc()).await {
        Err(ProviderError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "amount less than dust threshold");
        }
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(good.hits(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_terminal() {
    let garbled = MockNode::spawn(
        NodeReply::Raw(StatusCode::OK, "<html>gateway</html>"),
        NodeReply::Raw(StatusCode::OK, "<html>gateway</html>"),
    )
    .await;
    let good = MockNode::healthy(healthy_inbound(), eth_btc_quote()).await;
    let venue = venue(vec![garbled.base_url.clone(), good.base_url.clone()]);

    assert!(matches!(
        venue.get_status("Bitcoin").await,
        Err(ProviderError::Decode(_))
    ));
    assert_eq!(good.hits(), 0);
}

#[tokio::test]
async fn test_exhausted_endpoints_list_attempts() {
    let a = MockNode::failing(StatusCode::INTERNAL_SERVER_ERROR).await;
    let b = MockNode::failing(StatusCode::BAD_GATEWAY).await;
    let venue = venue(vec![a.base_url.clone(), b.base_url.clone()]);

    match venue.get_status("Bitcoin").await {
        Err(ProviderError::EndpointsExhausted { attempts }) => {
            assert_eq!(attempts.len(), 2);
            assert!(attempts[0].starts_with(&a.base_url));
            assert!(attempts[1].contains("502"));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn test_mayachain_uses_its_own_path() {
    let node = MockNode::healthy(
        json!([{ "chain": "DASH", "address": "Xvault", "halted": false }]),
        json!({}),
    )
    .await;
    let venue = mayachain::venue(&NodeConfig::with_endpoints(vec![node.base_url.clone()])).unwrap();
    assert!(venue.is_available("Dash").await.unwrap());
    assert!(venue.is_available("MayaChain").await.unwrap());
}

#[tokio::test]
async fn test_router_falls_back_from_halted_thorchain_to_mayachain() {
    let halted = json!([
        { "chain": "ETH", "address": "0xvault", "halted": true },
        { "chain": "BTC", "address": "bc1qvault", "halted": false }
    ]);
    let thor = MockNode::healthy(halted, eth_btc_quote()).await;
    let maya = MockNode::healthy(
        json!([
            { "chain": "ETH", "address": "0x1c8b5f1f8d1e36a8a6d9a48a7b0f0b7d2e3f4a5b", "halted": false },
            { "chain": "BTC", "address": "bc1qmaya", "halted": false }
        ]),
        eth_btc_quote(),
    )
    .await;

    let config = RouterConfig {
        thorchain: NodeConfig::with_endpoints(vec![thor.base_url.clone()]),
        mayachain: NodeConfig::with_endpoints(vec![maya.base_url.clone()]),
        ..RouterConfig::default()
    };
    let router = Router::with_default_providers(&config).unwrap();

    let quote = router.get_quote(&eth_to_btc()).await.unwrap();
    assert_eq!(quote.provider, ProviderId::Mayachain);
    // one inbound lookup on THORChain, then inbound x2 + quote on Mayachain
    assert_eq!(thor.hits(), 1);
    assert_eq!(maya.hits(), 3);

    let err = router
        .quote_from(ProviderId::Thorchain, &eth_to_btc())
        .await
        .unwrap_err();
    assert!(matches!(err, RouterError::ProviderUnavailable { .. }));
}
