//! Local THORNode mock
//!
//! Serves `/{network}/inbound_addresses` and `/{network}/quote/swap` from
//! scripted replies on `127.0.0.1:0`, counting hits and recording the last
//! quote query.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// Scripted reply for one endpoint.
#[derive(Debug, Clone)]
pub enum NodeReply {
    Json(StatusCode, Value),
    Raw(StatusCode, &'static str),
}

impl NodeReply {
    pub fn ok(body: Value) -> Self {
        NodeReply::Json(StatusCode::OK, body)
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        NodeReply::Json(status, json!({ "error": message }))
    }

    fn into_response(self) -> Response {
        match self {
            NodeReply::Json(status, body) => (status, Json(body)).into_response(),
            NodeReply::Raw(status, body) => (status, body).into_response(),
        }
    }
}

struct NodeState {
    inbound: NodeReply,
    quote: NodeReply,
    hits: AtomicUsize,
    last_query: Mutex<Option<HashMap<String, String>>>,
}

pub struct MockNode {
    pub base_url: String,
    state: Arc<NodeState>,
    handle: JoinHandle<()>,
}

impl MockNode {
    pub async fn spawn(inbound: NodeReply, quote: NodeReply) -> Self {
        let state = Arc::new(NodeState {
            inbound,
            quote,
            hits: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        });
        let app = Router::new()
            .route("/:network/inbound_addresses", get(inbound_addresses))
            .route("/:network/quote/swap", get(quote_swap))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock node");
        let addr = listener.local_addr().expect("mock node address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock node server");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            handle,
        }
    }

    /// Healthy node with the given inbound records and quote body.
    pub async fn healthy(inbound: Value, quote: Value) -> Self {
        Self::spawn(NodeReply::ok(inbound), NodeReply::ok(quote)).await
    }

    /// Node answering every request with the same status.
    pub async fn failing(status: StatusCode) -> Self {
        let reply = NodeReply::error(status, "mock node failure");
        Self::spawn(reply.clone(), reply).await
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::Relaxed)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.state.last_query.lock().expect("query lock").clone()
    }
}

impl Drop for MockNode {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a port nobody listens on.
pub async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr: SocketAddr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

async fn inbound_addresses(State(state): State<Arc<NodeState>>) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);
    state.inbound.clone().into_response()
}

async fn quote_swap(
    State(state): State<Arc<NodeState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::Relaxed);
    *state.last_query.lock().expect("query lock") = Some(query);
    state.quote.clone().into_response()
}

/// Inbound records with every chain tradable.
pub fn healthy_inbound() -> Value {
    json!([
        {
            "chain": "BTC",
            "address": "bc1qvaultaddress",
            "halted": false,
            "global_trading_paused": false,
            "chain_trading_paused": false,
            "gas_rate": "12",
            "dust_threshold": "10000"
        },
        {
            "chain": "ETH",
            "address": "0x1c8b5f1f8d1e36a8a6d9a48a7b0f0b7d2e3f4a5b",
            "router": "0xd37bbe5744d730a1d98d8dc97c42f0ca46ad7146",
            "halted": false,
            "global_trading_paused": false,
            "chain_trading_paused": false,
            "gas_rate": 3
        },
        {
            "chain": "BASE",
            "address": "0x2d2c5f1f8d1e36a8a6d9a48a7b0f0b7d2e3f4a5c",
            "router": "0x68208d3f1b6a3c5b6f6a1d1e5f0f2a7c9e2b4d11",
            "halted": false,
            "global_trading_paused": false,
            "chain_trading_paused": false
        }
    ])
}

/// Quote for ETH.ETH -> BTC.BTC.
pub fn eth_btc_quote() -> Value {
    json!({
        "inbound_address": "0x1c8b5f1f8d1e36a8a6d9a48a7b0f0b7d2e3f4a5b",
        "router": "0xd37bbe5744d730a1d98d8dc97c42f0ca46ad7146",
        "expiry": 1735689600,
        "memo": "=:BTC.BTC:bc1qdest:0/3/0",
        "expected_amount_out": "7350",
        "max_streaming_quantity": 0,
        "streaming_swap_blocks": 0
    })
}
