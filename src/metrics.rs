// Metrics and observability module
// This file registers the Prometheus series for upstream calls and route
// walks and renders the registry in text exposition format
//
// Numan Thabit 2025 Nov

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

pub static REQ_LATENCY: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "swap_request_latency_seconds",
        "latency for upstream calls",
        &["venue", "method"]
    )
    .unwrap()
});

pub static REQ_ERRORS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "swap_request_errors_total",
        "errors by upstream",
        &["venue", "method"]
    )
    .unwrap()
});

/// Route walk outcomes: `selected` for the winner, otherwise the skip reason.
pub static ROUTE_OUTCOMES: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "swap_route_outcomes_total",
        "route walk outcomes per provider",
        &["provider", "outcome"]
    )
    .unwrap()
});

/// Default registry in Prometheus text format.
pub fn render() -> Result<String, prometheus::Error> {
    let mut buf = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
    String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
