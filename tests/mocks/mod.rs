//! Shared mocks for integration tests
//!
//! Call-counting providers, a scripted nonce source and a local THORNode
//! server speaking the inbound/quote endpoints.

pub mod node_server;
pub mod providers;

#[allow(unused_imports)]
pub use node_server::{MockNode, NodeReply};
#[allow(unused_imports)]
pub use providers::{MockNonceSource, MockProvider, QuoteBehavior, ROUTER};
