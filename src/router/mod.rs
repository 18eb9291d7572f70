// Router module - provider selection and transaction assembly
// This file wires the fallback router, the bundle builder, route types
// and the HTTP facade
//
// Numan Thabit 2025 Nov

pub mod api;
pub mod bundle;
pub mod routes;

#[allow(clippy::module_inception)]
pub mod router;

pub use api::create_api_router;
pub use router::Router;
pub use routes::{ProviderFailure, RouteResult, SkipReason};
