// Router HTTP API implementation
// This file provides HTTP endpoints for provider listing, route discovery,
// quoting, bundle building and venue status
//
// Numan Thabit 2025 Nov

use crate::errors::RouterError;
use crate::metrics;
use crate::router::routes::RouteResult;
use crate::service::{BundleParams, QuoteParams, RouteParams, ServiceError, SwapService};
use crate::types::{ProviderStatus, Quote, SwapBundle};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::UnknownProvider(_) => StatusCode::NOT_FOUND,
        ServiceError::Router(err) => match err {
            RouterError::NoRouteAvailable { .. } | RouterError::ProviderNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            RouterError::NoProvidersConfigured | RouterError::ProviderUnavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            RouterError::Provider { .. } | RouterError::Rpc(_) => StatusCode::BAD_GATEWAY,
            RouterError::UnknownChain(_)
            | RouterError::MissingApprovalSpender
            | RouterError::MissingApprovalAmount
            | RouterError::MissingTokenAddress
            | RouterError::NonceUnavailable(_)
            | RouterError::NonceOverflow(_)
            | RouterError::Calldata(_) => StatusCode::BAD_REQUEST,
        },
    }
}

fn api_error(err: ServiceError) -> ApiError {
    let status = status_for(&err);
    if status.is_server_error() {
        warn!(status = status.as_u16(), error = %err, "request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Create the HTTP router with API endpoints
pub fn create_api_router(service: SwapService) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_text))
        .route("/api/v1/providers", get(list_providers))
        .route("/api/v1/route", post(find_route))
        .route("/api/v1/quote", post(quote))
        .route("/api/v1/bundle", post(bundle))
        .route("/api/v1/status/:provider/:chain", get(provider_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

async fn metrics_text() -> Response {
    match metrics::render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(err) => {
            warn!(error = %err, "metrics encoding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn list_providers(State(service): State<SwapService>) -> Json<Vec<&'static str>> {
    Json(service.providers())
}

async fn find_route(
    State(service): State<SwapService>,
    Json(params): Json<RouteParams>,
) -> Result<Json<RouteResult>, ApiError> {
    service.route(&params).await.map(Json).map_err(api_error)
}

async fn quote(
    State(service): State<SwapService>,
    Json(params): Json<QuoteParams>,
) -> Result<Json<Quote>, ApiError> {
    service.quote(&params).await.map(Json).map_err(api_error)
}

async fn bundle(
    State(service): State<SwapService>,
    Json(params): Json<BundleParams>,
) -> Result<Json<SwapBundle>, ApiError> {
    service.bundle(params).await.map(Json).map_err(api_error)
}

async fn provider_status(
    State(service): State<SwapService>,
    Path((provider, chain)): Path<(String, String)>,
) -> Result<Json<ProviderStatus>, ApiError> {
    service
        .status(&provider, &chain)
        .await
        .map(Json)
        .map_err(api_error)
}
