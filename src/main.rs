use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use std::time::Duration;
use swap_aggr::config::{AppConfig, DEFAULT_HTTP_TIMEOUT};
use swap_aggr::router::{create_api_router, Router};
use swap_aggr::service::SwapService;
use swap_aggr::transport::EvmRpc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing().context("initialize tracing subscriber")?;

    if let Err(err) = run().await {
        tracing::error!(error = ?err, "fatal swap router error");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let config = AppConfig::load().context("load configuration from environment")?;
    let listen_addr = config.listen_addr()?;
    let router_config = config.router_config();

    let mut router =
        Router::with_default_providers(&router_config).context("initialize swap providers")?;

    if config.evm_rpc.is_empty() {
        warn!("no SWAP__EVM_RPC__* endpoints; bundles require an explicit nonce");
    } else {
        let timeout = config
            .http_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT);
        let rpc = EvmRpc::new(config.evm_rpc.clone(), timeout)
            .context("initialize EVM JSON-RPC client")?;
        info!(chains = ?rpc.chains().collect::<Vec<_>>(), "EVM nonce source configured");
        router = router.with_nonce_source(Arc::new(rpc));
    }

    let router = Arc::new(router);
    info!(
        providers = ?router.list_providers(),
        thorchain = ?router_config.thorchain.endpoints,
        mayachain = ?router_config.mayachain.endpoints,
        "swap router online"
    );

    let app = create_api_router(SwapService::new(router));
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("bind API server address {listen_addr}"))?;
    info!(address = %listen_addr, "HTTP API server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl_c listener error");
    }
    info!("Shutdown signal received, exiting");
}

fn init_tracing() -> Result<()> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("tracing subscriber init: {err}"))
}
