// Configuration management module
// This file handles loading of the service settings from environment
// variables and the library-level router/venue settings derived from them
//
// Numan Thabit 2025 Nov

use crate::venues::{mayachain, thorchain, ProviderId};
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

pub const ENV_PREFIX: &str = "SWAP";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = concat!("swap-aggr/", env!("CARGO_PKG_VERSION"));

/// HTTP settings of one THORNode-compatible venue.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Tried strictly in order.
    pub endpoints: Vec<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl NodeConfig {
    pub fn with_endpoints(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Settings consumed by [`crate::router::Router::with_default_providers`].
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub thorchain: NodeConfig,
    pub mayachain: NodeConfig,
    /// Replaces the built-in priority of the listed venues.
    pub priorities: HashMap<ProviderId, i32>,
}

impl RouterConfig {
    pub fn priority(&self, id: ProviderId) -> i32 {
        self.priorities
            .get(&id)
            .copied()
            .unwrap_or_else(|| id.default_priority())
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            thorchain: NodeConfig::with_endpoints(
                thorchain::DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            ),
            mayachain: NodeConfig::with_endpoints(
                mayachain::DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            ),
            priorities: HashMap::new(),
        }
    }
}

/// Service configuration, read from `SWAP__*` environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP facade bind address, e.g. 0.0.0.0:8080
    pub listen_addr: Option<String>,
    /// Comma-separated THORNode base URLs overriding the public defaults
    pub thorchain_endpoints: Option<Vec<Url>>,
    /// Comma-separated Mayanode base URLs overriding the public defaults
    pub mayachain_endpoints: Option<Vec<Url>>,
    /// Upstream HTTP timeout
    pub http_timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
    /// EVM JSON-RPC URL per chain, e.g. SWAP__EVM_RPC__ETHEREUM
    #[serde(default)]
    pub evm_rpc: HashMap<String, Url>,
    /// Priority override per venue name, e.g. SWAP__PRIORITY__LIFI=0
    #[serde(default)]
    pub priority: HashMap<String, i32>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_environment(Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("thorchain_endpoints")
            .with_list_parse_key("mayachain_endpoints")
            .try_parsing(true)
    }

    fn from_environment(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("read SWAP__* environment")?;
        let app: AppConfig = cfg
            .try_deserialize()
            .context("deserialize SWAP__* settings")?;
        app.validate()?;
        Ok(app)
    }

    fn validate(&self) -> Result<()> {
        for (name, list) in [
            ("SWAP__THORCHAIN_ENDPOINTS", &self.thorchain_endpoints),
            ("SWAP__MAYACHAIN_ENDPOINTS", &self.mayachain_endpoints),
        ] {
            if let Some(list) = list {
                ensure!(!list.is_empty(), "{name} must list at least one endpoint");
            }
        }
        if let Some(ms) = self.http_timeout_ms {
            ensure!(ms > 0, "SWAP__HTTP_TIMEOUT_MS must be positive");
        }
        for name in self.priority.keys() {
            name.parse::<ProviderId>()
                .with_context(|| format!("SWAP__PRIORITY__{}", name.to_uppercase()))?;
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let raw = self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR);
        raw.parse()
            .with_context(|| format!("invalid SWAP__LISTEN_ADDR: {raw}"))
    }

    pub fn router_config(&self) -> RouterConfig {
        let mut router = RouterConfig::default();
        for node in [&mut router.thorchain, &mut router.mayachain] {
            if let Some(ms) = self.http_timeout_ms {
                node.timeout = Duration::from_millis(ms);
            }
            if let Some(agent) = &self.user_agent {
                node.user_agent = agent.clone();
            }
        }
        if let Some(urls) = &self.thorchain_endpoints {
            router.thorchain.endpoints = urls.iter().map(|u| u.to_string()).collect();
        }
        if let Some(urls) = &self.mayachain_endpoints {
            router.mayachain.endpoints = urls.iter().map(|u| u.to_string()).collect();
        }
        router.priorities = self
            .priority
            .iter()
            .filter_map(|(name, priority)| Some((name.parse().ok()?, *priority)))
            .collect();
        router
    }
}
