// THORChain venue
// Network table, public THORNode endpoints and constructor for the
// THORChain memo venue
//
// Numan Thabit 2025 Nov

use crate::chains::THORCHAIN_NETWORKS;
use crate::config::NodeConfig;
use crate::venues::provider::{ProviderId, ProviderResult};
use crate::venues::thornode::{NodeProtocol, NodeVenue};

pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://thornode.ninerealms.com",
    "https://thornode.thorchain.liquify.com",
];

pub const THORCHAIN: NodeProtocol = NodeProtocol {
    id: ProviderId::Thorchain,
    path: "thorchain",
    networks: THORCHAIN_NETWORKS,
    home_chain: "THORChain",
};

pub fn venue(config: &NodeConfig) -> ProviderResult<NodeVenue> {
    NodeVenue::new(THORCHAIN, config)
}
