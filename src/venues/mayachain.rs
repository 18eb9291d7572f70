// Mayachain venue
// Network table, public Mayanode endpoints and constructor for the
// Mayachain memo venue
//
// Numan Thabit 2025 Nov

use crate::chains::MAYACHAIN_NETWORKS;
use crate::config::NodeConfig;
use crate::venues::provider::{ProviderId, ProviderResult};
use crate::venues::thornode::{NodeProtocol, NodeVenue};

pub const DEFAULT_ENDPOINTS: &[&str] = &["https://mayanode.mayachain.info"];

pub const MAYACHAIN: NodeProtocol = NodeProtocol {
    id: ProviderId::Mayachain,
    path: "mayachain",
    networks: MAYACHAIN_NETWORKS,
    home_chain: "MayaChain",
};

pub fn venue(config: &NodeConfig) -> ProviderResult<NodeVenue> {
    NodeVenue::new(MAYACHAIN, config)
}
