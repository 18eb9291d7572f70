// Venue adapters
// Provider trait, the THORNode-based memo venues and the aggregator
// venues, plus the default provider set
//
// Numan Thabit 2025 Nov

pub mod aggregators;
pub mod contracts;
pub mod mayachain;
pub mod provider;
pub mod thorchain;
pub mod thornode;

use crate::config::RouterConfig;
use aggregators::AggregatorVenue;
use provider::{ProviderResult, SwapProvider};
use std::sync::Arc;

pub use provider::ProviderId;

/// All six venues, ranked by the configured priorities.
pub fn default_providers(config: &RouterConfig) -> ProviderResult<Vec<Arc<dyn SwapProvider>>> {
    let thor = thorchain::venue(&config.thorchain)?;
    let maya = mayachain::venue(&config.mayachain)?;
    let aggregators = [
        AggregatorVenue::lifi(),
        AggregatorVenue::one_inch(),
        AggregatorVenue::jupiter(),
        AggregatorVenue::uniswap(),
    ];

    let mut providers: Vec<Arc<dyn SwapProvider>> = vec![
        Arc::new(thor.with_priority(config.priority(ProviderId::Thorchain))),
        Arc::new(maya.with_priority(config.priority(ProviderId::Mayachain))),
    ];
    for venue in aggregators {
        let priority = config.priority(venue.id());
        providers.push(Arc::new(venue.with_priority(priority)));
    }
    Ok(providers)
}
