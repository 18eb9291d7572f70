// Static chain tables
// EVM chain ids, per-venue chain-name -> network-code tables and
// per-venue chain whitelists used by the route predicates
//
// Numan Thabit 2025 Nov

/// Broad execution family of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    Evm(u64),
    Utxo,
    Cosmos,
    Solana,
    Other,
}

const EVM_CHAINS: &[(&str, u64)] = &[
    ("Ethereum", 1),
    ("BSC", 56),
    ("Polygon", 137),
    ("Avalanche", 43114),
    ("Arbitrum", 42161),
    ("Optimism", 10),
    ("Base", 8453),
];

const NON_EVM_CHAINS: &[(&str, ChainKind)] = &[
    ("Bitcoin", ChainKind::Utxo),
    ("BitcoinCash", ChainKind::Utxo),
    ("Litecoin", ChainKind::Utxo),
    ("Dogecoin", ChainKind::Utxo),
    ("Dash", ChainKind::Utxo),
    ("Zcash", ChainKind::Utxo),
    ("THORChain", ChainKind::Cosmos),
    ("MayaChain", ChainKind::Cosmos),
    ("Cosmos", ChainKind::Cosmos),
    ("Kujira", ChainKind::Cosmos),
    ("Solana", ChainKind::Solana),
    ("Ripple", ChainKind::Other),
    ("Radix", ChainKind::Other),
];

/// THORChain chain name -> network code.
pub const THORCHAIN_NETWORKS: &[(&str, &str)] = &[
    ("Bitcoin", "BTC"),
    ("Ethereum", "ETH"),
    ("BSC", "BSC"),
    ("Avalanche", "AVAX"),
    ("Base", "BASE"),
    ("BitcoinCash", "BCH"),
    ("Litecoin", "LTC"),
    ("Dogecoin", "DOGE"),
    ("Cosmos", "GAIA"),
    ("THORChain", "THOR"),
    ("Ripple", "XRP"),
];

/// Mayachain chain name -> network code.
pub const MAYACHAIN_NETWORKS: &[(&str, &str)] = &[
    ("Bitcoin", "BTC"),
    ("Ethereum", "ETH"),
    ("Arbitrum", "ARB"),
    ("Dash", "DASH"),
    ("Kujira", "KUJI"),
    ("MayaChain", "MAYA"),
    ("THORChain", "THOR"),
    ("Zcash", "ZEC"),
    ("Radix", "XRD"),
];

pub const LIFI_CHAINS: &[&str] = &[
    "Ethereum",
    "BSC",
    "Polygon",
    "Avalanche",
    "Arbitrum",
    "Optimism",
    "Base",
    "Solana",
];

pub const ONEINCH_CHAINS: &[&str] = &[
    "Ethereum",
    "BSC",
    "Polygon",
    "Avalanche",
    "Arbitrum",
    "Optimism",
    "Base",
];

pub const UNISWAP_CHAINS: &[&str] = &["Ethereum", "Polygon", "Arbitrum", "Optimism", "Base"];

pub const JUPITER_CHAINS: &[&str] = &["Solana"];

pub fn chain_kind(chain: &str) -> Option<ChainKind> {
    if let Some(id) = evm_chain_id(chain) {
        return Some(ChainKind::Evm(id));
    }
    NON_EVM_CHAINS
        .iter()
        .find(|(name, _)| *name == chain)
        .map(|(_, kind)| *kind)
}

pub fn evm_chain_id(chain: &str) -> Option<u64> {
    EVM_CHAINS
        .iter()
        .find(|(name, _)| *name == chain)
        .map(|(_, id)| *id)
}

pub fn is_evm(chain: &str) -> bool {
    evm_chain_id(chain).is_some()
}

/// Looks up a chain's network code in a venue table.
pub fn network_code(table: &[(&'static str, &'static str)], chain: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == chain)
        .map(|(_, code)| *code)
}
