use ethers::prelude::Lazy;
use std::collections::HashMap;

use crate::enums::ENetwork;

#[derive(Debug, Clone, Default)]
pub struct NetworkConfig {
    pub network: ENetwork,
    pub chain_id: u64,
    pub rpc_url: UrlConfig,
}

#[derive(Debug, Clone, Default)]
pub struct UrlConfig {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

impl UrlConfig {
    pub fn urls(&self, is_external_rpc: bool) -> &[String] {
        if is_external_rpc {
            &self.external
        } else {
            &self.internal
        }
    }
}

pub static NETWORKS: Lazy<HashMap<ENetwork, NetworkConfig>> = Lazy::new(|| {
    HashMap::from([
        (
            ENetwork::Localhost,
            NetworkConfig {
                network: ENetwork::Localhost,
                chain_id: 1337,
                rpc_url: UrlConfig {
                    internal: vec!["http://127.0.0.1:8545".to_string()],
                    external: vec!["http://127.0.0.1:8545".to_string()],
                },
            },
        ),
        (
            ENetwork::EthMainnet,
            NetworkConfig {
                network: ENetwork::EthMainnet,
                chain_id: 1,
                rpc_url: UrlConfig {
                    // Local node first, public endpoints as fallback
                    internal: vec![
                        "http://127.0.0.1:8545".to_string(),
                        "https://ethereum-rpc.publicnode.com".to_string(),
                    ],
                    external: vec![
                        "https://ethereum-rpc.publicnode.com".to_string(),
                        "https://eth.llamarpc.com".to_string(),
                    ],
                },
            },
        ),
        (
            ENetwork::EthSepolia,
            NetworkConfig {
                network: ENetwork::EthSepolia,
                chain_id: 11155111,
                rpc_url: UrlConfig {
                    internal: vec![
                        "http://127.0.0.1:8545".to_string(),
                        "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
                    ],
                    external: vec!["https://ethereum-sepolia-rpc.publicnode.com".to_string()],
                },
            },
        ),
    ])
});
