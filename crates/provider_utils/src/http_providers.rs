use anyhow::{anyhow, Context, Error};
use ethers::providers::{Http, Middleware, Provider};

use crate::{
    constants::{CONNECTION_REFUSED_ERROR_MSG, DESERIALIZATION_ERROR_MSG, HOST_LOOKUP_ERROR_MSG},
    enums::ENetwork,
    networks::NETWORKS,
};

pub struct HttpProviders;

impl HttpProviders {
    pub fn get_providers(
        network: &ENetwork,
        is_external_rpc: bool,
    ) -> anyhow::Result<Vec<Provider<Http>>> {
        let network_config = NETWORKS
            .get(network)
            .ok_or_else(|| anyhow!("NETWORKS {:?} not found", network))?;

        network_config
            .rpc_url
            .urls(is_external_rpc)
            .iter()
            .map(|url| {
                Provider::<Http>::try_from(url.as_str())
                    .with_context(|| format!("invalid rpc url {}", url))
            })
            .collect()
    }

    pub fn get_first_provider(
        network: &ENetwork,
        is_external_rpc: bool,
    ) -> anyhow::Result<Provider<Http>, Error> {
        Self::get_providers(network, is_external_rpc)?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No provider configured for {:?}", network))
    }

    /// First provider answering `eth_blockNumber`, skipping unreachable ones
    pub async fn get_healthy_provider(
        network: &ENetwork,
        is_external_rpc: bool,
    ) -> anyhow::Result<Provider<Http>, Error> {
        let providers = Self::get_providers(network, is_external_rpc)?;

        for provider in providers {
            match provider.get_block_number().await {
                Ok(block_number) => {
                    log::info!(
                        "Provider {:?} is healthy at block {}",
                        provider.url().host(),
                        block_number
                    );
                    return Ok(provider);
                }
                Err(err) => {
                    if Self::is_unavailable(&err.to_string()) {
                        log::info!("Provider {:?} is unavailable !!", provider.url().host());
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }

        Err(anyhow!("All providers failed to retrieve the block number"))
    }

    fn is_unavailable(err_string: &str) -> bool {
        err_string.contains(HOST_LOOKUP_ERROR_MSG)
            || err_string.contains(CONNECTION_REFUSED_ERROR_MSG)
            || err_string.contains(DESERIALIZATION_ERROR_MSG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_one_provider_per_configured_url() {
        let providers = HttpProviders::get_providers(&ENetwork::EthMainnet, false).unwrap();
        assert_eq!(
            providers.len(),
            NETWORKS[&ENetwork::EthMainnet].rpc_url.internal.len()
        );

        let first = HttpProviders::get_first_provider(&ENetwork::Localhost, false).unwrap();
        assert_eq!(first.url().as_str(), "http://127.0.0.1:8545/");
    }

    #[test]
    fn unreachable_node_errors_are_skippable() {
        assert!(HttpProviders::is_unavailable(
            "error sending request: tcp connect error: Connection refused (os error 111)"
        ));
        assert!(!HttpProviders::is_unavailable("execution reverted"));
    }
}
