use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::anyhow;
use ethers::types::{Address, U256, U64};
use provider_utils::{enums::ENetwork, networks::NETWORKS};
use token_migration_utils::{
    constants::{TokenContracts, TOKEN_CONTRACTS},
    env::{get_env, get_env_opt, get_env_or, parse_env, parse_value},
};

use crate::types::MigrationConfig;

pub const DEFAULT_ADDRESSES_PER_CHUNK: usize = 100;
pub const DEFAULT_PARALLEL_TRANSACTIONS: usize = 10;
pub const DEFAULT_TX_CONFIRMATIONS: usize = 1;
pub const DEFAULT_ADDRESSES_FILE: &str = "data/all-addresses.txt";

#[derive(Debug, Clone)]
pub struct Env {
    pub listen_network: ENetwork,
    pub chain_id: U64,
    pub is_external_rpc: bool,
    pub tx_confirmations: usize,
    pub addresses_file: PathBuf,
    pub migration: MigrationConfig,
}

impl Env {
    pub fn new() -> anyhow::Result<Self> {
        let network_str = get_env("LISTEN_NETWORK")?;
        let listen_network = ENetwork::from_str(&network_str)
            .map_err(|_| anyhow!("LISTEN_NETWORK {:?} invalid", network_str))?;
        let network_config = NETWORKS
            .get(&listen_network)
            .ok_or_else(|| anyhow!("NETWORKS {:?} not found", listen_network))?;
        let contracts = network_contracts(&listen_network);

        let legacy_total_supply = match get_env_opt("LEGACY_TOTAL_SUPPLY") {
            Some(value) => U256::from_dec_str(value.trim())
                .map_err(|err| anyhow!("LEGACY_TOTAL_SUPPLY {:?} invalid: {}", value, err))?,
            None => contracts.legacy_total_supply,
        };
        let call_timeout = parse_env::<u64>("RPC_CALL_TIMEOUT_SECS", Some(0))
            .map(|secs| (secs > 0).then(|| Duration::from_secs(secs)))?;

        let migration = MigrationConfig {
            legacy_token_address: parse_address_env(
                "LEGACY_TOKEN_ADDRESS",
                contracts.legacy_token,
            )?,
            token_address: parse_address_env("TOKEN_ADDRESS", contracts.token)?,
            legacy_total_supply,
            addresses_per_chunk: parse_env(
                "ADDRESSES_PER_CHUNK",
                Some(DEFAULT_ADDRESSES_PER_CHUNK),
            )?,
            parallel_transactions: parse_env(
                "PARALLEL_TRANSACTIONS",
                Some(DEFAULT_PARALLEL_TRANSACTIONS),
            )?,
            call_timeout,
        };
        migration.validate()?;

        Ok(Self {
            listen_network,
            chain_id: U64::from(network_config.chain_id),
            is_external_rpc: parse_env("USE_EXTERNAL_RPC", Some(false))?,
            tx_confirmations: parse_env("TX_CONFIRMATIONS", Some(DEFAULT_TX_CONFIRMATIONS))?,
            addresses_file: PathBuf::from(get_env_or("ADDRESSES_FILE", DEFAULT_ADDRESSES_FILE)),
            migration,
        })
    }
}

fn parse_address_env(key: &str, default_value: Address) -> anyhow::Result<Address> {
    match get_env_opt(key) {
        Some(value) => Ok(parse_value(key, &value)?),
        None => Ok(default_value),
    }
}

/// Token contract defaults for `network`; unset ones must come from the env.
pub fn network_contracts(network: &ENetwork) -> TokenContracts {
    let contracts = TOKEN_CONTRACTS.get(network).copied().unwrap_or_default();
    if !contracts.is_configured() {
        log::warn!(
            "no token contract defaults for {:?}, LEGACY_TOKEN_ADDRESS and TOKEN_ADDRESS required",
            network
        );
    }
    contracts
}
