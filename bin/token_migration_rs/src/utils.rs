use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::anyhow;
use ethers::{
    middleware::SignerMiddleware,
    providers::Middleware,
    signers::{LocalWallet, Signer},
};
use provider_utils::{
    contract_rpc::{ContractRpc, RpcError},
    ethers_rpc::EthersContractRpc,
    http_providers::HttpProviders,
};
use token_migration_utils::{
    env::{get_env_opt, parse_env},
    utils::{load_mnemonic_wallet, read_addresses_file},
};
use tokio::time::timeout;

use crate::constants::Env;

/// Await a remote call, failing with [`RpcError::Timeout`] once `limit` elapses.
pub async fn with_call_timeout<T, F>(limit: Option<Duration>, call: F) -> Result<T, RpcError>
where
    F: Future<Output = Result<T, RpcError>>,
{
    match limit {
        Some(limit) => timeout(limit, call)
            .await
            .map_err(|_| RpcError::Timeout(limit))?,
        None => call.await,
    }
}

/**
 * Build the contract capability for the configured network.
 * A local key (SENDER_PRIVATE_KEY or SENDER_MNEMONIC/SENDER_WALLET_INDEX)
 * signs transactions; otherwise the node's first unlocked account is used.
 */
pub async fn connect_contract_rpc(env: &Env) -> anyhow::Result<Arc<dyn ContractRpc>> {
    let http_provider = Arc::new(
        HttpProviders::get_healthy_provider(&env.listen_network, env.is_external_rpc).await?,
    );

    if let Some(wallet) = load_sender_wallet()? {
        let wallet = wallet.with_chain_id(env.chain_id.as_u64());
        let coinbase = wallet.address();
        log::info!("sending transactions from local wallet {:?}", coinbase);
        let signer = SignerMiddleware::new(http_provider, wallet);
        return Ok(Arc::new(
            EthersContractRpc::new(Arc::new(signer), coinbase)
                .with_confirmations(env.tx_confirmations),
        ));
    }

    let accounts = http_provider.get_accounts().await?;
    let coinbase = *accounts
        .first()
        .ok_or_else(|| anyhow!("node exposes no unlocked account and no sender key is set"))?;
    log::info!("sending transactions from node coinbase {:?}", coinbase);
    Ok(Arc::new(
        EthersContractRpc::new(http_provider, coinbase).with_confirmations(env.tx_confirmations),
    ))
}

fn load_sender_wallet() -> anyhow::Result<Option<LocalWallet>> {
    if let Some(private_key) = get_env_opt("SENDER_PRIVATE_KEY") {
        return Ok(Some(private_key.trim().parse::<LocalWallet>()?));
    }
    if let Some(mnemonic) = get_env_opt("SENDER_MNEMONIC") {
        let index: u32 = parse_env("SENDER_WALLET_INDEX", Some(0))?;
        return Ok(Some(load_mnemonic_wallet(&mnemonic, index)?));
    }
    Ok(None)
}

pub fn load_addresses(env: &Env) -> anyhow::Result<Vec<ethers::types::Address>> {
    let addresses = read_addresses_file(&env.addresses_file)?;
    log::info!(
        "Loaded {} addresses from {}",
        addresses.len(),
        env.addresses_file.display()
    );
    Ok(addresses)
}

pub fn elapsed_minutes(start_time: Instant) -> f64 {
    start_time.elapsed().as_secs_f64() / 60.0
}

/// Log the time elapsed since `start_time`, whatever `result` holds, and hand it back.
pub fn log_elapsed<T, E>(start_time: Instant, result: Result<T, E>) -> Result<T, E> {
    log::info!("Time elapsed: {:.2} minutes", elapsed_minutes(start_time));
    result
}
