use std::sync::Arc;

use ethers::{
    abi::Token,
    types::{Address, U256},
};
use provider_utils::contract_rpc::{ContractCall, ContractRpc};
use token_migration_utils::abi::{balance_of_call, total_supply_call};

use crate::{
    types::{MigrationConfig, MigrationError},
    utils::with_call_timeout,
};

const PROGRESS_LOG_INTERVAL: usize = 1000;

#[derive(Clone)]
pub struct VerificationService {
    config: MigrationConfig,
    rpc: Arc<dyn ContractRpc>,
}

impl VerificationService {
    pub fn new(config: MigrationConfig, rpc: Arc<dyn ContractRpc>) -> Self {
        Self { config, rpc }
    }

    pub async fn total_supply(&self) -> Result<U256, MigrationError> {
        self.read_uint(&total_supply_call(self.config.token_address))
            .await
    }

    /// Legacy and new balances of `address`, read concurrently
    pub async fn balances_of(&self, address: Address) -> Result<(U256, U256), MigrationError> {
        let legacy_call = balance_of_call(self.config.legacy_token_address, address);
        let new_call = balance_of_call(self.config.token_address, address);
        let (legacy_balance, new_balance) =
            tokio::join!(self.read_uint(&legacy_call), self.read_uint(&new_call));
        Ok((legacy_balance?, new_balance?))
    }

    pub async fn verify_address(&self, address: Address) -> Result<(), MigrationError> {
        let (legacy, new) = self.balances_of(address).await?;
        if legacy != new {
            return Err(MigrationError::BalanceMismatch {
                address,
                legacy,
                new,
            });
        }
        Ok(())
    }

    /// Check the aggregate supply, then every address one at a time.
    ///
    /// Stops at the first mismatch; addresses after it are not read.
    pub async fn verify(&self, addresses: &[Address]) -> Result<(), MigrationError> {
        log::info!("Verifying balances match...");
        let total_supply = self.total_supply().await?;
        if total_supply != self.config.legacy_total_supply {
            return Err(MigrationError::SupplyMismatch {
                expected: self.config.legacy_total_supply,
                actual: total_supply,
            });
        }
        log::info!("total supply matches: {}", total_supply);

        for (index, address) in addresses.iter().enumerate() {
            if let Err(err) = self.verify_address(*address).await {
                log::error!("address index {} failed verification: {}", index, err);
                return Err(err);
            }
            if (index + 1) % PROGRESS_LOG_INTERVAL == 0 {
                log::info!("{}/{} addresses verified", index + 1, addresses.len());
            }
        }

        log::info!("all {} address balances match", addresses.len());
        Ok(())
    }

    async fn read_uint(&self, call: &ContractCall) -> Result<U256, MigrationError> {
        let value = with_call_timeout(
            self.config.call_timeout,
            self.rpc.call_contract_function(call),
        )
        .await
        .map_err(|source| MigrationError::Read {
            function: call.name.clone(),
            contract: call.to,
            source,
        })?;

        match value {
            Token::Uint(value) => Ok(value),
            other => Err(MigrationError::UnexpectedReturn {
                function: call.name.clone(),
                value: format!("{:?}", other),
            }),
        }
    }
}
