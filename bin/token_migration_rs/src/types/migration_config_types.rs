use std::time::Duration;

use ethers::types::{Address, U256};

use super::MigrationError;

/// Immutable settings shared by the migration and verification services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub legacy_token_address: Address,
    pub token_address: Address,
    pub legacy_total_supply: U256,
    pub addresses_per_chunk: usize,
    pub parallel_transactions: usize,
    /// Upper bound for every remote call; `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
}

impl MigrationConfig {
    pub fn validate(&self) -> Result<(), MigrationError> {
        let invalid = |reason: &str| Err(MigrationError::InvalidConfig(reason.to_string()));

        if self.addresses_per_chunk == 0 {
            return invalid("ADDRESSES_PER_CHUNK must be greater than 0");
        }
        if self.parallel_transactions == 0 {
            return invalid("PARALLEL_TRANSACTIONS must be greater than 0");
        }
        if self.legacy_token_address.is_zero() || self.token_address.is_zero() {
            return invalid("legacy and new token addresses must be configured");
        }
        if self.legacy_token_address == self.token_address {
            return invalid("legacy and new token addresses must differ");
        }
        if self.call_timeout == Some(Duration::ZERO) {
            return invalid("RPC_CALL_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }
}
