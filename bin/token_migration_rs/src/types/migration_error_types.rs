use ethers::types::{Address, U256};
use provider_utils::contract_rpc::RpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    /// A chunk's `migrateBalances` transaction was rejected or not confirmed.
    /// Chunks confirmed before it stay migrated.
    #[error("chunk {chunk_index} ({chunk_len} addresses starting at {first_address:?}) failed: {source}")]
    ChunkSubmission {
        chunk_index: usize,
        chunk_len: usize,
        first_address: Address,
        #[source]
        source: RpcError,
    },
    #[error("Inconsistent total supply: expected {expected} got {actual}")]
    SupplyMismatch { expected: U256, actual: U256 },
    #[error("Inconsistent balances for address {address:?}: legacy {legacy} new {new}")]
    BalanceMismatch {
        address: Address,
        legacy: U256,
        new: U256,
    },
    #[error("reading {function} on {contract:?} failed: {source}")]
    Read {
        function: String,
        contract: Address,
        #[source]
        source: RpcError,
    },
    #[error("{function} returned {value:?}, expected a uint")]
    UnexpectedReturn { function: String, value: String },
    #[error("invalid migration config: {0}")]
    InvalidConfig(String),
}
