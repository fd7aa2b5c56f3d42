use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex, OnceLock, PoisonError,
};

use ethers::types::{Address, TransactionReceipt};
use futures::future::join_all;
use provider_utils::contract_rpc::{ContractRpc, RpcError};
use token_migration_utils::{abi::migrate_balances_call, utils::format_lower_hex};

use crate::{
    types::{AddressChunk, MigrationConfig, MigrationError},
    utils::with_call_timeout,
};

type ChunkQueue<'a> = Mutex<std::vec::IntoIter<AddressChunk<'a>>>;

#[derive(Clone)]
pub struct MigrationService {
    config: MigrationConfig,
    rpc: Arc<dyn ContractRpc>,
}

impl MigrationService {
    pub fn new(config: MigrationConfig, rpc: Arc<dyn ContractRpc>) -> Self {
        Self { config, rpc }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Split `addresses` into ordered chunks of at most `addresses_per_chunk`.
    ///
    /// Panics when `addresses_per_chunk` is zero; [`MigrationConfig::validate`]
    /// rejects that before a service is built.
    pub fn chunk_addresses(
        addresses: &[Address],
        addresses_per_chunk: usize,
    ) -> Vec<AddressChunk<'_>> {
        assert!(
            addresses_per_chunk > 0,
            "addresses_per_chunk must be greater than 0"
        );
        addresses
            .chunks(addresses_per_chunk)
            .enumerate()
            .map(|(index, addresses)| AddressChunk { index, addresses })
            .collect()
    }

    /// Submit one `migrateBalances` transaction from the coinbase account
    pub async fn migrate_chunk(
        &self,
        chunk: &AddressChunk<'_>,
    ) -> Result<TransactionReceipt, RpcError> {
        let call = migrate_balances_call(self.config.token_address, chunk.addresses);
        let from = self.rpc.coinbase();
        log::info!(
            "migrate chunk {} size {} from {:?} processing",
            chunk.index,
            chunk.len(),
            from
        );

        let tx_receipt =
            with_call_timeout(self.config.call_timeout, self.rpc.transact(&call, from)).await?;
        log::info!(
            "migrate chunk {} success tx_hash={}",
            chunk.index,
            format_lower_hex(&tx_receipt.transaction_hash)
        );
        Ok(tx_receipt)
    }

    /// Migrate every address with at most `parallel_transactions` chunks in flight.
    ///
    /// Returns the first chunk failure. Once it is recorded no further chunk is
    /// started, but transactions already sent are awaited and never reverted:
    /// chunks confirmed before the failure stay migrated. An invalid config
    /// is rejected before anything is submitted.
    pub async fn migrate(&self, addresses: &[Address]) -> Result<(), MigrationError> {
        self.config.validate()?;
        let chunks = Self::chunk_addresses(addresses, self.config.addresses_per_chunk);
        let chunks_count = chunks.len();
        log::info!(
            "Migrating {} addresses in {} chunks, {} parallel transactions",
            addresses.len(),
            chunks_count,
            self.config.parallel_transactions
        );

        let queue: ChunkQueue<'_> = Mutex::new(chunks.into_iter());
        let first_error = OnceLock::new();
        let confirmed = AtomicUsize::new(0);

        let workers_count = self.config.parallel_transactions.min(chunks_count);
        let workers = (0..workers_count)
            .map(|_| self.run_worker(&queue, &first_error, &confirmed, chunks_count));
        join_all(workers).await;

        match first_error.into_inner() {
            Some(err) => {
                log::error!(
                    "migration stopped after {}/{} confirmed chunks: {}",
                    confirmed.load(Ordering::SeqCst),
                    chunks_count,
                    err
                );
                Err(err)
            }
            None => {
                log::info!("all {} chunks migrated", chunks_count);
                Ok(())
            }
        }
    }

    async fn run_worker(
        &self,
        queue: &ChunkQueue<'_>,
        first_error: &OnceLock<MigrationError>,
        confirmed: &AtomicUsize,
        chunks_count: usize,
    ) {
        while let Some(chunk) = Self::next_chunk(queue, first_error) {
            match self.migrate_chunk(&chunk).await {
                Ok(_) => {
                    let confirmed = confirmed.fetch_add(1, Ordering::SeqCst) + 1;
                    log::info!("{}/{} chunks confirmed", confirmed, chunks_count);
                }
                Err(source) => {
                    let err = MigrationError::ChunkSubmission {
                        chunk_index: chunk.index,
                        chunk_len: chunk.len(),
                        first_address: chunk.first_address().unwrap_or_default(),
                        source,
                    };
                    if let Err(err) = first_error.set(err) {
                        log::warn!("in-flight chunk failed after the first error: {}", err);
                    }
                    return;
                }
            }
        }
    }

    // Checked and popped without an await in between, so nothing starts
    // after the first error is recorded.
    fn next_chunk<'a>(
        queue: &ChunkQueue<'a>,
        first_error: &OnceLock<MigrationError>,
    ) -> Option<AddressChunk<'a>> {
        if first_error.get().is_some() {
            return None;
        }
        queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next()
    }
}
