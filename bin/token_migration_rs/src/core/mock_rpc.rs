//! In-memory token ledgers behind [`ContractRpc`] for service tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use ethers::{
    abi::Token,
    types::{Address, TransactionReceipt, H256, U256, U64},
};
use provider_utils::contract_rpc::{ContractCall, ContractRpc, RpcError};
use token_migration_utils::abi::{BALANCE_OF, MIGRATE_BALANCES, TOTAL_SUPPLY};

use crate::types::MigrationConfig;

pub struct MockContractRpc {
    coinbase: Address,
    legacy_token: Address,
    token: Address,
    legacy_balances: HashMap<Address, U256>,
    balances: Mutex<HashMap<Address, U256>>,
    total_supply: Option<U256>,
    failing_chunks: HashSet<Address>,
    failing_reads: HashSet<Address>,
    chunk_delays: HashMap<Address, Duration>,
    tx_delay: Duration,
    read_delay: Duration,
    txs_in_flight: AtomicUsize,
    max_txs_in_flight: AtomicUsize,
    reads_in_flight: AtomicUsize,
    max_reads_in_flight: AtomicUsize,
    submitted: Mutex<Vec<(Address, Vec<Address>)>>,
    settled: Mutex<Vec<Address>>,
    balance_reads: Mutex<Vec<(Address, Address)>>,
    supply_reads: AtomicUsize,
}

impl MockContractRpc {
    pub fn new(config: &MigrationConfig) -> Self {
        Self {
            coinbase: Address::from_low_u64_be(0xc0ffee),
            legacy_token: config.legacy_token_address,
            token: config.token_address,
            legacy_balances: HashMap::new(),
            balances: Mutex::new(HashMap::new()),
            total_supply: None,
            failing_chunks: HashSet::new(),
            failing_reads: HashSet::new(),
            chunk_delays: HashMap::new(),
            tx_delay: Duration::ZERO,
            read_delay: Duration::ZERO,
            txs_in_flight: AtomicUsize::new(0),
            max_txs_in_flight: AtomicUsize::new(0),
            reads_in_flight: AtomicUsize::new(0),
            max_reads_in_flight: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            settled: Mutex::new(Vec::new()),
            balance_reads: Mutex::new(Vec::new()),
            supply_reads: AtomicUsize::new(0),
        }
    }

    pub fn with_legacy_balances(mut self, holders: &[Address], balance: U256) -> Self {
        for holder in holders {
            self.legacy_balances.insert(*holder, balance);
        }
        self
    }

    pub fn with_legacy_balance(mut self, holder: Address, balance: U256) -> Self {
        self.legacy_balances.insert(holder, balance);
        self
    }

    pub fn with_migrated_balance(self, holder: Address, balance: U256) -> Self {
        self.balances.lock().unwrap().insert(holder, balance);
        self
    }

    /// Fixed `totalSupply` instead of the sum of migrated balances.
    pub fn with_total_supply(mut self, total_supply: U256) -> Self {
        self.total_supply = Some(total_supply);
        self
    }

    /// Revert the chunk starting with `first_address`.
    pub fn with_failing_chunk(mut self, first_address: Address) -> Self {
        self.failing_chunks.insert(first_address);
        self
    }

    pub fn with_failing_read(mut self, holder: Address) -> Self {
        self.failing_reads.insert(holder);
        self
    }

    pub fn with_chunk_delay(mut self, first_address: Address, delay: Duration) -> Self {
        self.chunk_delays.insert(first_address, delay);
        self
    }

    pub fn with_tx_delay(mut self, delay: Duration) -> Self {
        self.tx_delay = delay;
        self
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    pub fn legacy_supply(&self) -> U256 {
        self.legacy_balances
            .values()
            .fold(U256::zero(), |total, balance| total + *balance)
    }

    pub fn migrated_balance(&self, holder: Address) -> U256 {
        self.balances
            .lock()
            .unwrap()
            .get(&holder)
            .copied()
            .unwrap_or_default()
    }

    pub fn submitted_chunks(&self) -> Vec<Vec<Address>> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(_, chunk)| chunk.clone())
            .collect()
    }

    pub fn senders(&self) -> Vec<Address> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|(from, _)| *from)
            .collect()
    }

    /// First address of every chunk whose transaction finished, in finishing order.
    pub fn settled_chunks(&self) -> Vec<Address> {
        self.settled.lock().unwrap().clone()
    }

    pub fn max_txs_in_flight(&self) -> usize {
        self.max_txs_in_flight.load(Ordering::SeqCst)
    }

    pub fn max_reads_in_flight(&self) -> usize {
        self.max_reads_in_flight.load(Ordering::SeqCst)
    }

    /// `(contract, holder)` of every `balanceOf` read, in issue order.
    pub fn balance_reads(&self) -> Vec<(Address, Address)> {
        self.balance_reads.lock().unwrap().clone()
    }

    pub fn supply_reads(&self) -> usize {
        self.supply_reads.load(Ordering::SeqCst)
    }

    fn enter(in_flight: &AtomicUsize, max_in_flight: &AtomicUsize) {
        let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        max_in_flight.fetch_max(current, Ordering::SeqCst);
    }

    fn chunk_addresses(call: &ContractCall) -> Vec<Address> {
        match call.params.first() {
            Some(Token::Array(tokens)) => tokens
                .iter()
                .filter_map(|token| token.clone().into_address())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl ContractRpc for MockContractRpc {
    fn coinbase(&self) -> Address {
        self.coinbase
    }

    async fn transact(
        &self,
        call: &ContractCall,
        from: Address,
    ) -> Result<TransactionReceipt, RpcError> {
        if call.to != self.token || call.name != MIGRATE_BALANCES {
            return Err(RpcError::Send(format!("unexpected call {}", call.name)));
        }
        let chunk = Self::chunk_addresses(call);
        let first_address = chunk.first().copied().unwrap_or_default();
        let tx_index = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push((from, chunk.clone()));
            submitted.len() as u64
        };
        let tx_hash = H256::from_low_u64_be(tx_index);

        Self::enter(&self.txs_in_flight, &self.max_txs_in_flight);
        let delay = self
            .chunk_delays
            .get(&first_address)
            .copied()
            .unwrap_or(self.tx_delay);
        tokio::time::sleep(delay).await;
        self.txs_in_flight.fetch_sub(1, Ordering::SeqCst);
        self.settled.lock().unwrap().push(first_address);

        if self.failing_chunks.contains(&first_address) {
            return Err(RpcError::Reverted { tx_hash });
        }

        let mut balances = self.balances.lock().unwrap();
        for holder in chunk {
            let balance = self
                .legacy_balances
                .get(&holder)
                .copied()
                .unwrap_or_default();
            balances.insert(holder, balance);
        }

        Ok(TransactionReceipt {
            transaction_hash: tx_hash,
            status: Some(U64::one()),
            from,
            to: Some(call.to),
            ..Default::default()
        })
    }

    async fn call_contract_function(&self, call: &ContractCall) -> Result<Token, RpcError> {
        match call.name.as_str() {
            TOTAL_SUPPLY if call.to == self.token => {
                self.supply_reads.fetch_add(1, Ordering::SeqCst);
                let total_supply = self.total_supply.unwrap_or_else(|| {
                    self.balances
                        .lock()
                        .unwrap()
                        .values()
                        .fold(U256::zero(), |total, balance| total + *balance)
                });
                Ok(Token::Uint(total_supply))
            }
            BALANCE_OF => {
                let holder = call
                    .params
                    .first()
                    .and_then(|token| token.clone().into_address())
                    .unwrap_or_default();
                self.balance_reads.lock().unwrap().push((call.to, holder));

                Self::enter(&self.reads_in_flight, &self.max_reads_in_flight);
                tokio::time::sleep(self.read_delay).await;
                self.reads_in_flight.fetch_sub(1, Ordering::SeqCst);

                if self.failing_reads.contains(&holder) {
                    return Err(RpcError::Call {
                        function: call.name.clone(),
                        reason: "execution reverted".to_string(),
                    });
                }
                let balance = if call.to == self.legacy_token {
                    self.legacy_balances.get(&holder).copied()
                } else if call.to == self.token {
                    self.balances.lock().unwrap().get(&holder).copied()
                } else {
                    return Err(RpcError::Call {
                        function: call.name.clone(),
                        reason: format!("no contract at {:?}", call.to),
                    });
                };
                Ok(Token::Uint(balance.unwrap_or_default()))
            }
            _ => Err(RpcError::Call {
                function: call.name.clone(),
                reason: "unknown function".to_string(),
            }),
        }
    }
}
