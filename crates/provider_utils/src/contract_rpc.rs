//! Capability used by the migration core to talk to token contracts.
//!
//! The core describes every call with a [`ContractCall`] and hands it to a
//! [`ContractRpc`]; it never signs, encodes or opens connections itself.

use std::time::Duration;

use async_trait::async_trait;
use ethers::{
    abi::{Function, Param, ParamType, StateMutability, Token},
    types::{Address, Bytes, TransactionReceipt, H256},
};
use thiserror::Error;

/// Errors reported by a [`ContractRpc`] implementation.
#[derive(Error, Debug)]
pub enum RpcError {
    /// The call could not be encoded or its output decoded.
    #[error(transparent)]
    Abi(#[from] ethers::abi::Error),
    /// The transaction was rejected before reaching the mempool.
    #[error("transaction could not be sent: {0}")]
    Send(String),
    /// The transaction was sent but waiting for its receipt failed.
    #[error("transaction {tx_hash:?} could not be confirmed: {reason}")]
    Confirmation { tx_hash: H256, reason: String },
    /// The transaction disappeared before being mined.
    #[error("transaction {tx_hash:?} was dropped")]
    Dropped { tx_hash: H256 },
    /// The transaction was mined with a failed status.
    #[error("transaction {tx_hash:?} reverted")]
    Reverted { tx_hash: H256 },
    /// A read-only call failed.
    #[error("call to {function} failed: {reason}")]
    Call { function: String, reason: String },
    /// A read-only call decoded to zero values.
    #[error("call to {0} returned no value")]
    EmptyReturn(String),
    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),
}

/// Descriptor of one contract function invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    pub to: Address,
    pub name: String,
    pub params: Vec<Token>,
    pub signature: Vec<ParamType>,
    pub returns: Vec<ParamType>,
}

impl ContractCall {
    pub fn new(to: Address, name: &str) -> Self {
        Self {
            to,
            name: name.to_string(),
            params: Vec::new(),
            signature: Vec::new(),
            returns: Vec::new(),
        }
    }

    pub fn param(mut self, kind: ParamType, value: Token) -> Self {
        self.signature.push(kind);
        self.params.push(value);
        self
    }

    pub fn returns(mut self, kind: ParamType) -> Self {
        self.returns.push(kind);
        self
    }

    #[allow(deprecated)]
    pub fn to_function(&self) -> Function {
        let to_params = |kinds: &[ParamType]| {
            kinds
                .iter()
                .enumerate()
                .map(|(index, kind)| Param {
                    name: format!("arg{}", index),
                    kind: kind.clone(),
                    internal_type: None,
                })
                .collect::<Vec<_>>()
        };

        Function {
            name: self.name.clone(),
            inputs: to_params(&self.signature),
            outputs: to_params(&self.returns),
            constant: None,
            state_mutability: StateMutability::NonPayable,
        }
    }

    /// Selector followed by the ABI encoded parameters
    pub fn encode(&self) -> Result<Bytes, RpcError> {
        let data = self.to_function().encode_input(&self.params)?;
        Ok(data.into())
    }

    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, RpcError> {
        Ok(self.to_function().decode_output(data)?)
    }
}

#[async_trait]
pub trait ContractRpc: Send + Sync {
    /// Account used as `from` for mutating calls.
    fn coinbase(&self) -> Address;

    /// Submit a mutating call and resolve once it is confirmed on-chain.
    async fn transact(
        &self,
        call: &ContractCall,
        from: Address,
    ) -> Result<TransactionReceipt, RpcError>;

    /// Run a read-only call and resolve with its single return value.
    async fn call_contract_function(&self, call: &ContractCall) -> Result<Token, RpcError>;
}
