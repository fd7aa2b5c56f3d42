use std::sync::Arc;

use async_trait::async_trait;
use ethers::{
    abi::Token,
    providers::Middleware,
    types::{
        transaction::eip2718::TypedTransaction, Address, TransactionReceipt, TransactionRequest,
        U64,
    },
};

use crate::contract_rpc::{ContractCall, ContractRpc, RpcError};

/// [`ContractRpc`] over any ethers middleware stack.
///
/// Signing is left to the middleware: wrap the provider in a
/// `SignerMiddleware` for a local key, or pass the bare provider when the
/// node manages the coinbase account.
#[derive(Debug)]
pub struct EthersContractRpc<M> {
    client: Arc<M>,
    coinbase: Address,
    confirmations: usize,
}

impl<M: Middleware + 'static> EthersContractRpc<M> {
    pub fn new(client: Arc<M>, coinbase: Address) -> Self {
        Self {
            client,
            coinbase,
            confirmations: 1,
        }
    }

    pub fn with_confirmations(mut self, confirmations: usize) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }
}

#[async_trait]
impl<M: Middleware + 'static> ContractRpc for EthersContractRpc<M> {
    fn coinbase(&self) -> Address {
        self.coinbase
    }

    async fn transact(
        &self,
        call: &ContractCall,
        from: Address,
    ) -> Result<TransactionReceipt, RpcError> {
        let tx = TransactionRequest::new()
            .from(from)
            .to(call.to)
            .data(call.encode()?);

        let pending_tx = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(|err| RpcError::Send(err.to_string()))?;
        let tx_hash = pending_tx.tx_hash();
        log::debug!("{} sent tx_hash={:?}", call.name, tx_hash);

        let tx_receipt = pending_tx
            .confirmations(self.confirmations)
            .await
            .map_err(|err| RpcError::Confirmation {
                tx_hash,
                reason: err.to_string(),
            })?
            .ok_or(RpcError::Dropped { tx_hash })?;

        if tx_receipt.status == Some(U64::zero()) {
            return Err(RpcError::Reverted { tx_hash });
        }

        Ok(tx_receipt)
    }

    async fn call_contract_function(&self, call: &ContractCall) -> Result<Token, RpcError> {
        let tx: TypedTransaction = TransactionRequest::new()
            .to(call.to)
            .data(call.encode()?)
            .into();

        let output = self
            .client
            .call(&tx, None)
            .await
            .map_err(|err| RpcError::Call {
                function: call.name.clone(),
                reason: err.to_string(),
            })?;

        call.decode_output(&output)?
            .into_iter()
            .next()
            .ok_or_else(|| RpcError::EmptyReturn(call.name.clone()))
    }
}
