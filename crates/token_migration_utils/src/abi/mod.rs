//! Call descriptors for the token contracts touched by the migration.

use ethers::{
    abi::{ParamType, Token},
    types::Address,
};
use provider_utils::contract_rpc::ContractCall;

pub const MIGRATE_BALANCES: &str = "migrateBalances";
pub const BALANCE_OF: &str = "balanceOf";
pub const TOTAL_SUPPLY: &str = "totalSupply";

/// `migrateBalances(address[])` on the new token, copying each holder's
/// legacy balance.
pub fn migrate_balances_call(token: Address, holders: &[Address]) -> ContractCall {
    let holders = holders.iter().copied().map(Token::Address).collect();
    ContractCall::new(token, MIGRATE_BALANCES).param(
        ParamType::Array(Box::new(ParamType::Address)),
        Token::Array(holders),
    )
}

pub fn balance_of_call(token: Address, holder: Address) -> ContractCall {
    ContractCall::new(token, BALANCE_OF)
        .param(ParamType::Address, Token::Address(holder))
        .returns(ParamType::Uint(256))
}

pub fn total_supply_call(token: Address) -> ContractCall {
    ContractCall::new(token, TOTAL_SUPPLY).returns(ParamType::Uint(256))
}
