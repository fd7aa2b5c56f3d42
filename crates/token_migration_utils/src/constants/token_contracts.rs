use std::{collections::HashMap, str::FromStr};

use ethers::{
    prelude::Lazy,
    types::{Address, U256},
};
use provider_utils::enums::ENetwork;

use super::ZERO_ADDRESS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenContracts {
    pub legacy_token: Address,
    pub token: Address,
    pub legacy_total_supply: U256,
}

impl TokenContracts {
    pub fn is_configured(&self) -> bool {
        self.legacy_token != *ZERO_ADDRESS && self.token != *ZERO_ADDRESS
    }
}

/// 11,000,000 REP with 18 decimals
pub static REP_TOTAL_SUPPLY: Lazy<U256> =
    Lazy::new(|| U256::exp10(18) * U256::from(11_000_000u64));

/// Known deployments. Zero addresses must be supplied through the env.
pub static TOKEN_CONTRACTS: Lazy<HashMap<ENetwork, TokenContracts>> = Lazy::new(|| {
    HashMap::from([
        (
            ENetwork::EthMainnet,
            TokenContracts {
                legacy_token: Address::from_str("0xE94327D07Fc17907b4DB788E5aDf2ed424adDff6")
                    .unwrap(),
                token: Address::from_str("0x1985365e9f78359a9B6AD760e32412f4a445E862").unwrap(),
                legacy_total_supply: *REP_TOTAL_SUPPLY,
            },
        ),
        (
            ENetwork::EthSepolia,
            TokenContracts {
                legacy_token: *ZERO_ADDRESS,
                token: *ZERO_ADDRESS,
                legacy_total_supply: *REP_TOTAL_SUPPLY,
            },
        ),
        (
            ENetwork::Localhost,
            TokenContracts {
                legacy_token: *ZERO_ADDRESS,
                token: *ZERO_ADDRESS,
                legacy_total_supply: *REP_TOTAL_SUPPLY,
            },
        ),
    ])
});
