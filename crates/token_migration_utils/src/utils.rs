use std::{fmt::LowerHex, fs, path::Path, str::FromStr};

use ethers::{
    signers::{coins_bip39::English, LocalWallet, MnemonicBuilder, WalletError},
    types::Address,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AddressListError {
    #[error("cannot read address list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {value:?} is not an address")]
    InvalidAddress { line: usize, value: String },
}

pub fn load_mnemonic_wallet(mnemonic: &str, index: u32) -> Result<LocalWallet, WalletError> {
    let wallet = MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .index(index)?
        .build()?;
    Ok(wallet)
}

pub fn format_lower_hex(hash: &impl LowerHex) -> String {
    format!("{:#x}", hash)
}

/// One address per line; blank lines are skipped and order is preserved.
pub fn parse_addresses(content: &str) -> Result<Vec<Address>, AddressListError> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, value)| {
            Address::from_str(value).map_err(|_| AddressListError::InvalidAddress {
                line,
                value: value.to_string(),
            })
        })
        .collect()
}

pub fn read_addresses_file(path: impl AsRef<Path>) -> Result<Vec<Address>, AddressListError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| AddressListError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_addresses(&content)
}
