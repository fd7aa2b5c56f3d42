pub mod constants;
pub mod contract_rpc;
pub mod enums;
pub mod ethers_rpc;
pub mod http_providers;
pub mod networks;
