mod migration_service;
#[cfg(test)]
pub(crate) mod mock_rpc;
mod verification_service;

pub use migration_service::*;
pub use verification_service::*;
