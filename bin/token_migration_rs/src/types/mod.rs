mod chunk_types;
mod migration_config_types;
mod migration_error_types;

pub use chunk_types::*;
pub use migration_config_types::*;
pub use migration_error_types::*;
