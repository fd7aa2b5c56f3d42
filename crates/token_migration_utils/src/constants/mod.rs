mod addresses;
mod token_contracts;

pub use addresses::*;
pub use token_contracts::*;
