//! Persistence module split across logical submodules.

mod connection;
mod debts;
mod error;

pub use connection::DebtStore;
pub use error::StoreError;
