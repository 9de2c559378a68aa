//! Ledger module containing balance management and the deposit lifecycle

pub mod account;
pub mod bank;
pub mod deposit;

pub use account::*;
pub use bank::*;
pub use deposit::*;
