//! # Gringotts Bank
//!
//! A ledger for the Gringotts Bank deposit model: accounts lock the base token
//! RING for a number of calendar months, receive the derivative token KTON up
//! front, and get their RING back on redemption.
//!
//! ## Features
//!
//! - **KTON issuance**: `principal * unit_interest * months / 10^18`, rounded down
//! - **Time-locked redemption**: full principal at maturity, penalty before it
//! - **Explicit clock**: every time-dependent call takes `now` from the caller
//! - **Settings snapshot**: rates come from a [`SettingsRegistry`] or a JSON [`BankConfig`]
//! - **Storage abstraction**: async [`BankStorage`] trait with an in-memory backend
//!
//! ## Quick Start
//!
//! ```rust
//! use gringotts_bank::{Bank, RateParameters};
//! use gringotts_bank::utils::MemoryStorage;
//!
//! let bank = Bank::new(MemoryStorage::new(), RateParameters::default());
//! assert!(bank.is_ok());
//! ```

pub mod config;
pub mod interest;
pub mod ledger;
pub mod registry;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use interest::*;
pub use ledger::*;
pub use registry::*;
pub use traits::*;
pub use types::*;
