//! In-memory settings registry
//!
//! Mirrors the key/value registry the bank reads its parameters from on
//! deployment. The bank only ever takes a snapshot of it.

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::*;

/// Registry key of the unit interest rate
pub const UINT_BANK_UNIT_INTEREST: &str = "UINT_BANK_UNIT_INTEREST";
/// Registry key of the penalty multiplier
pub const UINT_BANK_PENALTY_MULTIPLIER: &str = "UINT_BANK_PENALTY_MULTIPLIER";

/// Unsigned integer settings keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsRegistry {
    uints: HashMap<String, BigDecimal>,
}

impl SettingsRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the bank settings used on deployment
    pub fn with_bank_defaults() -> Self {
        let defaults = RateParameters::default();
        let mut registry = Self::new();
        registry
            .uints
            .insert(UINT_BANK_UNIT_INTEREST.to_string(), defaults.unit_interest);
        registry.uints.insert(
            UINT_BANK_PENALTY_MULTIPLIER.to_string(),
            BigDecimal::from(defaults.penalty_multiplier),
        );
        registry
    }

    /// Set an unsigned integer setting
    pub fn set_uint(&mut self, key: &str, value: BigDecimal) -> BankResult<()> {
        if value < BigDecimal::from(0) || !value.is_integer() {
            return Err(BankError::InvalidParameters(format!(
                "Setting '{}' must be an unsigned integer, got {}",
                key, value
            )));
        }
        self.uints.insert(key.to_string(), value);
        Ok(())
    }

    /// Read an unsigned integer setting; unset keys read as zero
    pub fn uint_of(&self, key: &str) -> BigDecimal {
        self.uints
            .get(key)
            .cloned()
            .unwrap_or_else(|| BigDecimal::from(0))
    }

    /// Snapshot the bank rate parameters
    pub fn rate_parameters(&self) -> BankResult<RateParameters> {
        let unit_interest = self.uint_of(UINT_BANK_UNIT_INTEREST);
        let multiplier = self.uint_of(UINT_BANK_PENALTY_MULTIPLIER);

        let penalty_multiplier = multiplier.to_u32().ok_or_else(|| {
            BankError::InvalidParameters(format!(
                "Penalty multiplier {} does not fit a 32-bit counter",
                multiplier
            ))
        })?;

        RateParameters::new(unit_interest, penalty_multiplier)
    }
}
