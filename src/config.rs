//! Bank configuration loaded from JSON

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::*;

/// Longest lock duration the bank accepts, in months
pub const DEFAULT_MAX_LOCK_MONTHS: u32 = 36;

fn default_max_lock_months() -> u32 {
    DEFAULT_MAX_LOCK_MONTHS
}

/// Static configuration of a bank instance
///
/// ```json
/// {
///   "rates": { "unit_interest": "1015000000000000000", "penalty_multiplier": 3 },
///   "max_lock_months": 36
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    pub rates: RateParameters,
    #[serde(default = "default_max_lock_months")]
    pub max_lock_months: u32,
}

impl BankConfig {
    /// Create a configuration with the default lock limit
    pub fn new(rates: RateParameters) -> Self {
        Self {
            rates,
            max_lock_months: DEFAULT_MAX_LOCK_MONTHS,
        }
    }

    /// Parse and validate a configuration from a JSON string
    pub fn from_json_str(json: &str) -> BankResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BankError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> BankResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BankError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    /// Validate the configuration
    pub fn validate(&self) -> BankResult<()> {
        self.rates.validate()?;

        if self.max_lock_months < 1 {
            return Err(BankError::InvalidParameters(
                "Maximum lock duration must be at least one month".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self::new(RateParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[test]
    fn test_config_from_json() {
        let config = BankConfig::from_json_str(
            r#"{
                "rates": { "unit_interest": "1015000000000000000", "penalty_multiplier": 3 },
                "max_lock_months": 12
            }"#,
        )
        .unwrap();

        assert_eq!(config.rates, RateParameters::default());
        assert_eq!(config.max_lock_months, 12);
    }

    #[test]
    fn test_config_default_lock_limit() {
        let config = BankConfig::from_json_str(
            r#"{ "rates": { "unit_interest": "1000", "penalty_multiplier": 1 } }"#,
        )
        .unwrap();

        assert_eq!(config.rates.unit_interest, BigDecimal::from(1000));
        assert_eq!(config.max_lock_months, DEFAULT_MAX_LOCK_MONTHS);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let result = BankConfig::from_json_str(
            r#"{ "rates": { "unit_interest": "0", "penalty_multiplier": 3 } }"#,
        );
        assert!(matches!(result, Err(BankError::InvalidParameters(_))));

        let result = BankConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(BankError::Config(_))));

        let result = BankConfig::from_json_file("/nonexistent/gringotts.json");
        assert!(matches!(result, Err(BankError::Config(_))));
    }
}
