//! Core types and data structures for the bank ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed-point base of the unit interest rate (10^18)
pub const SCALE_FACTOR: u64 = 1_000_000_000_000_000_000;

/// Smallest units in one whole RING or KTON
pub const COIN: u64 = 1_000_000_000_000_000_000;

/// The fixed-point base as a decimal
pub fn scale() -> BigDecimal {
    BigDecimal::from(SCALE_FACTOR)
}

/// `n` whole coins expressed in smallest units
pub fn coins(n: u64) -> BigDecimal {
    BigDecimal::from(n) * BigDecimal::from(COIN)
}

/// Interest and penalty parameters, snapshotted from the settings registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateParameters {
    /// KTON issued per RING per month, scaled by 10^18
    pub unit_interest: BigDecimal,
    /// Multiplier applied to the unserved share of the principal on early redemption
    pub penalty_multiplier: u32,
}

impl RateParameters {
    /// Create rate parameters, rejecting values the bank cannot operate with
    pub fn new(unit_interest: BigDecimal, penalty_multiplier: u32) -> BankResult<Self> {
        let rates = Self {
            unit_interest,
            penalty_multiplier,
        };
        rates.validate()?;
        Ok(rates)
    }

    /// Validate the parameters
    pub fn validate(&self) -> BankResult<()> {
        if self.unit_interest <= BigDecimal::from(0) {
            return Err(BankError::InvalidParameters(
                "Unit interest rate must be positive".to_string(),
            ));
        }

        if !self.unit_interest.is_integer() {
            return Err(BankError::InvalidParameters(
                "Unit interest rate must be a fixed-point integer".to_string(),
            ));
        }

        if self.penalty_multiplier < 1 {
            return Err(BankError::InvalidParameters(
                "Penalty multiplier must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for RateParameters {
    /// The values the settings registry is initialized with on deployment
    fn default() -> Self {
        Self {
            unit_interest: BigDecimal::from(1015u64 * 1_000_000_000_000_000),
            penalty_multiplier: 3,
        }
    }
}

/// Token balances held by one address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Address-like identifier
    pub id: String,
    /// Spendable RING
    pub ring_balance: BigDecimal,
    /// KTON issued to this account
    pub kton_balance: BigDecimal,
}

impl Account {
    /// Create an account with empty balances
    pub fn new(id: String) -> Self {
        Self {
            id,
            ring_balance: BigDecimal::from(0),
            kton_balance: BigDecimal::from(0),
        }
    }

    /// Add RING to the balance
    pub fn credit_ring(&mut self, amount: &BigDecimal) {
        self.ring_balance += amount;
    }

    /// Remove RING, failing without side effects if the balance is short
    pub fn debit_ring(&mut self, amount: &BigDecimal) -> BankResult<()> {
        if self.ring_balance < *amount {
            return Err(BankError::InsufficientFunds {
                required: amount.clone(),
                available: self.ring_balance.clone(),
            });
        }
        self.ring_balance -= amount;
        Ok(())
    }

    /// Add newly issued KTON to the balance
    pub fn credit_kton(&mut self, amount: &BigDecimal) {
        self.kton_balance += amount;
    }

    /// Burn KTON, failing without side effects if the balance is short
    pub fn burn_kton(&mut self, amount: &BigDecimal) -> BankResult<()> {
        if self.kton_balance < *amount {
            return Err(BankError::InsufficientKton {
                required: amount.clone(),
                available: self.kton_balance.clone(),
            });
        }
        self.kton_balance -= amount;
        Ok(())
    }
}

/// Amounts settled when a deposit is redeemed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// When the redemption happened
    pub redeemed_at: NaiveDateTime,
    /// RING credited back to the owner
    pub ring_returned: BigDecimal,
    /// RING withheld as penalty (zero once matured)
    pub penalty: BigDecimal,
    /// KTON burned from the owner (zero once matured)
    pub kton_burned: BigDecimal,
    /// Whether the deposit had reached maturity
    pub matured: bool,
}

/// Lifecycle of a deposit. `Redeemed` is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DepositStatus {
    Active,
    Redeemed(Settlement),
}

/// Time-locked RING deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    /// Unique identifier for the deposit
    pub id: String,
    /// Owning account
    pub account_id: String,
    /// Locked RING
    pub principal: BigDecimal,
    /// Lock duration in calendar months
    pub lock_months: u32,
    /// KTON credited when the deposit was made
    pub issued_kton: BigDecimal,
    pub created_at: NaiveDateTime,
    /// `created_at` plus `lock_months` calendar months
    pub maturity: NaiveDateTime,
    pub status: DepositStatus,
}

impl Deposit {
    /// Create a new active deposit with a fresh identifier
    pub fn new(
        account_id: String,
        principal: BigDecimal,
        lock_months: u32,
        issued_kton: BigDecimal,
        created_at: NaiveDateTime,
        maturity: NaiveDateTime,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id,
            principal,
            lock_months,
            issued_kton,
            created_at,
            maturity,
            status: DepositStatus::Active,
        }
    }

    /// Whether the deposit has already been settled
    pub fn is_redeemed(&self) -> bool {
        matches!(self.status, DepositStatus::Redeemed(_))
    }

    /// Whether the deposit can be redeemed without penalty at `now`
    pub fn is_mature(&self, now: NaiveDateTime) -> bool {
        now >= self.maturity
    }

    /// Settlement details, if the deposit has been redeemed
    pub fn settlement(&self) -> Option<&Settlement> {
        match &self.status {
            DepositStatus::Active => None,
            DepositStatus::Redeemed(settlement) => Some(settlement),
        }
    }
}

/// Result of a successful deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositReceipt {
    pub deposit_id: String,
    pub issued_kton: BigDecimal,
    pub maturity: NaiveDateTime,
}

/// Result of a successful redemption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redemption {
    pub deposit_id: String,
    /// Net RING credited back
    pub ring_returned: BigDecimal,
    /// RING withheld, zero for matured deposits
    pub penalty: BigDecimal,
    /// KTON burned, zero for matured deposits
    pub kton_burned: BigDecimal,
    pub matured: bool,
}

impl Redemption {
    pub(crate) fn from_settlement(deposit_id: String, settlement: &Settlement) -> Self {
        Self {
            deposit_id,
            ring_returned: settlement.ring_returned.clone(),
            penalty: settlement.penalty.clone(),
            kton_burned: settlement.kton_burned.clone(),
            matured: settlement.matured,
        }
    }
}

/// Errors that can occur in the bank
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Insufficient RING: required {required}, available {available}")]
    InsufficientFunds {
        required: BigDecimal,
        available: BigDecimal,
    },
    #[error("Insufficient KTON: required {required}, available {available}")]
    InsufficientKton {
        required: BigDecimal,
        available: BigDecimal,
    },
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Deposit already redeemed: {0}")]
    AlreadyRedeemed(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for bank operations
pub type BankResult<T> = Result<T, BankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates_match_registry_initialization() {
        let rates = RateParameters::default();
        assert_eq!(
            rates.unit_interest,
            BigDecimal::from(1015) * BigDecimal::from(1_000_000_000_000_000u64)
        );
        assert_eq!(rates.penalty_multiplier, 3);
        assert!(rates.validate().is_ok());
    }

    #[test]
    fn test_rate_validation() {
        assert!(matches!(
            RateParameters::new(BigDecimal::from(0), 3),
            Err(BankError::InvalidParameters(_))
        ));
        assert!(matches!(
            RateParameters::new(BigDecimal::from(-5), 3),
            Err(BankError::InvalidParameters(_))
        ));
        assert!(matches!(
            RateParameters::new("1.5".parse().unwrap(), 3),
            Err(BankError::InvalidParameters(_))
        ));
        assert!(matches!(
            RateParameters::new(BigDecimal::from(1), 0),
            Err(BankError::InvalidParameters(_))
        ));
        assert!(RateParameters::new(BigDecimal::from(1), 1).is_ok());
    }

    #[test]
    fn test_account_debit_is_all_or_nothing() {
        let mut account = Account::new("alice".to_string());
        account.credit_ring(&BigDecimal::from(50));

        let err = account.debit_ring(&BigDecimal::from(80)).unwrap_err();
        assert!(matches!(err, BankError::InsufficientFunds { .. }));
        assert_eq!(account.ring_balance, BigDecimal::from(50));

        account.debit_ring(&BigDecimal::from(50)).unwrap();
        assert_eq!(account.ring_balance, BigDecimal::from(0));

        let err = account.burn_kton(&BigDecimal::from(1)).unwrap_err();
        assert!(matches!(err, BankError::InsufficientKton { .. }));
    }

    #[test]
    fn test_coins() {
        assert_eq!(
            coins(100),
            BigDecimal::from(100) * BigDecimal::from(1_000_000_000_000_000_000u64)
        );
    }
}
