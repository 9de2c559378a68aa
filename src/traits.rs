//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::config::BankConfig;
use crate::types::*;

/// Storage abstraction for the bank
///
/// This trait allows the bank to work with any storage backend by implementing
/// these methods. Balance changes are applied by the backend against the stored
/// account, so callers never write back a stale snapshot. Each mutating method
/// applies all of its changes or none of them.
#[async_trait]
pub trait BankStorage: Send + Sync {
    /// Save an account, replacing any previous version
    async fn save_account(&mut self, account: &Account) -> BankResult<()>;

    /// Get an account by ID
    async fn get_account(&self, account_id: &str) -> BankResult<Option<Account>>;

    /// List all accounts
    async fn list_accounts(&self) -> BankResult<Vec<Account>>;

    /// Credit RING to an account, creating it on first use
    async fn credit_ring(&mut self, account_id: &str, amount: &BigDecimal) -> BankResult<Account>;

    /// Get a deposit by ID
    async fn get_deposit(&self, deposit_id: &str) -> BankResult<Option<Deposit>>;

    /// List deposits, optionally only those owned by one account
    async fn list_deposits(&self, account_id: Option<&str>) -> BankResult<Vec<Deposit>>;

    /// Store a new deposit, debiting its principal and crediting its issued KTON
    /// to the owner (created on first use).
    ///
    /// Fails with [`BankError::InsufficientFunds`] if the stored RING balance
    /// cannot cover the principal.
    async fn commit_deposit(&mut self, deposit: &Deposit) -> BankResult<Account>;

    /// Store a redeemed deposit, burning and crediting the amounts of its
    /// settlement on the owner account.
    ///
    /// Fails with [`BankError::AlreadyRedeemed`] if the stored deposit has been
    /// redeemed in the meantime, and with [`BankError::InsufficientKton`] if the
    /// stored KTON balance cannot cover the burn.
    async fn settle_deposit(&mut self, deposit: &Deposit) -> BankResult<Account>;
}

/// Parameters of a deposit request
#[derive(Debug, Clone, PartialEq)]
pub struct DepositRequest {
    pub account_id: String,
    pub principal: BigDecimal,
    pub lock_months: u32,
}

/// Trait for implementing custom deposit validation rules
pub trait DepositValidator: Send + Sync {
    /// Validate a deposit request before any state is touched
    fn validate_deposit(&self, request: &DepositRequest, config: &BankConfig) -> BankResult<()>;

    /// Validate an account identifier before it is credited
    fn validate_account_id(&self, account_id: &str) -> BankResult<()>;
}

/// Default deposit validator with the basic rules
pub struct DefaultDepositValidator;

impl DepositValidator for DefaultDepositValidator {
    fn validate_deposit(&self, request: &DepositRequest, config: &BankConfig) -> BankResult<()> {
        self.validate_account_id(&request.account_id)?;

        if request.principal <= BigDecimal::from(0) {
            return Err(BankError::InvalidParameters(
                "Principal must be positive".to_string(),
            ));
        }

        if !request.principal.is_integer() {
            return Err(BankError::InvalidParameters(
                "Principal must be a whole number of smallest units".to_string(),
            ));
        }

        if request.lock_months < 1 {
            return Err(BankError::InvalidParameters(
                "Deposit must be locked for at least one month".to_string(),
            ));
        }

        if request.lock_months > config.max_lock_months {
            return Err(BankError::InvalidParameters(format!(
                "Deposit cannot be locked for more than {} months",
                config.max_lock_months
            )));
        }

        Ok(())
    }

    fn validate_account_id(&self, account_id: &str) -> BankResult<()> {
        if account_id.trim().is_empty() {
            return Err(BankError::InvalidParameters(
                "Account ID cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
