//! Account and token balance management

use bigdecimal::BigDecimal;
use std::sync::Arc;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{validate_positive_amount, validate_whole_units};

/// Account manager for RING/KTON balances
pub struct AccountManager<S: BankStorage> {
    pub(crate) storage: S,
    validator: Arc<dyn DepositValidator>,
}

impl<S: BankStorage> AccountManager<S> {
    /// Create a new account manager with custom validator
    pub fn with_validator(storage: S, validator: Arc<dyn DepositValidator>) -> Self {
        Self { storage, validator }
    }

    /// Credit newly minted RING, creating the account on first use
    pub async fn mint_ring(&mut self, account_id: &str, amount: BigDecimal) -> BankResult<Account> {
        self.validator.validate_account_id(account_id)?;
        validate_positive_amount(&amount)?;
        validate_whole_units(&amount)?;

        let account = self.storage.credit_ring(account_id, &amount).await?;

        log::info!(
            target: "gringotts::bank",
            "minted RING | account={} | amount={} | balance={}",
            account_id,
            amount,
            account.ring_balance
        );

        Ok(account)
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &str) -> BankResult<Option<Account>> {
        self.storage.get_account(account_id).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> BankResult<Vec<Account>> {
        self.storage.list_accounts().await
    }

    /// RING balance; unknown accounts hold nothing
    pub async fn ring_balance(&self, account_id: &str) -> BankResult<BigDecimal> {
        Ok(self
            .storage
            .get_account(account_id)
            .await?
            .map(|account| account.ring_balance)
            .unwrap_or_else(|| BigDecimal::from(0)))
    }

    /// KTON balance; unknown accounts hold nothing
    pub async fn kton_balance(&self, account_id: &str) -> BankResult<BigDecimal> {
        Ok(self
            .storage
            .get_account(account_id)
            .await?
            .map(|account| account.kton_balance)
            .unwrap_or_else(|| BigDecimal::from(0)))
    }
}
