//! Deposit creation and redemption

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use std::sync::Arc;

use crate::config::BankConfig;
use crate::interest::InterestCalculator;
use crate::traits::*;
use crate::types::*;

/// Deposit manager for the lock/redeem lifecycle
pub struct DepositManager<S: BankStorage> {
    pub(crate) storage: S,
    calculator: InterestCalculator,
    config: BankConfig,
    validator: Arc<dyn DepositValidator>,
}

impl<S: BankStorage> DepositManager<S> {
    /// Create a new deposit manager with custom validator
    pub fn with_validator(
        storage: S,
        config: BankConfig,
        validator: Arc<dyn DepositValidator>,
    ) -> BankResult<Self> {
        config.validate()?;
        Ok(Self {
            storage,
            calculator: InterestCalculator::new(config.rates.clone())?,
            config,
            validator,
        })
    }

    /// Configuration the manager was built with
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Calculator bound to the configured rates
    pub fn calculator(&self) -> &InterestCalculator {
        &self.calculator
    }

    /// Lock `principal` RING for `lock_months` and credit the interest as KTON
    pub async fn deposit(
        &mut self,
        account_id: &str,
        principal: BigDecimal,
        lock_months: u32,
        now: NaiveDateTime,
    ) -> BankResult<DepositReceipt> {
        let request = DepositRequest {
            account_id: account_id.to_string(),
            principal,
            lock_months,
        };
        self.validator.validate_deposit(&request, &self.config)?;

        // Early check against the current snapshot; the storage re-checks the
        // stored balance when it commits.
        let available = self.account_ring(account_id).await?;
        if available < request.principal {
            return Err(BankError::InsufficientFunds {
                required: request.principal,
                available,
            });
        }

        let maturity = self.calculator.maturity(now, lock_months)?;
        let issued_kton = self
            .calculator
            .issued_kton(&request.principal, lock_months);

        let deposit = Deposit::new(
            request.account_id,
            request.principal,
            lock_months,
            issued_kton.clone(),
            now,
            maturity,
        );

        // An account seen for the first time is only persisted if the deposit succeeds
        let account = self.storage.commit_deposit(&deposit).await?;

        log::info!(
            target: "gringotts::bank",
            "deposit created | id={} | account={} | principal={} | months={} | kton={} | maturity={} | ring_left={}",
            deposit.id,
            deposit.account_id,
            deposit.principal,
            lock_months,
            issued_kton,
            maturity,
            account.ring_balance
        );

        Ok(DepositReceipt {
            deposit_id: deposit.id,
            issued_kton,
            maturity,
        })
    }

    /// Redeem a deposit, with a penalty if it has not matured yet
    pub async fn redeem(&mut self, deposit_id: &str, now: NaiveDateTime) -> BankResult<Redemption> {
        let mut deposit = self.get_deposit_required(deposit_id).await?;
        if deposit.is_redeemed() {
            return Err(BankError::AlreadyRedeemed(deposit_id.to_string()));
        }

        let settlement = self.calculator.settle(&deposit, now)?;

        let account = self
            .storage
            .get_account(&deposit.account_id)
            .await?
            .ok_or_else(|| BankError::NotFound(format!("account '{}'", deposit.account_id)))?;
        if account.kton_balance < settlement.kton_burned {
            return Err(BankError::InsufficientKton {
                required: settlement.kton_burned,
                available: account.kton_balance,
            });
        }

        let redemption = Redemption::from_settlement(deposit.id.clone(), &settlement);
        deposit.status = DepositStatus::Redeemed(settlement);

        self.storage.settle_deposit(&deposit).await?;

        if redemption.matured {
            log::info!(
                target: "gringotts::bank",
                "deposit redeemed at maturity | id={} | account={} | returned={}",
                deposit.id,
                deposit.account_id,
                redemption.ring_returned
            );
        } else {
            log::info!(
                target: "gringotts::bank",
                "deposit redeemed early | id={} | account={} | returned={} | penalty={} | kton_burned={}",
                deposit.id,
                deposit.account_id,
                redemption.ring_returned,
                redemption.penalty,
                redemption.kton_burned
            );
        }

        Ok(redemption)
    }

    async fn account_ring(&self, account_id: &str) -> BankResult<BigDecimal> {
        Ok(self
            .storage
            .get_account(account_id)
            .await?
            .map(|account| account.ring_balance)
            .unwrap_or_else(|| BigDecimal::from(0)))
    }

    /// Get a deposit by ID
    pub async fn get_deposit(&self, deposit_id: &str) -> BankResult<Option<Deposit>> {
        self.storage.get_deposit(deposit_id).await
    }

    /// Get a deposit by ID, returning an error if not found
    pub async fn get_deposit_required(&self, deposit_id: &str) -> BankResult<Deposit> {
        self.storage
            .get_deposit(deposit_id)
            .await?
            .ok_or_else(|| BankError::NotFound(format!("deposit '{}'", deposit_id)))
    }

    /// List deposits, optionally for one account
    pub async fn list_deposits(&self, account_id: Option<&str>) -> BankResult<Vec<Deposit>> {
        self.storage.list_deposits(account_id).await
    }
}
