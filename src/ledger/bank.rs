//! Main bank orchestrator that coordinates accounts and deposits

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::BankConfig;
use crate::ledger::{AccountManager, DepositManager};
use crate::registry::SettingsRegistry;
use crate::traits::*;
use crate::types::*;
use crate::utils::encoding::months_from_payload;

/// The Gringotts bank: RING deposits in, KTON out, RING back on redemption
pub struct Bank<S: BankStorage> {
    account_manager: AccountManager<S>,
    deposit_manager: DepositManager<S>,
}

impl<S: BankStorage + Clone> Bank<S> {
    /// Create a bank with the given storage backend and rate parameters
    pub fn new(storage: S, rates: RateParameters) -> BankResult<Self> {
        Self::from_config(storage, BankConfig::new(rates))
    }

    /// Create a bank from a full configuration
    pub fn from_config(storage: S, config: BankConfig) -> BankResult<Self> {
        Self::with_validator(storage, config, Arc::new(DefaultDepositValidator))
    }

    /// Create a bank from a snapshot of the settings registry
    pub fn from_registry(storage: S, registry: &SettingsRegistry) -> BankResult<Self> {
        Self::new(storage, registry.rate_parameters()?)
    }

    /// Create a bank with a custom validator
    pub fn with_validator(
        storage: S,
        config: BankConfig,
        validator: Arc<dyn DepositValidator>,
    ) -> BankResult<Self> {
        let deposit_manager =
            DepositManager::with_validator(storage.clone(), config, validator.clone())?;

        log::info!(
            target: "gringotts::bank",
            "bank initialized | unit_interest={} | penalty_multiplier={} | max_lock_months={}",
            deposit_manager.config().rates.unit_interest,
            deposit_manager.config().rates.penalty_multiplier,
            deposit_manager.config().max_lock_months
        );

        Ok(Self {
            account_manager: AccountManager::with_validator(storage, validator),
            deposit_manager,
        })
    }

    /// Rate parameters this bank was initialized with
    pub fn rates(&self) -> &RateParameters {
        &self.deposit_manager.config().rates
    }

    /// Full configuration this bank was initialized with
    pub fn config(&self) -> &BankConfig {
        self.deposit_manager.config()
    }

    // Token operations
    /// Credit newly minted RING to an account
    pub async fn mint_ring(&mut self, account_id: &str, amount: BigDecimal) -> BankResult<Account> {
        self.account_manager.mint_ring(account_id, amount).await
    }

    /// RING balance of an account
    pub async fn ring_balance(&self, account_id: &str) -> BankResult<BigDecimal> {
        self.account_manager.ring_balance(account_id).await
    }

    /// KTON balance of an account
    pub async fn kton_balance(&self, account_id: &str) -> BankResult<BigDecimal> {
        self.account_manager.kton_balance(account_id).await
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &str) -> BankResult<Option<Account>> {
        self.account_manager.get_account(account_id).await
    }

    /// List all accounts
    pub async fn list_accounts(&self) -> BankResult<Vec<Account>> {
        self.account_manager.list_accounts().await
    }

    // Deposit operations
    /// Lock RING for a number of months and receive KTON
    pub async fn deposit(
        &mut self,
        account_id: &str,
        principal: BigDecimal,
        lock_months: u32,
        now: NaiveDateTime,
    ) -> BankResult<DepositReceipt> {
        self.deposit_manager
            .deposit(account_id, principal, lock_months, now)
            .await
    }

    /// Deposit through a token transfer whose payload encodes the lock duration
    pub async fn token_fallback(
        &mut self,
        from: &str,
        amount: BigDecimal,
        data: &[u8],
        now: NaiveDateTime,
    ) -> BankResult<DepositReceipt> {
        let lock_months = months_from_payload(data)?;
        self.deposit(from, amount, lock_months, now).await
    }

    /// Redeem a deposit
    pub async fn redeem(&mut self, deposit_id: &str, now: NaiveDateTime) -> BankResult<Redemption> {
        self.deposit_manager.redeem(deposit_id, now).await
    }

    /// Get a deposit by ID
    pub async fn get_deposit(&self, deposit_id: &str) -> BankResult<Option<Deposit>> {
        self.deposit_manager.get_deposit(deposit_id).await
    }

    /// List deposits, optionally for one account
    pub async fn list_deposits(&self, account_id: Option<&str>) -> BankResult<Vec<Deposit>> {
        self.deposit_manager.list_deposits(account_id).await
    }

    // Reporting
    /// Aggregate token figures across the bank
    pub async fn supply_report(&self) -> BankResult<SupplyReport> {
        let accounts = self.list_accounts().await?;
        let deposits = self.list_deposits(None).await?;

        let total_ring_held: BigDecimal = accounts.iter().map(|a| &a.ring_balance).sum();
        let total_kton: BigDecimal = accounts.iter().map(|a| &a.kton_balance).sum();

        let total_ring_locked: BigDecimal = deposits
            .iter()
            .filter(|d| !d.is_redeemed())
            .map(|d| &d.principal)
            .sum();
        let penalties_collected: BigDecimal = deposits
            .iter()
            .filter_map(|d| d.settlement())
            .map(|s| &s.penalty)
            .sum();

        let redeemed_deposits = deposits.iter().filter(|d| d.is_redeemed()).count();

        Ok(SupplyReport {
            total_ring_held,
            total_ring_locked,
            total_kton,
            active_deposits: deposits.len() - redeemed_deposits,
            redeemed_deposits,
            penalties_collected,
        })
    }

    /// Validate the integrity of the ledger
    pub async fn validate_integrity(&self) -> BankResult<BankIntegrityReport> {
        let accounts = self.list_accounts().await?;
        let deposits = self.list_deposits(None).await?;
        let zero = BigDecimal::from(0);

        let mut issues = Vec::new();

        for account in &accounts {
            if account.ring_balance < zero {
                issues.push(format!(
                    "Account '{}' has negative RING balance {}",
                    account.id, account.ring_balance
                ));
            }
            if account.kton_balance < zero {
                issues.push(format!(
                    "Account '{}' has negative KTON balance {}",
                    account.id, account.kton_balance
                ));
            }
        }

        for deposit in &deposits {
            if !accounts.iter().any(|a| a.id == deposit.account_id) {
                issues.push(format!(
                    "Deposit '{}' belongs to unknown account '{}'",
                    deposit.id, deposit.account_id
                ));
            }

            if let Some(settlement) = deposit.settlement() {
                let settled = &settlement.ring_returned + &settlement.penalty;
                if settled != deposit.principal {
                    issues.push(format!(
                        "Deposit '{}' settled {} against principal {}",
                        deposit.id, settled, deposit.principal
                    ));
                }
            }
        }

        Ok(BankIntegrityReport {
            is_valid: issues.is_empty(),
            issues,
            accounts_checked: accounts.len(),
            deposits_checked: deposits.len(),
        })
    }
}

/// Token totals across all accounts and deposits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyReport {
    /// RING spendable by account holders
    pub total_ring_held: BigDecimal,
    /// RING locked in active deposits
    pub total_ring_locked: BigDecimal,
    /// KTON in circulation
    pub total_kton: BigDecimal,
    pub active_deposits: usize,
    pub redeemed_deposits: usize,
    /// RING withheld from early redemptions
    pub penalties_collected: BigDecimal,
}

/// Report on ledger integrity and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankIntegrityReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub accounts_checked: usize,
    pub deposits_checked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_bank_basic_operations() {
        let storage = MemoryStorage::new();
        let mut bank = Bank::new(storage, RateParameters::default()).unwrap();

        bank.mint_ring("investor", BigDecimal::from(10000))
            .await
            .unwrap();

        let receipt = bank
            .deposit("investor", BigDecimal::from(100), 1, at(2024, 1, 1))
            .await
            .unwrap();
        assert_eq!(receipt.issued_kton, BigDecimal::from(101));
        assert_eq!(receipt.maturity, at(2024, 2, 1));

        assert_eq!(
            bank.ring_balance("investor").await.unwrap(),
            BigDecimal::from(9900)
        );
        assert_eq!(
            bank.kton_balance("investor").await.unwrap(),
            BigDecimal::from(101)
        );

        let redemption = bank
            .redeem(&receipt.deposit_id, at(2024, 2, 1))
            .await
            .unwrap();
        assert!(redemption.matured);
        assert_eq!(redemption.ring_returned, BigDecimal::from(100));
        assert_eq!(redemption.penalty, BigDecimal::from(0));

        assert_eq!(
            bank.ring_balance("investor").await.unwrap(),
            BigDecimal::from(10000)
        );
        // interest was paid up front and stays with the depositor
        assert_eq!(
            bank.kton_balance("investor").await.unwrap(),
            BigDecimal::from(101)
        );

        let report = bank.supply_report().await.unwrap();
        assert_eq!(report.total_ring_locked, BigDecimal::from(0));
        assert_eq!(report.redeemed_deposits, 1);
        assert_eq!(report.active_deposits, 0);

        assert!(bank.validate_integrity().await.unwrap().is_valid);
    }

    #[tokio::test]
    async fn test_bank_rejects_invalid_rates() {
        let rates = RateParameters {
            unit_interest: BigDecimal::from(0),
            penalty_multiplier: 3,
        };
        assert!(matches!(
            Bank::new(MemoryStorage::new(), rates),
            Err(BankError::InvalidParameters(_))
        ));

        let rates = RateParameters {
            unit_interest: BigDecimal::from(1),
            penalty_multiplier: 0,
        };
        assert!(matches!(
            Bank::new(MemoryStorage::new(), rates),
            Err(BankError::InvalidParameters(_))
        ));
    }

    #[tokio::test]
    async fn test_integrity_detects_mismatched_settlement() {
        let mut storage = MemoryStorage::new();
        let bank = Bank::new(storage.clone(), RateParameters::default()).unwrap();

        storage
            .credit_ring("ghost", &BigDecimal::from(10))
            .await
            .unwrap();
        let mut deposit = Deposit::new(
            "ghost".to_string(),
            BigDecimal::from(10),
            1,
            BigDecimal::from(10),
            at(2024, 1, 1),
            at(2024, 2, 1),
        );
        storage.commit_deposit(&deposit).await.unwrap();

        // returned plus penalty exceeds the principal
        deposit.status = DepositStatus::Redeemed(Settlement {
            redeemed_at: at(2024, 1, 15),
            ring_returned: BigDecimal::from(10),
            penalty: BigDecimal::from(5),
            kton_burned: BigDecimal::from(0),
            matured: false,
        });
        storage.settle_deposit(&deposit).await.unwrap();

        let report = bank.validate_integrity().await.unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.accounts_checked, 1);
        assert_eq!(report.deposits_checked, 1);
    }
}
