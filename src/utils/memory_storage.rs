//! In-memory storage implementation for testing

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
///
/// Clones share the same underlying maps.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    deposits: Arc<RwLock<HashMap<String, Deposit>>>,
}

fn read<T>(lock: &RwLock<T>) -> BankResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| BankError::Storage("storage lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> BankResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| BankError::Storage("storage lock poisoned".to_string()))
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            deposits: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> BankResult<()> {
        write(&self.accounts)?.clear();
        write(&self.deposits)?.clear();
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BankStorage for MemoryStorage {
    async fn save_account(&mut self, account: &Account) -> BankResult<()> {
        write(&self.accounts)?.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn get_account(&self, account_id: &str) -> BankResult<Option<Account>> {
        Ok(read(&self.accounts)?.get(account_id).cloned())
    }

    async fn list_accounts(&self) -> BankResult<Vec<Account>> {
        let mut accounts: Vec<Account> = read(&self.accounts)?.values().cloned().collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    async fn credit_ring(&mut self, account_id: &str, amount: &BigDecimal) -> BankResult<Account> {
        let mut accounts = write(&self.accounts)?;
        let account = accounts
            .entry(account_id.to_string())
            .or_insert_with(|| Account::new(account_id.to_string()));
        account.credit_ring(amount);
        Ok(account.clone())
    }

    async fn get_deposit(&self, deposit_id: &str) -> BankResult<Option<Deposit>> {
        Ok(read(&self.deposits)?.get(deposit_id).cloned())
    }

    async fn list_deposits(&self, account_id: Option<&str>) -> BankResult<Vec<Deposit>> {
        let deposits = read(&self.deposits)?;
        let mut filtered: Vec<Deposit> = deposits
            .values()
            .filter(|deposit| account_id.is_none_or(|id| deposit.account_id == id))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(filtered)
    }

    async fn commit_deposit(&mut self, deposit: &Deposit) -> BankResult<Account> {
        // lock order: accounts, then deposits
        let mut accounts = write(&self.accounts)?;
        let mut deposits = write(&self.deposits)?;

        if deposits.contains_key(&deposit.id) {
            return Err(BankError::Storage(format!(
                "Deposit '{}' already exists",
                deposit.id
            )));
        }

        let mut account = accounts
            .get(&deposit.account_id)
            .cloned()
            .unwrap_or_else(|| Account::new(deposit.account_id.clone()));
        account.debit_ring(&deposit.principal)?;
        account.credit_kton(&deposit.issued_kton);

        accounts.insert(account.id.clone(), account.clone());
        deposits.insert(deposit.id.clone(), deposit.clone());
        Ok(account)
    }

    async fn settle_deposit(&mut self, deposit: &Deposit) -> BankResult<Account> {
        let settlement = deposit.settlement().ok_or_else(|| {
            BankError::InvalidParameters(format!("deposit '{}' carries no settlement", deposit.id))
        })?;

        let mut accounts = write(&self.accounts)?;
        let mut deposits = write(&self.deposits)?;

        match deposits.get(&deposit.id) {
            None => return Err(BankError::NotFound(format!("deposit '{}'", deposit.id))),
            Some(stored) if stored.is_redeemed() => {
                return Err(BankError::AlreadyRedeemed(deposit.id.clone()))
            }
            Some(_) => {}
        }

        let mut account = accounts
            .get(&deposit.account_id)
            .cloned()
            .ok_or_else(|| BankError::NotFound(format!("account '{}'", deposit.account_id)))?;
        account.burn_kton(&settlement.kton_burned)?;
        account.credit_ring(&settlement.ring_returned);

        accounts.insert(account.id.clone(), account.clone());
        deposits.insert(deposit.id.clone(), deposit.clone());
        Ok(account)
    }
}
