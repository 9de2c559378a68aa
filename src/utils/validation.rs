//! Validation utilities

use crate::config::BankConfig;
use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> BankResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(BankError::InvalidParameters(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that an amount is a whole number of smallest units
pub fn validate_whole_units(amount: &BigDecimal) -> BankResult<()> {
    if amount.is_integer() {
        Ok(())
    } else {
        Err(BankError::InvalidParameters(format!(
            "Amount {} is not a whole number of smallest units",
            amount
        )))
    }
}

/// Validate that an account ID is valid
pub fn validate_account_id(account_id: &str) -> BankResult<()> {
    if account_id.trim().is_empty() {
        return Err(BankError::InvalidParameters(
            "Account ID cannot be empty".to_string(),
        ));
    }

    if account_id.len() > 64 {
        return Err(BankError::InvalidParameters(
            "Account ID cannot exceed 64 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !account_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(BankError::InvalidParameters(
            "Account ID can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate a `0x`-prefixed, 20-byte hex address
pub fn validate_address(address: &str) -> BankResult<()> {
    let digits = address.strip_prefix("0x").ok_or_else(|| {
        BankError::InvalidParameters(format!("Address '{}' must start with 0x", address))
    })?;

    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BankError::InvalidParameters(format!(
            "Address '{}' must be 20 bytes of hex",
            address
        )));
    }

    Ok(())
}

/// Deposit validator that only accepts hex addresses as account IDs
pub struct AddressDepositValidator;

impl DepositValidator for AddressDepositValidator {
    fn validate_deposit(&self, request: &DepositRequest, config: &BankConfig) -> BankResult<()> {
        DefaultDepositValidator.validate_deposit(request, config)?;
        self.validate_account_id(&request.account_id)
    }

    fn validate_account_id(&self, account_id: &str) -> BankResult<()> {
        validate_address(account_id)
    }
}

/// Deposit validator enforcing the identifier character rules
pub struct EnhancedDepositValidator;

impl DepositValidator for EnhancedDepositValidator {
    fn validate_deposit(&self, request: &DepositRequest, config: &BankConfig) -> BankResult<()> {
        DefaultDepositValidator.validate_deposit(request, config)?;
        self.validate_account_id(&request.account_id)
    }

    fn validate_account_id(&self, account_id: &str) -> BankResult<()> {
        validate_account_id(account_id)
    }
}
