//! KTON issuance and early-redemption penalty arithmetic

use bigdecimal::BigDecimal;
use chrono::{Months, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Floor of `numerator / denominator` for non-negative integers
pub fn div_floor(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    let (numerator, _) = numerator.with_scale(0).into_bigint_and_exponent();
    let (denominator, _) = denominator.with_scale(0).into_bigint_and_exponent();
    BigDecimal::new(numerator / denominator, 0)
}

/// Ceiling of `numerator / denominator` for non-negative integers
pub fn div_ceil(numerator: &BigDecimal, denominator: &BigDecimal) -> BigDecimal {
    div_floor(&(numerator + denominator - BigDecimal::from(1)), denominator)
}

/// How much of a deposit's lock period is still outstanding at some instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockProgress {
    /// Milliseconds left until maturity
    pub remaining_millis: i64,
    /// Milliseconds from creation to maturity
    pub total_millis: i64,
}

impl LockProgress {
    /// Whether the lock period has elapsed
    pub fn is_complete(&self) -> bool {
        self.remaining_millis == 0
    }

    /// Remaining share of the lock period, in (0, 1] while the lock runs
    pub fn remaining_fraction(&self) -> BigDecimal {
        BigDecimal::from(self.remaining_millis) / BigDecimal::from(self.total_millis)
    }

    /// `value * remaining / total`, rounded down
    fn scale_floor(&self, value: &BigDecimal) -> BigDecimal {
        div_floor(
            &(value * BigDecimal::from(self.remaining_millis)),
            &BigDecimal::from(self.total_millis),
        )
    }

    /// `value * remaining / total`, rounded up
    fn scale_ceil(&self, value: &BigDecimal) -> BigDecimal {
        div_ceil(
            &(value * BigDecimal::from(self.remaining_millis)),
            &BigDecimal::from(self.total_millis),
        )
    }
}

/// Interest engine applying one set of rate parameters
#[derive(Debug, Clone)]
pub struct InterestCalculator {
    rates: RateParameters,
}

impl InterestCalculator {
    /// Create a calculator for validated rate parameters
    pub fn new(rates: RateParameters) -> BankResult<Self> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// KTON credited for locking `principal` for `lock_months`:
    /// `principal * unit_interest * lock_months / 10^18`, rounded down
    pub fn issued_kton(&self, principal: &BigDecimal, lock_months: u32) -> BigDecimal {
        let numerator = principal * &self.rates.unit_interest * BigDecimal::from(lock_months);
        div_floor(&numerator, &scale())
    }

    /// Maturity of a deposit made at `created_at`, in calendar months
    pub fn maturity(
        &self,
        created_at: NaiveDateTime,
        lock_months: u32,
    ) -> BankResult<NaiveDateTime> {
        created_at
            .checked_add_months(Months::new(lock_months))
            .ok_or_else(|| {
                BankError::InvalidParameters(format!(
                    "Maturity of a {} month lock from {} is out of range",
                    lock_months, created_at
                ))
            })
    }

    /// Outstanding share of the lock period of `deposit` at `now`
    pub fn progress(&self, deposit: &Deposit, now: NaiveDateTime) -> BankResult<LockProgress> {
        if now < deposit.created_at {
            return Err(BankError::InvalidParameters(format!(
                "Redemption time {} precedes deposit creation {}",
                now, deposit.created_at
            )));
        }

        let total_millis = (deposit.maturity - deposit.created_at).num_milliseconds();
        let remaining_millis = if deposit.is_mature(now) {
            0
        } else {
            // a sub-millisecond remainder is still an early redemption
            (deposit.maturity - now).num_milliseconds().max(1)
        };

        Ok(LockProgress {
            remaining_millis,
            total_millis,
        })
    }

    /// Penalty for redeeming `principal` early: `principal * multiplier * remaining`,
    /// rounded up and capped at the principal
    pub fn penalty(&self, principal: &BigDecimal, progress: &LockProgress) -> BigDecimal {
        if progress.is_complete() {
            return BigDecimal::from(0);
        }

        let uncapped =
            progress.scale_ceil(&(principal * BigDecimal::from(self.rates.penalty_multiplier)));
        if uncapped > *principal {
            principal.clone()
        } else {
            uncapped
        }
    }

    /// Unearned KTON to burn on early redemption, rounded down
    pub fn kton_burn(&self, issued_kton: &BigDecimal, progress: &LockProgress) -> BigDecimal {
        if progress.is_complete() {
            return BigDecimal::from(0);
        }
        progress.scale_floor(issued_kton)
    }

    /// Work out the settlement of `deposit` at `now` without touching any balance
    pub fn settle(&self, deposit: &Deposit, now: NaiveDateTime) -> BankResult<Settlement> {
        let progress = self.progress(deposit, now)?;

        if progress.is_complete() {
            return Ok(Settlement {
                redeemed_at: now,
                ring_returned: deposit.principal.clone(),
                penalty: BigDecimal::from(0),
                kton_burned: BigDecimal::from(0),
                matured: true,
            });
        }

        let penalty = self.penalty(&deposit.principal, &progress);
        let kton_burned = self.kton_burn(&deposit.issued_kton, &progress);

        Ok(Settlement {
            redeemed_at: now,
            ring_returned: &deposit.principal - &penalty,
            penalty,
            kton_burned,
            matured: false,
        })
    }
}
