//! Basic bank usage example

use gringotts_bank::utils::{decode_hex_payload, MemoryStorage};
use gringotts_bank::{coins, Bank, SettingsRegistry, COIN};
use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Gringotts Bank - Basic Deposit Example\n");

    // Rates are snapshotted from the settings registry
    let registry = SettingsRegistry::with_bank_defaults();
    let mut bank = Bank::from_registry(MemoryStorage::new(), &registry)?;
    println!(
        "  unit interest: {} | penalty multiplier: {}\n",
        bank.rates().unit_interest,
        bank.rates().penalty_multiplier
    );

    let investor = "0x627306090abab3a6e1400e9345bc60c78a8bef57";
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or("invalid start date")?;

    bank.mint_ring(investor, coins(10000)).await?;
    println!("  Minted 10000 RING to {}", investor);

    // Deposit 100 RING for one month through a token transfer
    let data = decode_hex_payload("0x1")?;
    let matured = bank
        .token_fallback(investor, coins(100), &data, start)
        .await?;
    println!(
        "  Deposited 100 RING for 1 month: {} KTON issued, matures {}",
        matured.issued_kton / BigDecimal::from(COIN),
        matured.maturity
    );

    // Deposit another 100 RING for twelve months
    let early = bank.deposit(investor, coins(100), 12, start).await?;
    println!(
        "  Deposited 100 RING for 12 months: {} KTON issued, matures {}",
        early.issued_kton / BigDecimal::from(COIN),
        early.maturity
    );

    // Redeem the first at maturity and the second a month early
    let redemption = bank.redeem(&matured.deposit_id, matured.maturity).await?;
    println!(
        "\n  Redeemed at maturity: {} RING back, penalty {}",
        redemption.ring_returned / BigDecimal::from(COIN),
        redemption.penalty
    );

    let month_early = early.maturity - Duration::days(30);
    let redemption = bank.redeem(&early.deposit_id, month_early).await?;
    println!(
        "  Redeemed early on {}: {} RING back, penalty {} RING, {} KTON burned",
        month_early,
        redemption.ring_returned / BigDecimal::from(COIN),
        redemption.penalty / BigDecimal::from(COIN),
        redemption.kton_burned / BigDecimal::from(COIN)
    );

    let report = bank.supply_report().await?;
    println!("\n  Supply report:");
    println!("    RING held:   {}", report.total_ring_held / BigDecimal::from(COIN));
    println!("    RING locked: {}", report.total_ring_locked / BigDecimal::from(COIN));
    println!("    KTON:        {}", report.total_kton / BigDecimal::from(COIN));
    println!(
        "    Penalties:   {}",
        report.penalties_collected / BigDecimal::from(COIN)
    );

    let integrity = bank.validate_integrity().await?;
    println!("\n  Ledger integrity: {}", if integrity.is_valid { "ok" } else { "FAILED" });

    Ok(())
}
