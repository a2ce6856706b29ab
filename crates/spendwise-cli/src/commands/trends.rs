//! Trend command implementation

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use spendwise_core::{round_money, EngineConfig, SpendingTrend, TrendForecaster};

use super::read_transactions;

const BAR_WIDTH: usize = 30;

/// Bar length for `amount` scaled against the largest month
pub fn bar_len(amount: Decimal, max: Decimal) -> usize {
    if max <= Decimal::ZERO {
        return 0;
    }
    (amount / max * Decimal::from(BAR_WIDTH))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH)
}

/// Load transactions and forecast relative to `today`
pub fn build_trends(
    config: &EngineConfig,
    transactions_path: &Path,
    today: NaiveDate,
) -> Result<Vec<SpendingTrend>> {
    let transactions = read_transactions(transactions_path, config)?;
    Ok(TrendForecaster::with_config(config.trends).forecast_at(&transactions, today))
}

pub fn cmd_trends(
    config: &EngineConfig,
    transactions_path: &Path,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let trends = build_trends(config, transactions_path, today)?;

    if json {
        return super::print_json(&trends);
    }

    println!();
    println!("📈 Spending Trend");
    println!("   ─────────────────────────────────────────────────────────────");

    if trends.is_empty() {
        println!("   No expenses found.");
        return Ok(());
    }

    let max = trends
        .iter()
        .map(|p| p.amount)
        .max()
        .unwrap_or(Decimal::ZERO);

    for point in &trends {
        print_point(point, max);
    }

    if !trends.iter().any(|p| p.predicted) {
        println!();
        println!("   \x1b[2mNeed at least two months of history to forecast.\x1b[0m");
    }

    Ok(())
}

fn print_point(point: &SpendingTrend, max: Decimal) {
    let bar = "█".repeat(bar_len(point.amount, max));
    let amount = round_money(point.amount);
    if point.predicted {
        println!(
            "   {:7} │ {:>10.2} │ \x1b[2m{}\x1b[0m (forecast)",
            point.month, amount, bar
        );
    } else {
        println!("   {:7} │ {:>10.2} │ {}", point.month, amount, bar);
    }
}
