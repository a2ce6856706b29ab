//! Transaction listing command implementation

use std::path::Path;

use anyhow::Result;
use spendwise_core::{round_money, EngineConfig, Transaction, TransactionFilter};

use super::{read_transactions, truncate};

/// Load transactions and keep those matching `search` and `category`, newest first
pub fn filter_transactions(
    config: &EngineConfig,
    transactions_path: &Path,
    search: Option<&str>,
    category: Option<&str>,
) -> Result<Vec<Transaction>> {
    let transactions = read_transactions(transactions_path, config)?;
    let filter = TransactionFilter::new().search(search).category(category);

    let mut matched: Vec<Transaction> = filter.apply(&transactions).into_iter().cloned().collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(matched)
}

pub fn cmd_transactions(
    config: &EngineConfig,
    transactions_path: &Path,
    search: Option<&str>,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let transactions = filter_transactions(config, transactions_path, search, category)?;

    if json {
        return super::print_json(&transactions);
    }

    if transactions.is_empty() {
        println!("No transactions match.");
        return Ok(());
    }

    println!();
    println!("📝 Transactions ({})", transactions.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &transactions {
        let amount = round_money(tx.amount);
        let amount_str = if tx.is_expense() {
            format!("\x1b[31m-${:.2}\x1b[0m", amount) // Red for expenses
        } else {
            format!("\x1b[32m+${:.2}\x1b[0m", amount) // Green for income
        };

        println!(
            "   {} │ {:>20} │ {:16} │ {}",
            tx.date,
            amount_str,
            truncate(&tx.category, 16),
            truncate(&tx.description, 32)
        );
    }

    Ok(())
}
