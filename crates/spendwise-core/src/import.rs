//! CSV loaders for transaction, budget and goal snapshots
//!
//! Transactions: `id,date,description,amount,type,category`
//! Budgets:      `id,category,limit,spent,period,color`
//! Goals:        `id,name,target_amount,current_amount,deadline,category,priority`
//!
//! Dates are `YYYY-MM-DD`. Transactions without a category are classified on
//! load; rows without an id get one derived from their contents.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::classifier::CategoryClassifier;
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetPeriod, Goal, GoalPriority, Transaction, TransactionType};

/// Length of generated transaction ids, in hex characters
const GENERATED_ID_LEN: usize = 12;

/// Separates hashed fields so ("x1", 2) and ("x", 12) differ
const FIELD_SEPARATOR: &[u8] = &[0x1f];

#[derive(Debug, Deserialize)]
struct TransactionRow {
    #[serde(default)]
    id: String,
    date: String,
    description: String,
    amount: Decimal,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    recurring: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct BudgetRow {
    id: String,
    category: String,
    limit: Decimal,
    #[serde(default)]
    spent: Option<Decimal>,
    #[serde(default)]
    period: String,
    #[serde(default)]
    color: String,
}

#[derive(Debug, Deserialize)]
struct GoalRow {
    id: String,
    name: String,
    target_amount: Decimal,
    #[serde(default)]
    current_amount: Option<Decimal>,
    deadline: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    priority: String,
}

fn reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn parse_date(value: &str, line: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        Error::Import(format!(
            "Row {}: invalid date '{}' (use YYYY-MM-DD): {}",
            line, value, e
        ))
    })
}

fn require_non_negative(value: Decimal, field: &str, line: usize) -> Result<Decimal> {
    if value < Decimal::ZERO {
        return Err(Error::InvalidData(format!(
            "Row {}: {} must not be negative, got {}",
            line, field, value
        )));
    }
    Ok(value)
}

/// Stable id for a transaction row that has none
///
/// `occurrence` counts earlier rows in the same file with the same date,
/// description and amount, so identical purchases get distinct ids that
/// survive a reload.
pub fn generate_id(
    date: &NaiveDate,
    description: &str,
    amount: Decimal,
    occurrence: usize,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(description.as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(amount.normalize().to_string().as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(occurrence.to_string().as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(GENERATED_ID_LEN);
    id
}

/// Parse transactions, classifying rows that arrive without a category
pub fn load_transactions<R: Read>(
    source: R,
    classifier: &CategoryClassifier,
) -> Result<Vec<Transaction>> {
    let mut rdr = reader(source);
    let mut transactions = Vec::new();
    let mut seen: HashMap<(NaiveDate, String, Decimal), usize> = HashMap::new();

    for (index, result) in rdr.deserialize::<TransactionRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = result?;

        let date = parse_date(&row.date, line)?;
        let amount = require_non_negative(row.amount, "amount", line)?;
        let kind = TransactionType::from_str(&row.kind)
            .map_err(|e| Error::Import(format!("Row {}: {}", line, e)))?;

        let id = if row.id.is_empty() {
            let occurrence = seen
                .entry((date, row.description.clone(), amount.normalize()))
                .or_insert(0);
            let id = generate_id(&date, &row.description, amount, *occurrence);
            *occurrence += 1;
            id
        } else {
            row.id
        };

        let mut tx = Transaction::new(id, date, row.description, amount, kind, row.category);
        tx.is_recurring = row.recurring.unwrap_or(false);

        if tx.category.is_empty() {
            let prediction = classifier.classify(&tx.description);
            debug!(
                id = tx.id.as_str(),
                category = prediction.category.as_str(),
                confidence = %prediction.confidence,
                "Classified uncategorized transaction"
            );
            tx.category = prediction.category.clone();
            tx.predicted_category = Some(prediction.category);
            tx.confidence = Some(prediction.confidence);
        }

        transactions.push(tx);
    }

    debug!(count = transactions.len(), "Loaded transactions");
    Ok(transactions)
}

/// Parse budgets in file order
pub fn load_budgets<R: Read>(source: R) -> Result<Vec<Budget>> {
    let mut rdr = reader(source);
    let mut budgets = Vec::new();

    for (index, result) in rdr.deserialize::<BudgetRow>().enumerate() {
        let line = index + 2;
        let row = result?;

        let period = BudgetPeriod::from_str(&row.period)
            .map_err(|e| Error::Import(format!("Row {}: {}", line, e)))?;

        budgets.push(Budget {
            id: row.id,
            category: row.category,
            limit: require_non_negative(row.limit, "limit", line)?,
            spent: require_non_negative(row.spent.unwrap_or_default(), "spent", line)?,
            period,
            color: row.color,
        });
    }

    debug!(count = budgets.len(), "Loaded budgets");
    Ok(budgets)
}

/// Parse savings goals
pub fn load_goals<R: Read>(source: R) -> Result<Vec<Goal>> {
    let mut rdr = reader(source);
    let mut goals = Vec::new();

    for (index, result) in rdr.deserialize::<GoalRow>().enumerate() {
        let line = index + 2;
        let row = result?;

        let priority = GoalPriority::from_str(&row.priority)
            .map_err(|e| Error::Import(format!("Row {}: {}", line, e)))?;

        goals.push(Goal {
            id: row.id,
            name: row.name,
            target_amount: require_non_negative(row.target_amount, "target_amount", line)?,
            current_amount: require_non_negative(
                row.current_amount.unwrap_or_default(),
                "current_amount",
                line,
            )?,
            deadline: parse_date(&row.deadline, line)?,
            category: row.category,
            priority,
        });
    }

    debug!(count = goals.len(), "Loaded goals");
    Ok(goals)
}

/// Load transactions from a CSV file
pub fn load_transactions_file(
    path: &Path,
    classifier: &CategoryClassifier,
) -> Result<Vec<Transaction>> {
    load_transactions(File::open(path)?, classifier)
}

/// Load budgets from a CSV file
pub fn load_budgets_file(path: &Path) -> Result<Vec<Budget>> {
    load_budgets(File::open(path)?)
}

/// Load goals from a CSV file
pub fn load_goals_file(path: &Path) -> Result<Vec<Goal>> {
    load_goals(File::open(path)?)
}
