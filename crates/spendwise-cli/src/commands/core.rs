//! Shared utilities for commands
//!
//! This module contains:
//! - `load_config` - Resolve the engine config
//! - `resolve_date` - Parse an optional date argument, defaulting to today
//! - `read_transactions` / `read_budgets` / `read_goals` - Snapshot loading
//! - `print_json` - JSON output for `--json`

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use spendwise_core::import::{load_budgets_file, load_goals_file, load_transactions_file};
use spendwise_core::{Budget, CategoryClassifier, EngineConfig, Goal, Transaction};

/// Load the engine config from an explicit path, the override file, or defaults
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load(path).context("Failed to load engine config")
}

/// Parse a YYYY-MM-DD argument, or use today's date
pub fn resolve_date(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn read_transactions(path: &Path, config: &EngineConfig) -> Result<Vec<Transaction>> {
    let classifier = CategoryClassifier::from_config(&config.classifier);
    load_transactions_file(path, &classifier)
        .with_context(|| format!("Failed to load transactions from {}", path.display()))
}

pub fn read_budgets(path: &Path) -> Result<Vec<Budget>> {
    load_budgets_file(path)
        .with_context(|| format!("Failed to load budgets from {}", path.display()))
}

pub fn read_goals(path: &Path) -> Result<Vec<Goal>> {
    load_goals_file(path).with_context(|| format!("Failed to load goals from {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
