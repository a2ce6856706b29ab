//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise_core::EngineConfig;
use tempfile::TempDir;

use crate::commands::{self, truncate};

const TRANSACTIONS: &str = "\
id,date,description,amount,type,category
1,2024-11-05,Groceries,300,expense,Food & Dining
2,2024-12-01,Part-time Job Payment,1200,income,Income
3,2024-12-03,Chemistry Textbook,150,expense,
4,2024-12-05,Pizza with friends,200,expense,
";

const BUDGETS: &str = "\
id,category,limit,spent,period,color
1,Education,180,150,monthly,#10B981
2,Food & Dining,300,80,monthly,
";

const GOALS: &str = "\
id,name,target_amount,current_amount,deadline,category,priority
1,Emergency Fund,2000,850,2025-06-01,Savings,high
2,New Laptop,1200,1200,2025-03-15,Technology,medium
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Decimals serialize as strings; parse one back out of a JSON value
fn json_decimal(value: &serde_json::Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

// ========== Shared Helper Tests ==========

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Food", 10), "Food");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Food & Dining Out", 10), "Food & ...");
}

#[test]
fn test_percent_formatting() {
    assert_eq!(commands::percent(Decimal::new(75, 2)), "75%");
    assert_eq!(commands::percent(Decimal::new(3, 1)), "30%");
}

#[test]
fn test_resolve_date_explicit() {
    let parsed = commands::resolve_date(Some("2024-12-15")).unwrap();
    assert_eq!(parsed, date(2024, 12, 15));
}

#[test]
fn test_resolve_date_invalid() {
    assert!(commands::resolve_date(Some("12/15/2024")).is_err());
}

#[test]
fn test_resolve_date_defaults_to_today() {
    let today = chrono::Local::now().date_naive();
    assert_eq!(commands::resolve_date(None).unwrap(), today);
}

#[test]
fn test_load_config_missing_explicit_path() {
    let dir = TempDir::new().unwrap();
    let result = commands::load_config(Some(&dir.path().join("nope.toml")));
    assert!(result.is_err());
}

#[test]
fn test_load_config_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "engine.toml",
        "[insights]\nmonth_matching = \"year_and_month\"\n",
    );
    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(
        config.insights.month_matching,
        spendwise_core::MonthMatching::YearAndMonth
    );
}

#[test]
fn test_read_transactions_classifies_with_config_rules() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tx.csv", TRANSACTIONS);

    let transactions = commands::read_transactions(&path, &EngineConfig::default()).unwrap();
    assert_eq!(transactions.len(), 4);
    assert_eq!(transactions[2].category, "Education");
    assert_eq!(transactions[3].category, "Food & Dining");
}

#[test]
fn test_read_missing_file_has_context() {
    let err = commands::read_budgets(Path::new("/nonexistent/budgets.csv")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/budgets.csv"));
}

// ========== Classify Command Tests ==========

#[test]
fn test_cmd_classify() {
    let config = EngineConfig::default();
    assert!(commands::cmd_classify(&config, "Pizza with friends", false).is_ok());
    assert!(commands::cmd_classify(&config, "xyz", true).is_ok());
}

#[test]
fn test_cmd_categories() {
    let config = EngineConfig::default();
    assert!(commands::cmd_categories(&config, false).is_ok());
    assert!(commands::cmd_categories(&config, true).is_ok());
}

// ========== Insights Command Tests ==========

#[test]
fn test_cmd_insights() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);
    let budgets = write_file(&dir, "budgets.csv", BUDGETS);

    let config = EngineConfig::default();
    let result =
        commands::cmd_insights(&config, &tx, &budgets, date(2024, 12, 10), false, false);
    assert!(result.is_ok());

    let result = commands::cmd_insights(&config, &tx, &budgets, date(2025, 12, 10), true, true);
    assert!(result.is_ok());
}

#[test]
fn test_insights_json_output() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);
    let budgets = write_file(&dir, "budgets.csv", BUDGETS);

    let config = EngineConfig::default();
    let insights =
        commands::build_insights(&config, &tx, &budgets, date(2024, 12, 10), false).unwrap();
    let json = serde_json::to_value(&insights).unwrap();

    // Education: 150 of 180 crosses 80%; 350 over 10 days projects to 1085
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "budget-1");
    assert_eq!(items[0]["type"], "suggestion");
    assert_eq!(
        items[0]["description"],
        "You've spent $150.00 of your $180 Education budget"
    );
    assert_eq!(items[1]["id"], "high-spending");
    assert_eq!(items[1]["type"], "warning");
    assert_eq!(
        items[1]["description"],
        "Based on current trends, you're projected to spend $1085.00 this month"
    );
    assert_eq!(json_decimal(&items[1]["confidence"]), Decimal::new(85, 2));
    assert_eq!(items[1]["actionable"], true);
}

#[test]
fn test_insights_strict_month_ignores_prior_year() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);
    let budgets = write_file(&dir, "budgets.csv", BUDGETS);

    let config = EngineConfig::default();
    let loose =
        commands::build_insights(&config, &tx, &budgets, date(2025, 12, 31), false).unwrap();
    assert_eq!(loose.len(), 1);

    let strict =
        commands::build_insights(&config, &tx, &budgets, date(2025, 12, 31), true).unwrap();
    assert!(strict.is_empty());
}

#[test]
fn test_cmd_insights_bad_budgets_file() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);
    let budgets = write_file(&dir, "budgets.csv", "id,category,limit\n1,Food,-5\n");

    let config = EngineConfig::default();
    let result = commands::cmd_insights(&config, &tx, &budgets, date(2024, 12, 10), false, false);
    assert!(result.is_err());
}

// ========== Trends Command Tests ==========

#[test]
fn test_bar_len_scales_to_max() {
    let max = Decimal::new(200, 0);
    assert_eq!(commands::bar_len(max, max), 30);
    assert_eq!(commands::bar_len(Decimal::new(100, 0), max), 15);
    assert_eq!(commands::bar_len(Decimal::ZERO, max), 0);
    assert_eq!(commands::bar_len(Decimal::ONE, Decimal::ZERO), 0);
}

#[test]
fn test_cmd_trends() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);

    let config = EngineConfig::default();
    assert!(commands::cmd_trends(&config, &tx, date(2024, 12, 20), false).is_ok());
    assert!(commands::cmd_trends(&config, &tx, date(2024, 12, 20), true).is_ok());
}

#[test]
fn test_trends_json_output() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);

    let config = EngineConfig::default();
    let trends = commands::build_trends(&config, &tx, date(2024, 12, 20)).unwrap();
    let json = serde_json::to_value(&trends).unwrap();

    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0]["month"], "Nov 24");
    assert_eq!(json_decimal(&points[0]["amount"]), Decimal::new(300, 0));
    assert_eq!(points[0]["predicted"], false);
    assert_eq!(points[1]["month"], "Dec 24");
    assert_eq!(json_decimal(&points[1]["amount"]), Decimal::new(350, 0));
    assert_eq!(points[2]["month"], "Jan 25");
    assert_eq!(json_decimal(&points[2]["amount"]), Decimal::new(400, 0));
    assert_eq!(points[2]["predicted"], true);
}

#[test]
fn test_cmd_trends_no_expenses() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", "id,date,description,amount,type,category\n");

    let config = EngineConfig::default();
    assert!(commands::cmd_trends(&config, &tx, date(2024, 12, 20), false).is_ok());
}

// ========== Summary Command Tests ==========

#[test]
fn test_cmd_summary_with_budgets() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);
    let budgets = write_file(&dir, "budgets.csv", BUDGETS);

    let config = EngineConfig::default();
    let result = commands::cmd_summary(
        &config,
        &tx,
        Some(&budgets),
        None,
        date(2024, 12, 20),
        false,
    );
    assert!(result.is_ok());
}

#[test]
fn test_summary_overall_figures() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);
    let budgets = write_file(&dir, "budgets.csv", BUDGETS);
    let goals = write_file(&dir, "goals.csv", GOALS);

    let config = EngineConfig::default();
    let summary =
        commands::build_summary(&config, &tx, Some(&budgets), Some(&goals), date(2024, 12, 20))
            .unwrap();

    assert_eq!(summary.month.income, Decimal::new(1200, 0));
    assert_eq!(summary.month.expenses, Decimal::new(350, 0));
    // 230 spent of 480 budgeted
    assert_eq!(summary.overall_budget_usage.round_dp(2), Decimal::new(4792, 2));
    // (42.5 + 100) / 2
    assert_eq!(summary.goal_count, 2);
    assert_eq!(summary.average_goal_progress, Decimal::new(7125, 2));

    assert!(commands::cmd_summary(
        &config,
        &tx,
        Some(&budgets),
        Some(&goals),
        date(2024, 12, 20),
        false
    )
    .is_ok());
}

#[test]
fn test_summary_without_budgets_or_goals_is_zero() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);

    let config = EngineConfig::default();
    let summary = commands::build_summary(&config, &tx, None, None, date(2024, 12, 20)).unwrap();
    assert_eq!(summary.overall_budget_usage, Decimal::ZERO);
    assert_eq!(summary.goal_count, 0);
    assert_eq!(summary.average_goal_progress, Decimal::ZERO);
}

#[test]
fn test_cmd_summary_without_budgets() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);

    let config = EngineConfig::default();
    assert!(commands::cmd_summary(&config, &tx, None, None, date(2024, 12, 20), true).is_ok());
}

// ========== Transactions Command Tests ==========

#[test]
fn test_filter_transactions_by_search_and_category() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);
    let config = EngineConfig::default();

    // Both matches come from the category; newest first
    let found = commands::filter_transactions(&config, &tx, Some("FOOD"), None).unwrap();
    let ids: Vec<_> = found.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "1"]);

    let found =
        commands::filter_transactions(&config, &tx, Some("food"), Some("Education")).unwrap();
    assert!(found.is_empty());

    let found = commands::filter_transactions(&config, &tx, None, Some("All")).unwrap();
    assert_eq!(found.len(), 4);
}

#[test]
fn test_cmd_transactions() {
    let dir = TempDir::new().unwrap();
    let tx = write_file(&dir, "tx.csv", TRANSACTIONS);
    let config = EngineConfig::default();

    assert!(commands::cmd_transactions(&config, &tx, Some("textbook"), None, false).is_ok());
    assert!(commands::cmd_transactions(&config, &tx, None, Some("Nope"), true).is_ok());
}

// ========== Goals Command Tests ==========

#[test]
fn test_cmd_goals() {
    let dir = TempDir::new().unwrap();
    let goals = write_file(&dir, "goals.csv", GOALS);

    assert!(commands::cmd_goals(&goals, date(2025, 2, 20), false).is_ok());
    assert!(commands::cmd_goals(&goals, date(2025, 7, 1), true).is_ok());
}

#[test]
fn test_cmd_goals_missing_file() {
    let result = commands::cmd_goals(Path::new("/nonexistent/goals.csv"), date(2025, 2, 20), false);
    assert!(result.is_err());
}
