//! Dashboard summary command implementation

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use spendwise_core::summary::{
    average_goal_progress, category_breakdown, month_over_month, overall_budget_usage,
    savings_rate,
};
use spendwise_core::{
    round_money, Budget, BudgetStatus, CategoryTotal, EngineConfig, MonthComparison,
    MonthlySummary,
};

use super::{read_budgets, read_goals, read_transactions, truncate};

/// Categories shown in the breakdown
const TOP_CATEGORIES: usize = 6;

#[derive(Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub usage_percent: Decimal,
    pub status: BudgetStatus,
}

impl From<&Budget> for BudgetLine {
    fn from(budget: &Budget) -> Self {
        Self {
            category: budget.category.clone(),
            limit: budget.limit,
            spent: budget.spent,
            usage_percent: budget.usage_percent(),
            status: BudgetStatus::of(budget),
        }
    }
}

#[derive(Serialize)]
pub struct SummaryOutput {
    pub month: MonthlySummary,
    pub categories: Vec<CategoryTotal>,
    pub month_over_month: MonthComparison,
    pub savings_rate: Decimal,
    pub budgets: Vec<BudgetLine>,
    pub overall_budget_usage: Decimal,
    pub goal_count: usize,
    pub average_goal_progress: Decimal,
}

pub fn cmd_summary(
    config: &EngineConfig,
    transactions_path: &Path,
    budgets_path: Option<&Path>,
    goals_path: Option<&Path>,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let output = build_summary(config, transactions_path, budgets_path, goals_path, date)?;

    if json {
        return super::print_json(&output);
    }

    print_summary(&output, date);
    Ok(())
}

/// Gather every dashboard figure for the month of `date`
pub fn build_summary(
    config: &EngineConfig,
    transactions_path: &Path,
    budgets_path: Option<&Path>,
    goals_path: Option<&Path>,
    date: NaiveDate,
) -> Result<SummaryOutput> {
    let transactions = read_transactions(transactions_path, config)?;
    let budgets = match budgets_path {
        Some(path) => read_budgets(path)?,
        None => Vec::new(),
    };
    let goals = match goals_path {
        Some(path) => read_goals(path)?,
        None => Vec::new(),
    };
    let matching = config.insights.month_matching;

    let output = SummaryOutput {
        month: MonthlySummary::for_month(&transactions, date, matching),
        categories: category_breakdown(&transactions, TOP_CATEGORIES),
        month_over_month: month_over_month(&transactions, date, matching),
        savings_rate: savings_rate(&transactions),
        budgets: budgets.iter().map(BudgetLine::from).collect(),
        overall_budget_usage: overall_budget_usage(&budgets),
        goal_count: goals.len(),
        average_goal_progress: average_goal_progress(&goals),
    };

    Ok(output)
}

fn print_summary(output: &SummaryOutput, date: NaiveDate) {
    println!();
    println!("📊 Spendwise Dashboard - {}", date.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:       ${:.2}", round_money(output.month.income));
    println!("   Expenses:     ${:.2}", round_money(output.month.expenses));
    println!("   Net balance:  ${:.2}", round_money(output.month.net_balance));
    println!("   Transactions: {}", output.month.transaction_count);

    let change = &output.month_over_month;
    let arrow = if change.change > Decimal::ZERO {
        "↑"
    } else if change.change < Decimal::ZERO {
        "↓"
    } else {
        "→"
    };
    println!(
        "   vs last month: {} ${:.2} ({:.1}%)",
        arrow,
        round_money(change.change.abs()),
        change.change_percent.abs().round_dp(1)
    );
    println!("   Savings rate: {:.1}%", output.savings_rate.round_dp(1));

    if !output.categories.is_empty() {
        println!();
        println!(
            "   {:25} │ {:>10} │ {:>6} │ {:>5}",
            "Category", "Amount", "%", "Count"
        );
        println!("   ──────────────────────────┼────────────┼────────┼───────");
        for cat in &output.categories {
            println!(
                "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
                truncate(&cat.category, 25),
                round_money(cat.amount),
                cat.percentage.round_dp(1),
                cat.transaction_count
            );
        }
    }

    if !output.budgets.is_empty() {
        println!();
        println!("   Budgets:");
        for line in &output.budgets {
            let icon = match line.status {
                BudgetStatus::Good => "✓",
                BudgetStatus::Warning => "⚠️ ",
                BudgetStatus::Exceeded => "❌",
            };
            println!(
                "   {} {:22} ${:.2} / ${:.2} ({:.0}%)",
                icon,
                truncate(&line.category, 22),
                round_money(line.spent),
                round_money(line.limit),
                line.usage_percent.round_dp(0)
            );
        }
        println!(
            "   Overall: {:.0}% of total budget used",
            output.overall_budget_usage.round_dp(0)
        );
    }

    if output.goal_count > 0 {
        println!();
        println!(
            "   🎯 {} goals, {:.0}% average progress",
            output.goal_count,
            output.average_goal_progress.round_dp(0)
        );
    }
}
