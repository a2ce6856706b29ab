//! Insight command implementation

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use spendwise_core::{
    EngineConfig, InsightGenerator, InsightKind, MonthMatching, PredictiveInsight,
};
use tracing::debug;

use super::{read_budgets, read_transactions};

/// Load both snapshots and run the insight rules for the month of `date`
pub fn build_insights(
    config: &EngineConfig,
    transactions_path: &Path,
    budgets_path: &Path,
    date: NaiveDate,
    strict_month: bool,
) -> Result<Vec<PredictiveInsight>> {
    let transactions = read_transactions(transactions_path, config)?;
    let budgets = read_budgets(budgets_path)?;

    let mut insight_config = config.insights.clone();
    if strict_month {
        insight_config.month_matching = MonthMatching::YearAndMonth;
    }
    debug!(
        month_matching = insight_config.month_matching.as_str(),
        "Generating insights"
    );

    Ok(InsightGenerator::from_config(&insight_config).generate(&transactions, &budgets, date))
}

pub fn cmd_insights(
    config: &EngineConfig,
    transactions_path: &Path,
    budgets_path: &Path,
    date: NaiveDate,
    strict_month: bool,
    json: bool,
) -> Result<()> {
    let insights = build_insights(config, transactions_path, budgets_path, date, strict_month)?;

    if json {
        return super::print_json(&insights);
    }

    println!();
    println!("💡 Insights for {}", date.format("%B %Y"));
    println!("   ─────────────────────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing to flag. Spending is within budget.");
        return Ok(());
    }

    for insight in &insights {
        let icon = match insight.kind {
            InsightKind::Warning => "⚠️ ",
            InsightKind::Suggestion => "💡",
            InsightKind::Achievement => "🏆",
        };
        println!("   {} {}", icon, insight.title);
        println!("      {}", insight.description);
        println!(
            "      \x1b[2m{} · confidence {}\x1b[0m",
            insight.kind,
            super::percent(insight.confidence)
        );
    }

    Ok(())
}
