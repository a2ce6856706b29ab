//! Insight Generator - Budget and Spending Insights
//!
//! Compares the current month's spending against budgets and against a
//! projected month total, and returns human-readable insights for the
//! dashboard. Every call recomputes from the snapshot it is given.
//!
//! ## Rules
//!
//! - **Budget Alerts** - One insight per budget at or past its near-limit ratio
//! - **Spending Projection** - Warns when the month is on track to exceed a total
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendwise_core::insights::generate_insights;
//!
//! let insights = generate_insights(&transactions, &budgets, today);
//! ```

pub mod budget_alerts;
pub mod engine;
pub mod spending_projection;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Budget, PredictiveInsight, Transaction};

pub use budget_alerts::BudgetAlertRule;
pub use engine::{AnalysisContext, InsightGenerator, InsightRule};
pub use spending_projection::SpendingProjectionRule;

/// How transactions are matched to the reference month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonthMatching {
    /// Calendar month number only; the same month of earlier years counts too
    #[default]
    MonthOnly,
    /// Calendar year and month
    YearAndMonth,
}

impl MonthMatching {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthOnly => "month_only",
            Self::YearAndMonth => "year_and_month",
        }
    }

    /// Whether `date` falls in the month of `reference`
    pub fn matches(&self, date: NaiveDate, reference: NaiveDate) -> bool {
        match self {
            Self::MonthOnly => date.month() == reference.month(),
            Self::YearAndMonth => {
                date.month() == reference.month() && date.year() == reference.year()
            }
        }
    }
}

impl std::str::FromStr for MonthMatching {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month_only" => Ok(Self::MonthOnly),
            "year_and_month" => Ok(Self::YearAndMonth),
            _ => Err(format!("Unknown month matching mode: {}", s)),
        }
    }
}

impl std::fmt::Display for MonthMatching {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Thresholds for the built-in insight rules
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Fraction of a budget limit at which an alert is raised (inclusive)
    pub near_limit_ratio: Decimal,
    /// Projected month total above which a warning is raised (exclusive)
    pub projection_threshold: Decimal,
    pub month_matching: MonthMatching,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            near_limit_ratio: Decimal::new(8, 1),
            projection_threshold: Decimal::new(1000, 0),
            month_matching: MonthMatching::MonthOnly,
        }
    }
}

/// Generate insights with the default rules and thresholds
pub fn generate_insights(
    transactions: &[Transaction],
    budgets: &[Budget],
    reference_date: NaiveDate,
) -> Vec<PredictiveInsight> {
    InsightGenerator::new().generate(transactions, budgets, reference_date)
}
