//! Spending Projection Insight
//!
//! Extrapolates month-to-date spending to the whole month using the average
//! daily spend so far, and warns when the projection crosses a threshold.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{round_money, InsightKind, PredictiveInsight};

use super::engine::{AnalysisContext, InsightRule};

/// Insight rule projecting the month's total spending
pub struct SpendingProjectionRule {
    /// Projected total that triggers a warning (default 1000)
    threshold: Decimal,
}

impl SpendingProjectionRule {
    pub fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }

    fn confidence() -> Decimal {
        Decimal::new(85, 2)
    }
}

impl Default for SpendingProjectionRule {
    fn default() -> Self {
        Self::new(Decimal::new(1000, 0))
    }
}

/// Number of days in the month containing `date`
pub(crate) fn days_in_month(date: NaiveDate) -> Option<u32> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// Month total implied by `spent` over the first `elapsed_days` of the month
pub(crate) fn project_month_total(
    spent: Decimal,
    elapsed_days: u32,
    days_in_month: u32,
) -> Option<Decimal> {
    spent
        .checked_mul(Decimal::from(days_in_month))?
        .checked_div(Decimal::from(elapsed_days))
}

impl InsightRule for SpendingProjectionRule {
    fn id(&self) -> &'static str {
        "spending_projection"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<PredictiveInsight> {
        let spent: Decimal = ctx.month_expenses.iter().map(|t| t.amount).sum();

        let elapsed_days = ctx.reference_date.day();
        let Some(month_days) = days_in_month(ctx.reference_date) else {
            return vec![];
        };

        let Some(projected) = project_month_total(spent, elapsed_days, month_days) else {
            debug!(elapsed_days, "No elapsed days to project from");
            return vec![];
        };

        debug!(
            spent = %spent,
            projected = %round_money(projected),
            "Projected month spending"
        );

        if projected <= self.threshold {
            return vec![];
        }

        vec![PredictiveInsight {
            id: "high-spending".to_string(),
            kind: InsightKind::Warning,
            title: "High Spending Alert".to_string(),
            description: format!(
                "Based on current trends, you're projected to spend ${:.2} this month",
                round_money(projected)
            ),
            confidence: Self::confidence(),
            actionable: true,
        }]
    }
}
