//! Monthly spending trend and next-month forecast
//!
//! Aggregates expenses into monthly totals labeled like "Dec 24", then
//! extrapolates one month ahead from the average month-over-month change of
//! the most recent points.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{SpendingTrend, Transaction};

/// Label format for trend points: short month name and two-digit year
const MONTH_LABEL_FORMAT: &str = "%b %y";

/// Forecaster settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendConfig {
    /// Number of trailing points the average change is taken over
    pub window: usize,
    /// Maximum number of points returned, forecast included
    pub max_points: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: 3,
            max_points: 6,
        }
    }
}

/// Month label for a date, e.g. "Dec 24"
pub fn month_label(date: NaiveDate) -> String {
    date.format(MONTH_LABEL_FORMAT).to_string()
}

/// Label of the calendar month after the one containing `today`
fn next_month_label(today: NaiveDate) -> Option<String> {
    today
        .with_day(1)?
        .checked_add_months(Months::new(1))
        .map(month_label)
}

/// Builds monthly spending trends with a one-month forecast
#[derive(Debug, Clone, Default)]
pub struct TrendForecaster {
    config: TrendConfig,
}

impl TrendForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Sum expenses per month, in chronological order
    ///
    /// Expenses are stable-sorted by date before grouping, so months come out
    /// in the order they are first seen on the calendar.
    pub fn monthly_totals(&self, transactions: &[Transaction]) -> Vec<SpendingTrend> {
        let mut expenses: Vec<&Transaction> =
            transactions.iter().filter(|t| t.is_expense()).collect();
        expenses.sort_by_key(|t| t.date);

        let mut totals: Vec<SpendingTrend> = Vec::new();
        for tx in expenses {
            let label = month_label(tx.date);
            match totals.iter_mut().find(|p| p.month == label) {
                Some(point) => point.amount += tx.amount,
                None => totals.push(SpendingTrend {
                    month: label,
                    amount: tx.amount,
                    predicted: false,
                }),
            }
        }

        totals
    }

    /// Forecast for the month after `today`, if there is enough history
    fn forecast_point(&self, history: &[SpendingTrend], today: NaiveDate) -> Option<SpendingTrend> {
        let start = history.len().saturating_sub(self.config.window);
        let window = &history[start..];
        if window.len() < 2 {
            return None;
        }

        let total_change: Decimal = window.windows(2).map(|p| p[1].amount - p[0].amount).sum();
        let average_change = total_change.checked_div(Decimal::from(window.len() - 1))?;

        let last = window.last()?.amount;
        let amount = (last + average_change).max(Decimal::ZERO);

        debug!(
            last = %last,
            average_change = %average_change.round_dp(2),
            "Forecast next month spending"
        );

        Some(SpendingTrend {
            month: next_month_label(today)?,
            amount,
            predicted: true,
        })
    }

    /// Monthly totals plus a forecast for the month after `today`
    pub fn forecast_at(&self, transactions: &[Transaction], today: NaiveDate) -> Vec<SpendingTrend> {
        let mut trends = self.monthly_totals(transactions);

        if let Some(point) = self.forecast_point(&trends, today) {
            trends.push(point);
        }

        if trends.len() > self.config.max_points {
            let excess = trends.len() - self.config.max_points;
            trends.drain(..excess);
        }

        trends
    }

    /// Monthly totals plus a forecast for next calendar month
    pub fn forecast(&self, transactions: &[Transaction]) -> Vec<SpendingTrend> {
        self.forecast_at(transactions, chrono::Local::now().date_naive())
    }
}

/// Forecast with default settings, relative to today's date
pub fn forecast_trend(transactions: &[Transaction]) -> Vec<SpendingTrend> {
    TrendForecaster::new().forecast(transactions)
}

/// Forecast with default settings, relative to `today`
pub fn forecast_trend_at(transactions: &[Transaction], today: NaiveDate) -> Vec<SpendingTrend> {
    TrendForecaster::new().forecast_at(transactions, today)
}
