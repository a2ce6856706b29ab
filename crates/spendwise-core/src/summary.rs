//! Dashboard and analytics summaries
//!
//! Plain aggregations over a transaction snapshot: month totals, category
//! breakdown, month-over-month change, savings rate, budget status and the
//! overall budget and goal figures.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::insights::MonthMatching;
use crate::models::{Budget, Goal, Transaction};

/// Income, expenses and balance for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net_balance: Decimal,
    pub transaction_count: usize,
}

impl MonthlySummary {
    /// Totals for the month of `reference_date`
    pub fn for_month(
        transactions: &[Transaction],
        reference_date: NaiveDate,
        matching: MonthMatching,
    ) -> Self {
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        let mut transaction_count = 0;

        for tx in transactions
            .iter()
            .filter(|t| matching.matches(t.date, reference_date))
        {
            if tx.is_income() {
                income += tx.amount;
            } else {
                expenses += tx.amount;
            }
            transaction_count += 1;
        }

        Self {
            income,
            expenses,
            net_balance: income - expenses,
            transaction_count,
        }
    }
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    /// Share of the listed categories' total, in percent
    pub percentage: Decimal,
    pub transaction_count: usize,
}

/// Largest expense categories, biggest first
///
/// Percentages are relative to the categories returned, matching how the
/// breakdown is charted.
pub fn category_breakdown(transactions: &[Transaction], limit: usize) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for tx in transactions.iter().filter(|t| t.is_expense()) {
        match totals.iter_mut().find(|c| c.category == tx.category) {
            Some(total) => {
                total.amount += tx.amount;
                total.transaction_count += 1;
            }
            None => totals.push(CategoryTotal {
                category: tx.category.clone(),
                amount: tx.amount,
                percentage: Decimal::ZERO,
                transaction_count: 1,
            }),
        }
    }

    // Stable sort keeps first-seen order among equal totals
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals.truncate(limit);

    let shown: Decimal = totals.iter().map(|c| c.amount).sum();
    for total in &mut totals {
        total.percentage = percent_of(total.amount, shown);
    }

    totals
}

/// `part / whole * 100`, or zero when `whole` is zero
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

/// This month's expenses compared with the previous month's
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthComparison {
    pub current: Decimal,
    pub previous: Decimal,
    pub change: Decimal,
    /// Zero when there was no spending last month
    pub change_percent: Decimal,
}

/// Compare expenses in the month of `reference_date` with the month before
pub fn month_over_month(
    transactions: &[Transaction],
    reference_date: NaiveDate,
    matching: MonthMatching,
) -> MonthComparison {
    let previous_month = reference_date
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(1)));

    let sum_for = |month: NaiveDate| -> Decimal {
        transactions
            .iter()
            .filter(|t| t.is_expense() && matching.matches(t.date, month))
            .map(|t| t.amount)
            .sum()
    };

    let current = sum_for(reference_date);
    let previous = previous_month.map(sum_for).unwrap_or(Decimal::ZERO);
    let change = current - previous;

    MonthComparison {
        current,
        previous,
        change,
        change_percent: percent_of(change, previous),
    }
}

/// Share of income not spent, in percent; zero without income
pub fn savings_rate(transactions: &[Transaction]) -> Decimal {
    let (income, expenses) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expenses), tx| {
            if tx.is_income() {
                (income + tx.amount, expenses)
            } else {
                (income, expenses + tx.amount)
            }
        },
    );

    percent_of(income - expenses, income)
}

/// Total spent across all budgets as a share of their total limit, in percent
///
/// Zero when the budgets have no limit to measure against.
pub fn overall_budget_usage(budgets: &[Budget]) -> Decimal {
    let spent: Decimal = budgets.iter().map(|b| b.spent).sum();
    let limit: Decimal = budgets.iter().map(|b| b.limit).sum();
    percent_of(spent, limit)
}

/// Mean of each goal's progress percentage; zero without goals
pub fn average_goal_progress(goals: &[Goal]) -> Decimal {
    if goals.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = goals.iter().map(Goal::progress_percent).sum();
    total / Decimal::from(goals.len())
}

/// Traffic-light state of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Good,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    /// Status from the budget's own `spent` and `limit`
    pub fn of(budget: &Budget) -> Self {
        if budget.limit <= Decimal::ZERO {
            return if budget.spent > Decimal::ZERO {
                Self::Exceeded
            } else {
                Self::Good
            };
        }

        let percent = budget.spent / budget.limit * Decimal::ONE_HUNDRED;
        if percent >= Decimal::ONE_HUNDRED {
            Self::Exceeded
        } else if percent >= Decimal::new(80, 0) {
            Self::Warning
        } else {
            Self::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
