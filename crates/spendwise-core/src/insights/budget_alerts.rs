//! Budget Alerts Insight
//!
//! Flags budgets whose month-to-date spending has reached the near-limit
//! ratio. Spending past the limit is a warning, anything between the ratio
//! and the limit is a suggestion.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{round_money, InsightKind, PredictiveInsight};

use super::engine::{AnalysisContext, InsightRule};

/// Insight rule comparing category spending with budget limits
pub struct BudgetAlertRule {
    /// Fraction of the limit that triggers an alert (default 0.8)
    near_limit_ratio: Decimal,
}

impl BudgetAlertRule {
    pub fn new(near_limit_ratio: Decimal) -> Self {
        Self { near_limit_ratio }
    }

    fn confidence() -> Decimal {
        Decimal::new(9, 1)
    }
}

impl Default for BudgetAlertRule {
    fn default() -> Self {
        Self::new(Decimal::new(8, 1))
    }
}

impl InsightRule for BudgetAlertRule {
    fn id(&self) -> &'static str {
        "budget_alerts"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<PredictiveInsight> {
        let mut insights = Vec::new();

        for budget in ctx.budgets {
            if budget.limit <= Decimal::ZERO {
                warn!(
                    budget = budget.id.as_str(),
                    category = budget.category.as_str(),
                    "Skipping budget with non-positive limit"
                );
                continue;
            }

            let spent: Decimal = ctx
                .month_expenses
                .iter()
                .filter(|t| t.category == budget.category)
                .map(|t| t.amount)
                .sum();

            if spent < budget.limit * self.near_limit_ratio {
                continue;
            }

            let kind = if spent > budget.limit {
                InsightKind::Warning
            } else {
                InsightKind::Suggestion
            };

            insights.push(PredictiveInsight {
                id: format!("budget-{}", budget.id),
                kind,
                title: format!("{} Budget Alert", budget.category),
                description: format!(
                    "You've spent ${:.2} of your ${} {} budget",
                    round_money(spent),
                    budget.limit.normalize(),
                    budget.category
                ),
                confidence: Self::confidence(),
                actionable: true,
            });
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::MonthMatching;
    use crate::models::{Budget, Transaction, TransactionType};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 15).unwrap()
    }

    fn expense(category: &str, amount: Decimal) -> Transaction {
        Transaction::new(
            "t",
            NaiveDate::from_ymd_opt(2024, 12, 3).unwrap(),
            "test",
            amount,
            TransactionType::Expense,
            category,
        )
    }

    fn run(transactions: &[Transaction], budgets: &[Budget]) -> Vec<PredictiveInsight> {
        let ctx = AnalysisContext::new(transactions, budgets, today(), MonthMatching::MonthOnly);
        BudgetAlertRule::default().evaluate(&ctx)
    }

    #[test]
    fn test_spent_equal_to_limit_is_suggestion() {
        let budgets = vec![Budget::new("1", "Food & Dining", Decimal::new(100, 0))];
        let transactions = vec![
            expense("Food & Dining", Decimal::new(60, 0)),
            expense("Food & Dining", Decimal::new(40, 0)),
        ];

        let insights = run(&transactions, &budgets);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Suggestion);
        assert_eq!(insights[0].confidence, Decimal::new(9, 1));
        assert!(insights[0].actionable);
        assert_eq!(insights[0].id, "budget-1");
        assert_eq!(insights[0].title, "Food & Dining Budget Alert");
        assert_eq!(
            insights[0].description,
            "You've spent $100.00 of your $100 Food & Dining budget"
        );
    }

    #[test]
    fn test_spent_over_limit_is_warning() {
        let budgets = vec![Budget::new("1", "Shopping", Decimal::new(100, 0))];
        let transactions = vec![expense("Shopping", Decimal::new(10001, 2))];

        let insights = run(&transactions, &budgets);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Warning);
    }

    #[test]
    fn test_exactly_at_ratio_is_reported() {
        let budgets = vec![Budget::new("1", "Health", Decimal::new(75, 0))];
        let transactions = vec![expense("Health", Decimal::new(60, 0))];

        let insights = run(&transactions, &budgets);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Suggestion);
    }

    #[test]
    fn test_below_ratio_is_silent() {
        let budgets = vec![Budget::new("1", "Health", Decimal::new(100, 0))];
        let transactions = vec![expense("Health", Decimal::new(7999, 2))];

        assert!(run(&transactions, &budgets).is_empty());
    }

    #[test]
    fn test_spent_is_rounded_to_cents() {
        let budgets = vec![Budget::new("1", "Health", Decimal::new(100, 0))];
        let transactions = vec![expense("Health", Decimal::new(90125, 3))];

        let insights = run(&transactions, &budgets);
        assert_eq!(
            insights[0].description,
            "You've spent $90.13 of your $100 Health budget"
        );
    }

    #[test]
    fn test_zero_limit_is_skipped() {
        let budgets = vec![Budget::new("1", "Health", Decimal::ZERO)];
        let transactions = vec![expense("Health", Decimal::new(5, 0))];

        assert!(run(&transactions, &budgets).is_empty());
    }

    #[test]
    fn test_budgets_sharing_category_each_report() {
        let budgets = vec![
            Budget::new("a", "Utilities", Decimal::new(50, 0)),
            Budget::new("b", "Utilities", Decimal::new(200, 0)),
            Budget::new("c", "Utilities", Decimal::new(60, 0)),
        ];
        let transactions = vec![expense("Utilities", Decimal::new(55, 0))];

        let insights = run(&transactions, &budgets);
        let ids: Vec<_> = insights.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["budget-a", "budget-c"]);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert_eq!(insights[1].kind, InsightKind::Suggestion);
    }
}
