//! Insight Generator - runs insight rules over a spending snapshot

use chrono::NaiveDate;

use crate::models::{Budget, PredictiveInsight, Transaction};

use super::{BudgetAlertRule, InsightConfig, MonthMatching, SpendingProjectionRule};

/// Snapshot handed to every insight rule
pub struct AnalysisContext<'a> {
    /// Budgets in caller order
    pub budgets: &'a [Budget],
    /// Day the analysis is run for
    pub reference_date: NaiveDate,
    /// Expense transactions falling in the reference month
    pub month_expenses: Vec<&'a Transaction>,
}

impl<'a> AnalysisContext<'a> {
    /// Create a context, scoping expenses to the reference month
    pub fn new(
        transactions: &'a [Transaction],
        budgets: &'a [Budget],
        reference_date: NaiveDate,
        matching: MonthMatching,
    ) -> Self {
        let month_expenses = transactions
            .iter()
            .filter(|t| t.is_expense() && matching.matches(t.date, reference_date))
            .collect();

        Self {
            budgets,
            reference_date,
            month_expenses,
        }
    }
}

/// A single insight rule
pub trait InsightRule: Send + Sync {
    /// Short identifier used in logs
    fn id(&self) -> &'static str;

    /// Produce insights for the snapshot
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<PredictiveInsight>;
}

/// Runs registered rules in order and concatenates their insights
pub struct InsightGenerator {
    rules: Vec<Box<dyn InsightRule>>,
    month_matching: MonthMatching,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator {
    /// Create a generator with the built-in rules and default thresholds
    pub fn new() -> Self {
        Self::from_config(&InsightConfig::default())
    }

    /// Create a generator with the built-in rules and the given thresholds
    pub fn from_config(config: &InsightConfig) -> Self {
        let mut generator = Self {
            rules: vec![],
            month_matching: config.month_matching,
        };

        // Budget alerts come before the projection in the output
        generator.register(Box::new(BudgetAlertRule::new(config.near_limit_ratio)));
        generator.register(Box::new(SpendingProjectionRule::new(
            config.projection_threshold,
        )));

        generator
    }

    /// Register a rule; it runs after all previously registered rules
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    pub fn month_matching(&self) -> MonthMatching {
        self.month_matching
    }

    /// Generate insights for the month of `reference_date`
    pub fn generate(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
        reference_date: NaiveDate,
    ) -> Vec<PredictiveInsight> {
        let ctx = AnalysisContext::new(transactions, budgets, reference_date, self.month_matching);

        let mut insights = vec![];
        for rule in &self.rules {
            let produced = rule.evaluate(&ctx);
            tracing::debug!(
                rule = rule.id(),
                count = produced.len(),
                "Insight rule complete"
            );
            insights.extend(produced);
        }

        insights
    }

    /// Identifiers of registered rules, in evaluation order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InsightKind, TransactionType};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(id: &str, date: NaiveDate, category: &str, amount: i64) -> Transaction {
        Transaction::new(
            id,
            date,
            "test",
            Decimal::new(amount, 0),
            TransactionType::Expense,
            category,
        )
    }

    struct StaticRule;

    impl InsightRule for StaticRule {
        fn id(&self) -> &'static str {
            "static"
        }

        fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Vec<PredictiveInsight> {
            vec![PredictiveInsight {
                id: format!("static-{}", ctx.month_expenses.len()),
                kind: InsightKind::Achievement,
                title: "Static".into(),
                description: String::new(),
                confidence: Decimal::ONE,
                actionable: false,
            }]
        }
    }

    #[test]
    fn test_generator_creation() {
        let generator = InsightGenerator::new();
        assert_eq!(
            generator.rule_ids(),
            vec!["budget_alerts", "spending_projection"]
        );
        assert_eq!(generator.month_matching(), MonthMatching::MonthOnly);
    }

    #[test]
    fn test_context_scopes_expenses() {
        let mut income = expense("3", date(2024, 12, 2), "Income", 500);
        income.kind = TransactionType::Income;
        let transactions = vec![
            expense("1", date(2024, 12, 1), "Food & Dining", 10),
            expense("2", date(2024, 11, 30), "Food & Dining", 10),
            income,
            expense("4", date(2023, 12, 5), "Food & Dining", 10),
        ];

        let ctx = AnalysisContext::new(
            &transactions,
            &[],
            date(2024, 12, 15),
            MonthMatching::MonthOnly,
        );
        let ids: Vec<_> = ctx.month_expenses.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);

        let ctx = AnalysisContext::new(
            &transactions,
            &[],
            date(2024, 12, 15),
            MonthMatching::YearAndMonth,
        );
        assert_eq!(ctx.month_expenses.len(), 1);
    }

    #[test]
    fn test_registered_rules_run_last() {
        let mut generator = InsightGenerator::new();
        generator.register(Box::new(StaticRule));

        let insights = generator.generate(&[], &[], date(2024, 12, 15));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].id, "static-0");
    }

    #[test]
    fn test_empty_snapshot_yields_nothing() {
        let insights = InsightGenerator::new().generate(&[], &[], date(2024, 12, 1));
        assert!(insights.is_empty());
    }
}
