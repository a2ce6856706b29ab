//! Spendwise Core Library
//!
//! Rule-based inference engine for the Spendwise personal finance tracker:
//! - Category classifier for free-text transaction descriptions
//! - Insight generator comparing spending with budgets and projections
//! - Trend forecaster for monthly spending
//! - Dashboard summaries and savings goal progress
//! - Transaction search and category filtering
//! - CSV snapshot loaders and TOML engine configuration
//!
//! All engine operations are pure functions over the snapshot they are given.

pub mod classifier;
pub mod config;
pub mod error;
pub mod filter;
pub mod goals;
pub mod import;
pub mod insights;
pub mod models;
pub mod summary;
pub mod trends;

pub use classifier::{classify, CategoryClassifier, CategoryRule, Classification, OTHER_CATEGORY};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use filter::{TransactionFilter, ALL_CATEGORIES};
pub use goals::GoalStatus;
pub use insights::{generate_insights, InsightConfig, InsightGenerator, MonthMatching};
pub use models::{
    round_money, Budget, BudgetPeriod, Goal, GoalPriority, InsightKind, PredictiveInsight,
    SpendingTrend, Transaction, TransactionType,
};
pub use summary::{BudgetStatus, CategoryTotal, MonthComparison, MonthlySummary};
pub use trends::{forecast_trend, forecast_trend_at, TrendConfig, TrendForecaster};
