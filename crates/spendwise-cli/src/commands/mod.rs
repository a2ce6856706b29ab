//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config, dates, snapshot loading, JSON output)
//! - `classify` - Category suggestion and category listing
//! - `insights` - Budget and projection insights
//! - `trends` - Monthly spending trend and forecast
//! - `summary` - Dashboard summary
//! - `goals` - Savings goal progress
//! - `transactions` - Transaction search and category filter

pub mod classify;
pub mod core;
pub mod goals;
pub mod insights;
pub mod summary;
pub mod transactions;
pub mod trends;

// Re-export command functions for main.rs
pub use classify::*;
pub use core::*;
pub use goals::*;
pub use insights::*;
pub use summary::*;
pub use transactions::*;
pub use trends::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a confidence score as a whole percentage
pub fn percent(confidence: rust_decimal::Decimal) -> String {
    format!("{:.0}%", (confidence * rust_decimal::Decimal::ONE_HUNDRED).round())
}
