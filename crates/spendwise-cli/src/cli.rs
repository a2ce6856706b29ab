//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendwise - Categorize, budget and forecast your spending
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Rule-based personal finance insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to ~/.local/share/spendwise/engine.toml,
    /// then the built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest a category for a transaction description
    Classify {
        /// Free-text description, e.g. "Pizza with friends"
        description: String,
    },

    /// List categories in classifier order
    Categories,

    /// Budget warnings and spending projections for a month
    Insights {
        /// Transactions CSV (id,date,description,amount,type,category)
        #[arg(short, long)]
        transactions: PathBuf,

        /// Budgets CSV (id,category,limit,spent,period,color)
        #[arg(short, long)]
        budgets: PathBuf,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Only count transactions from the reference year, not just the month
        #[arg(long)]
        strict_month: bool,
    },

    /// Monthly spending totals with a next-month forecast
    Trends {
        /// Transactions CSV
        #[arg(short, long)]
        transactions: PathBuf,

        /// Date the forecast is relative to (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Dashboard summary for a month
    Summary {
        /// Transactions CSV
        #[arg(short, long)]
        transactions: PathBuf,

        /// Budgets CSV
        #[arg(short, long)]
        budgets: Option<PathBuf>,

        /// Goals CSV, for average goal progress
        #[arg(short, long)]
        goals: Option<PathBuf>,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Search and filter transactions
    Transactions {
        /// Transactions CSV
        #[arg(short, long)]
        transactions: PathBuf,

        /// Case-insensitive text matched against description or category
        #[arg(short, long)]
        search: Option<String>,

        /// Exact category ("All" for every category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Savings goal progress
    Goals {
        /// Goals CSV (id,name,target_amount,current_amount,deadline,category,priority)
        #[arg(short, long)]
        goals: PathBuf,

        /// Date deadlines are measured from (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,
    },
}
