//! Spendwise CLI - Rule-based personal finance insights
//!
//! Usage:
//!   spendwise classify "Pizza with friends"          Suggest a category
//!   spendwise insights -t tx.csv -b budgets.csv      Budget and projection insights
//!   spendwise trends -t tx.csv                       Monthly trend with forecast
//!   spendwise summary -t tx.csv -b budgets.csv       Dashboard summary
//!   spendwise transactions -t tx.csv -s campus       Search transactions

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { description } => {
            commands::cmd_classify(&config, &description, cli.json)
        }
        Commands::Categories => commands::cmd_categories(&config, cli.json),
        Commands::Insights {
            transactions,
            budgets,
            date,
            strict_month,
        } => {
            let date = commands::resolve_date(date.as_deref())?;
            commands::cmd_insights(
                &config,
                &transactions,
                &budgets,
                date,
                strict_month,
                cli.json,
            )
        }
        Commands::Trends {
            transactions,
            today,
        } => {
            let today = commands::resolve_date(today.as_deref())?;
            commands::cmd_trends(&config, &transactions, today, cli.json)
        }
        Commands::Summary {
            transactions,
            budgets,
            goals,
            date,
        } => {
            let date = commands::resolve_date(date.as_deref())?;
            commands::cmd_summary(
                &config,
                &transactions,
                budgets.as_deref(),
                goals.as_deref(),
                date,
                cli.json,
            )
        }
        Commands::Transactions {
            transactions,
            search,
            category,
        } => commands::cmd_transactions(
            &config,
            &transactions,
            search.as_deref(),
            category.as_deref(),
            cli.json,
        ),
        Commands::Goals { goals, today } => {
            let today = commands::resolve_date(today.as_deref())?;
            commands::cmd_goals(&goals, today, cli.json)
        }
    }
}
