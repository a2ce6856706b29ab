//! Savings goal command implementation

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use spendwise_core::{round_money, Goal, GoalStatus};

use super::{read_goals, truncate};

#[derive(Serialize)]
struct GoalLine<'a> {
    #[serde(flatten)]
    goal: &'a Goal,
    progress_percent: Decimal,
    remaining: Decimal,
    days_left: i64,
    status: GoalStatus,
}

pub fn cmd_goals(goals_path: &Path, today: NaiveDate, json: bool) -> Result<()> {
    let goals = read_goals(goals_path)?;

    let lines: Vec<GoalLine> = goals
        .iter()
        .map(|goal| GoalLine {
            goal,
            progress_percent: goal.progress_percent(),
            remaining: goal.remaining(),
            days_left: goal.days_until_deadline(today),
            status: goal.status(today),
        })
        .collect();

    if json {
        return super::print_json(&lines);
    }

    println!();
    println!("🎯 Savings Goals ({})", lines.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if lines.is_empty() {
        println!("   No goals yet.");
        return Ok(());
    }

    for line in &lines {
        let icon = match line.status {
            GoalStatus::Complete => "🏆",
            GoalStatus::Overdue => "❌",
            GoalStatus::Urgent => "⏰",
            GoalStatus::OnTrack => "✓",
        };
        println!(
            "   {} {:24} ${:.2} / ${:.2} ({:.0}%)",
            icon,
            truncate(&line.goal.name, 24),
            round_money(line.goal.current_amount),
            round_money(line.goal.target_amount),
            line.progress_percent.min(Decimal::ONE_HUNDRED).round_dp(0)
        );
        let deadline = match line.status {
            GoalStatus::Complete => "reached".to_string(),
            GoalStatus::Overdue => format!("{} days overdue", -line.days_left),
            _ => format!("{} days left", line.days_left),
        };
        println!(
            "      \x1b[2m{} · {} priority · due {} ({})\x1b[0m",
            line.status, line.goal.priority, line.goal.deadline, deadline
        );
    }

    Ok(())
}
