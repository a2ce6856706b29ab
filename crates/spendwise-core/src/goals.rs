//! Savings goal progress

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Goal;

/// Days before the deadline at which a goal counts as urgent
const URGENT_WITHIN_DAYS: i64 = 30;

/// Where a goal stands relative to its target and deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Complete,
    Overdue,
    Urgent,
    OnTrack,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Overdue => "overdue",
            Self::Urgent => "urgent",
            Self::OnTrack => "on_track",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Goal {
    /// Saved share of the target, in percent (uncapped)
    pub fn progress_percent(&self) -> Decimal {
        self.current_amount
            .checked_div(self.target_amount)
            .map(|ratio| ratio * Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn is_complete(&self) -> bool {
        self.progress_percent() >= Decimal::ONE_HUNDRED
    }

    /// Whole days from `today` to the deadline; negative once it has passed
    pub fn days_until_deadline(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    pub fn status(&self, today: NaiveDate) -> GoalStatus {
        if self.is_complete() {
            return GoalStatus::Complete;
        }

        let days_left = self.days_until_deadline(today);
        if days_left < 0 {
            GoalStatus::Overdue
        } else if days_left > 0 && days_left <= URGENT_WITHIN_DAYS {
            GoalStatus::Urgent
        } else {
            GoalStatus::OnTrack
        }
    }

    /// A copy with `amount` added, never past the target
    pub fn contribute(&self, amount: Decimal) -> Goal {
        let mut goal = self.clone();
        goal.current_amount = (goal.current_amount + amount).min(goal.target_amount);
        goal
    }

    /// Amount still needed to reach the target
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }
}
