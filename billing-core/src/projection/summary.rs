//! Month aggregation.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Expense, PaymentEntry, PaymentStatus};

/// Monthly totals over projected entries and recorded expenses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthSummary {
    pub total_paid: Decimal,
    pub total_pending: Decimal,
    pub total_overdue: Decimal,
    pub total_expenses: Decimal,
    /// `total_paid` minus `total_expenses`. Expected and overdue revenue
    /// stay out of the balance until collected.
    pub balance: Decimal,
}

impl MonthSummary {
    pub fn zero() -> Self {
        Self {
            total_paid: Decimal::ZERO,
            total_pending: Decimal::ZERO,
            total_overdue: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}

/// Fold entries and expenses into monthly totals. Empty input sums to zero.
pub fn summarize(entries: &[PaymentEntry], expenses: &[Expense]) -> MonthSummary {
    let mut summary = MonthSummary::zero();

    for entry in entries {
        match entry.status {
            PaymentStatus::Paid => summary.total_paid += entry.amount,
            PaymentStatus::Pending => summary.total_pending += entry.amount,
            PaymentStatus::Overdue => summary.total_overdue += entry.amount,
        }
    }
    for expense in expenses {
        summary.total_expenses += expense.amount;
    }
    summary.balance = summary.total_paid - summary.total_expenses;

    summary
}
