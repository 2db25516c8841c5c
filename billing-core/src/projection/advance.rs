//! Cycle advancement.

use chrono::{Days, Months, NaiveDate};
use coach_core::error::AppError;

use crate::models::{BillingAdvance, PaymentStatus, TuitionPlan};

/// Compute the billing-state update for settling the cycle that starts at
/// `settled_cycle_start`.
///
/// The last payment date is pinned to the settled cycle's start and the
/// due-date pointer rolls forward one whole period from it. A plan without
/// a usable period falls back to the same day of the next calendar month
/// (clamped to that month's length); the flag on the result marks that
/// path so callers can surface the malformed plan.
pub fn advance(
    plan: &TuitionPlan,
    settled_cycle_start: NaiveDate,
) -> Result<BillingAdvance, AppError> {
    let (overall_due_date, period_fallback) = if plan.has_valid_period() {
        let due_date = settled_cycle_start
            .checked_add_days(Days::new(plan.period_days as u64))
            .ok_or_else(|| {
                AppError::DataQuality(anyhow::anyhow!(
                    "Next due date for plan {} is past the supported calendar range",
                    plan.plan_id
                ))
            })?;
        (due_date, false)
    } else {
        let due_date = settled_cycle_start
            .checked_add_months(Months::new(1))
            .ok_or_else(|| {
                AppError::DataQuality(anyhow::anyhow!(
                    "Fallback due date for plan {} is past the supported calendar range",
                    plan.plan_id
                ))
            })?;
        (due_date, true)
    };

    Ok(BillingAdvance {
        last_payment_date: settled_cycle_start,
        overall_due_date,
        overall_status: PaymentStatus::Paid,
        period_fallback,
    })
}
