//! Cycle enumeration.

use chrono::{Days, NaiveDate};

use crate::models::TuitionPlan;

use super::MonthWindow;

/// Start date of a student's first billing cycle.
///
/// Returns `None` when the plan period is not positive or the date is not
/// representable; such students produce no cycles anywhere.
pub fn first_cycle_start(enrollment_date: NaiveDate, plan: &TuitionPlan) -> Option<NaiveDate> {
    if !plan.has_valid_period() {
        return None;
    }
    if plan.charge_at_enrollment {
        Some(enrollment_date)
    } else {
        enrollment_date.checked_add_days(Days::new(plan.period_days as u64))
    }
}

/// All cycle starts that fall inside `window`, in ascending order.
///
/// Steps by whole days from the first cycle, so cycle boundaries drift
/// through calendar months rather than pinning to a day of month. The walk
/// stops two periods past the window end, which bounds it for any input.
pub fn cycle_starts_in_window(
    enrollment_date: NaiveDate,
    plan: &TuitionPlan,
    window: MonthWindow,
) -> Vec<NaiveDate> {
    let Some(mut candidate) = first_cycle_start(enrollment_date, plan) else {
        return Vec::new();
    };

    let period = Days::new(plan.period_days as u64);
    let stop = window
        .last_day()
        .checked_add_days(Days::new((plan.period_days as u64).saturating_mul(2)))
        .unwrap_or(window.last_day());

    let mut starts = Vec::new();
    while candidate <= stop {
        if window.contains(candidate) {
            starts.push(candidate);
        }
        match candidate.checked_add_days(period) {
            Some(next) => candidate = next,
            None => break,
        }
    }
    starts
}
