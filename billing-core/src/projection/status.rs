//! Cycle status resolution.

use chrono::{Days, NaiveDate};

use crate::models::{PaymentStatus, StudentBilling, TuitionPlan};

/// Outcome of resolving one enumerated cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleResolution {
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub settled_on: Option<NaiveDate>,
}

/// Resolve the settlement status of the cycle starting at `cycle_start`.
///
/// The store keeps a single due-date/status pointer per student, so past
/// cycles are reconstructed by correlating that pointer and the last
/// recorded payment against the cycle in question. The checks run from
/// most specific to least; a plain comparison of `cycle_start` against
/// `today` decides anything the pointer cannot describe.
///
/// Returns `None` when the cycle's end is not representable. Callers treat
/// that as a data-quality skip.
pub fn resolve_cycle(
    student: &StudentBilling,
    plan: &TuitionPlan,
    cycle_start: NaiveDate,
    today: NaiveDate,
) -> Option<CycleResolution> {
    if !plan.has_valid_period() {
        return None;
    }
    let due_date = cycle_start.checked_add_days(Days::new(plan.period_days as u64))?;

    // Time-based fallback: pending until the cycle start passes, overdue
    // after. The pointer checks below only ever refine this.
    let mut status = if cycle_start < today {
        PaymentStatus::Overdue
    } else {
        PaymentStatus::Pending
    };
    let mut settled_on = None;

    let last_payment = student.last_payment_date;
    let payment_in_cycle =
        last_payment.is_some_and(|paid| paid >= cycle_start && paid < due_date);
    // A payment date alone is ambiguous when the schedule was advanced
    // early, so the stored pointer has to corroborate it.
    let pointer_confirms = student.overall_status == PaymentStatus::Paid
        && student.overall_due_date > cycle_start;

    if payment_in_cycle && pointer_confirms {
        status = PaymentStatus::Paid;
        settled_on = last_payment;
    } else if last_payment == Some(cycle_start) {
        // Exact settlement-date match stands on its own.
        status = PaymentStatus::Paid;
        settled_on = last_payment;
    } else if due_date == student.overall_due_date {
        // This is the very cycle the stored pointer describes, so the
        // stored status wins. The one exception: a stored `pending` never
        // masks a cycle whose start has already lapsed.
        match student.overall_status {
            PaymentStatus::Paid => {
                status = PaymentStatus::Paid;
                settled_on = last_payment;
            }
            PaymentStatus::Overdue => status = PaymentStatus::Overdue,
            PaymentStatus::Pending => {
                if status != PaymentStatus::Overdue {
                    status = PaymentStatus::Pending;
                }
            }
        }
    }

    Some(CycleResolution {
        due_date,
        status,
        settled_on,
    })
}
