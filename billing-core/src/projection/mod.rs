//! Billing cycle projection.
//!
//! Pure reconstruction of billing cycles from the single stored
//! due-date/status pointer per student. No I/O happens here; callers
//! supply the roster, the window and `today` explicitly, so projecting any
//! month is deterministic and historical months replay exactly.

mod advance;
mod cycles;
mod status;
mod summary;
mod window;

pub use advance::advance;
pub use cycles::{cycle_starts_in_window, first_cycle_start};
pub use status::{resolve_cycle, CycleResolution};
pub use summary::{summarize, MonthSummary};
pub use window::MonthWindow;

use chrono::NaiveDate;

use crate::models::{PaymentEntry, StudentBilling, TuitionPlan};

/// Result of projecting one student into one window.
#[derive(Debug, Clone, Default)]
pub struct StudentProjection {
    pub entries: Vec<PaymentEntry>,
    /// Cycles enumerated but dropped because their dates could not be
    /// resolved.
    pub dropped_cycles: u32,
}

/// Project every cycle of one student that falls inside `window`.
pub fn project_student(
    student: &StudentBilling,
    plan: &TuitionPlan,
    window: MonthWindow,
    today: NaiveDate,
) -> StudentProjection {
    let mut projection = StudentProjection::default();

    for cycle_start in cycle_starts_in_window(student.enrollment_date, plan, window) {
        let Some(resolution) = resolve_cycle(student, plan, cycle_start, today) else {
            projection.dropped_cycles += 1;
            continue;
        };
        projection.entries.push(PaymentEntry {
            student_id: student.student_id,
            student_name: student.display_name.clone(),
            plan_id: plan.plan_id,
            cycle_start,
            due_date: resolution.due_date,
            amount: plan.price,
            status: resolution.status,
            settled_on: resolution.settled_on,
        });
    }

    projection
}
